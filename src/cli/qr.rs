//! Deep link and QR image request for a point.

use std::path::Path;

use clap::Args;
use serde::Serialize;

use crate::cli::common::{load_config, open_catalog, print_json, CliError, CliResult};
use crate::config::{QR_SIZE_MAX, QR_SIZE_MIN};
use crate::qr::QrLinkBuilder;

/// Print the deep link of a point and the QR image URL encoding it
#[derive(Debug, Clone, Args)]
pub struct QrArgs {
    /// Point id (e.g. P-07)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Origin the dashboard is served from (e.g. http://localhost:5173)
    #[arg(long, value_name = "URL")]
    pub origin: String,

    /// QR image size in pixels (defaults to the configured size)
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QrResponse {
    id: String,
    link: String,
    qr_image_url: String,
}

impl QrArgs {
    /// Execute the qr command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let config = load_config()?;
        let size = self.size.unwrap_or(config.qr.size);
        if !(QR_SIZE_MIN..=QR_SIZE_MAX).contains(&size) {
            return Err(CliError::validation(format!(
                "QR size must be between {QR_SIZE_MIN} and {QR_SIZE_MAX} pixels"
            )));
        }

        let catalog = open_catalog(data_dir)?;
        if catalog.point(&self.id).is_none() {
            return Err(CliError::not_found(format!("Point '{}' not found", self.id)));
        }

        let builder = QrLinkBuilder::new(&self.origin)
            .with_public_base_url(config.qr.public_base_url.as_deref())
            .with_service_url(&config.qr.service_url);

        let response = QrResponse {
            id: self.id.clone(),
            link: builder.link(&self.id),
            qr_image_url: builder.image_request(&self.id, size),
        };

        if self.json {
            return print_json(&response);
        }

        println!("{}", response.link);
        println!("{}", response.qr_image_url);
        if builder.is_local() && config.qr.public_base_url.is_none() {
            eprintln!(
                "Note: {} is only reachable from this machine; set qr.public_base_url so phones can open the link.",
                self.origin
            );
        }
        Ok(())
    }
}
