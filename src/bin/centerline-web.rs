//! Centerline Web Server Binary
//!
//! This binary starts the JSON-file backend for the Centerline dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, data from the configured directory)
//! centerline-web
//!
//! # Specify port and data directory
//! centerline-web --port 8080 --data-dir /srv/centerline
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use centerline::config::Config;
use centerline::web;

/// Centerline Web Server - JSON backend for the dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory holding points.json and layout.json.
    /// Defaults to `storage.data_dir` from the configuration, or the
    /// `data` folder next to the configuration file.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load or create configuration
    let config = Config::load().unwrap_or_default();

    let data_dir = match args.data_dir {
        Some(path) => path,
        None => config
            .data_dir()
            .context("Failed to resolve data directory")?,
    };

    info!("Data directory: {}", data_dir.display());

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(config, data_dir, addr).await
}
