//! Map rendering command.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::common::{load_config, open_catalog, write_output, CliError, CliResult};
use crate::export::{render_map, RenderMode};
use crate::projection::{MapBackground, MapProjector};

/// Render the schematic map with point markers as SVG
#[derive(Debug, Clone, Args)]
pub struct MapArgs {
    /// Highlight this point
    #[arg(long, value_name = "ID")]
    pub selected: Option<String>,

    /// High-contrast output without interactive hooks
    #[arg(long)]
    pub print: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl MapArgs {
    /// Execute the map command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let config = load_config()?;
        let catalog = open_catalog(data_dir)?;

        if let Some(id) = &self.selected {
            if catalog.point(id).is_none() {
                return Err(CliError::not_found(format!("Point '{id}' not found")));
            }
        }

        let background = MapBackground::from_setting(config.display.map_background.as_deref());
        let projector = MapProjector::new(catalog.points()).with_selected(self.selected.as_deref());
        let svg = render_map(&projector, &background, RenderMode::from_print_flag(self.print));

        write_output(self.output.as_deref(), &svg)
    }
}
