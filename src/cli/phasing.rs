//! Phasing dial command.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::common::{open_catalog, print_json, write_output, CliResult};
use crate::export::dial_renderer::dial_report;
use crate::export::{render_dial, RenderMode};
use crate::projection::{PhaseProjector, SimulatedAngle};

/// Show phased points on the machine-cycle dial
#[derive(Debug, Clone, Args)]
pub struct PhasingArgs {
    /// Simulated cycle position in degrees, clamped to [0, 360]
    #[arg(long, value_name = "DEG", default_value_t = 0.0, allow_hyphen_values = true)]
    pub angle: f64,

    /// Output markers as JSON instead of SVG
    #[arg(long, conflicts_with = "print")]
    pub json: bool,

    /// High-contrast output without interactive hooks
    #[arg(long)]
    pub print: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl PhasingArgs {
    /// Execute the phasing command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let catalog = open_catalog(data_dir)?;
        let projector = PhaseProjector::new(catalog.points(), SimulatedAngle::new(self.angle));

        if self.json {
            return print_json(&dial_report(&projector));
        }

        let svg = render_dial(&projector, RenderMode::from_print_flag(self.print));
        write_output(self.output.as_deref(), &svg)
    }
}
