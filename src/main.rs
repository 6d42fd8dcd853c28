//! Centerline - calibration checkpoint catalog for packaging lines
//!
//! Command-line front end to the point catalog, the module layout, the
//! schematic map, the phasing dial and the per-point QR links.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use centerline::cli::{
    CliResult, ConfigArgs, ExitCode, MapArgs, ModuleArgs, PhasingArgs, PointArgs, QrArgs,
};
use centerline::constants::APP_BINARY_NAME;

/// Centerline - calibration checkpoint catalog, map and phasing dial
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = APP_BINARY_NAME)]
struct Cli {
    /// Data directory holding points.json and layout.json
    /// (defaults to the configured directory)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse and edit calibration points
    Point(PointArgs),
    /// Manage layout modules
    Module(ModuleArgs),
    /// Render the schematic map as SVG
    Map(MapArgs),
    /// Show phased points on the machine-cycle dial
    Phasing(PhasingArgs),
    /// Print the deep link and QR image URL of a point
    Qr(QrArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Cli {
    fn run(&self) -> CliResult<()> {
        let data_dir = self.data_dir.as_deref();
        match &self.command {
            Command::Point(args) => args.execute(data_dir),
            Command::Module(args) => args.execute(data_dir),
            Command::Map(args) => args.execute(data_dir),
            Command::Phasing(args) => args.execute(data_dir),
            Command::Qr(args) => args.execute(data_dir),
            Command::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for SVG and JSON.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.run() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code.code());
    }

    std::process::exit(ExitCode::Success.code());
}
