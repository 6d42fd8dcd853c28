//! Configuration management CLI commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::{Config, KEYS};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set one configuration value
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set one configuration value
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Dotted key, e.g. qr.public_base_url
    #[arg(value_name = "KEY")]
    key: String,

    /// New value; an empty string clears optional settings
    #[arg(value_name = "VALUE")]
    value: String,
}

/// JSON-serializable configuration with resolved paths
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    data_dir: String,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let config_file = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to resolve config file: {e:#}")))?;
        let data_dir = config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?;

        let config_file = config_file.display().to_string();
        let data_dir = data_dir.display().to_string();

        if self.json {
            return print_json(&ConfigOutput {
                config_file,
                data_dir,
                config: &config,
            });
        }

        output_human_readable(&config, &config_file, &data_dir);
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = load_config()?;

        config
            .set(&self.key, &self.value)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, config_file: &str, data_dir: &str) {
    let unset = "(not set)";

    println!("Centerline Configuration");
    println!("========================");
    println!();
    println!("File: {config_file}");
    println!();

    println!("Storage:");
    println!("  Data Directory: {data_dir}");
    println!();

    println!("Display:");
    println!(
        "  Map Background: {}",
        config.display.map_background.as_deref().unwrap_or("(built-in schematic)")
    );
    println!("  Sidebar Collapsed: {}", config.display.sidebar_collapsed);
    println!();

    println!("QR:");
    println!(
        "  Public Base URL: {}",
        config.qr.public_base_url.as_deref().unwrap_or(unset)
    );
    println!("  Size: {} px", config.qr.size);
    println!("  Service: {}", config.qr.service_url);
    println!();

    println!("Catalog:");
    println!("  Enforce Unique IDs: {}", config.catalog.enforce_unique_ids);
    println!();

    println!("Keys: {}", KEYS.join(", "));
}
