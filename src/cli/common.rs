//! Shared CLI plumbing: exit codes, the command error type and catalog access.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::models::ValidationErrors;
use crate::services::{Catalog, CatalogError, FileRepository};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or rejected edit
    ValidationError = 1,
    /// Reading or writing files failed
    IoError = 2,
    /// The requested point or module does not exist
    NotFound = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Human-readable message, printed to stderr
    pub message: String,
    /// Exit code the process ends with
    pub exit_code: ExitCode,
}

impl CliError {
    /// Invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }

    /// File system or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }

    /// Unknown point or module id.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::NotFound,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::PointNotFound(_) => Self::not_found(err.to_string()),
            CatalogError::DuplicatePointId(_) | CatalogError::DuplicateModuleId(_) => {
                Self::validation(err.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for CliError {
    fn from(err: ValidationErrors) -> Self {
        Self::validation(err.to_string())
    }
}

/// Result type of every command.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration, mapping failures to a validation error.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Opens the catalog stored in `data_dir`, or in the configured data directory.
pub fn open_catalog(data_dir: Option<&Path>) -> CliResult<Catalog<FileRepository>> {
    let config = load_config()?;
    let dir = resolve_data_dir(&config, data_dir)?;
    Ok(Catalog::open(FileRepository::new(dir), config.catalog_policy()))
}

/// The `--data-dir` flag when given, otherwise the configured directory.
pub fn resolve_data_dir(config: &Config, data_dir: Option<&Path>) -> CliResult<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}"))),
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Writes rendered output to `path`, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> CliResult<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
