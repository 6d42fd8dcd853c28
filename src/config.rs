//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution. The configuration
//! directory can be redirected with the `CENTERLINE_CONFIG_DIR` environment
//! variable (used by the integration tests).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::qr::{DEFAULT_QR_SERVICE, DEFAULT_QR_SIZE};
use crate::services::CatalogPolicy;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "CENTERLINE_CONFIG_DIR";

/// Smallest QR image size accepted, in pixels.
pub const QR_SIZE_MIN: u32 = 50;
/// Largest QR image size accepted, in pixels.
pub const QR_SIZE_MAX: u32 = 1000;

/// Every key accepted by [`Config::set`].
pub const KEYS: &[&str] = &[
    "storage.data_dir",
    "display.map_background",
    "display.sidebar_collapsed",
    "qr.public_base_url",
    "qr.size",
    "qr.service_url",
    "catalog.enforce_unique_ids",
];

/// Where the catalog is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory holding `points.json` and `layout.json`
    /// (defaults to `<config dir>/data`)
    pub data_dir: Option<PathBuf>,
}

/// Display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisplayConfig {
    /// Custom map background (URL or data URI); the built-in schematic when unset
    pub map_background: Option<String>,
    /// Whether the dashboard sidebar starts collapsed (served by `GET /api/v1/settings`)
    pub sidebar_collapsed: bool,
}

/// QR link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Base URL used for links when the dashboard runs on a local-only host
    pub public_base_url: Option<String>,
    /// QR image size in pixels
    pub size: u32,
    /// External QR image service
    pub service_url: String,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            public_base_url: None,
            size: DEFAULT_QR_SIZE,
            service_url: DEFAULT_QR_SERVICE.to_string(),
        }
    }
}

/// Catalog mutation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Reject points whose id is already in the catalog
    pub enforce_unique_ids: bool,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Centerline/config.toml`
/// - macOS: `~/Library/Application Support/Centerline/config.toml`
/// - Windows: `%APPDATA%\Centerline\config.toml`
///
/// # Validation
///
/// - `qr.size` must lie in [50, 1000]
/// - `qr.public_base_url` and `qr.service_url` must be http(s) URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage location
    pub storage: StorageConfig,
    /// Display preferences
    pub display: DisplayConfig,
    /// QR link settings
    pub qr: QrConfig,
    /// Catalog policy
    pub catalog: CatalogConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// `CENTERLINE_CONFIG_DIR` wins when set; otherwise the platform directory
    /// (`~/.config/Centerline/` on Linux).
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("Centerline");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file, or defaults if there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit file (temp file + rename).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(QR_SIZE_MIN..=QR_SIZE_MAX).contains(&self.qr.size) {
            anyhow::bail!(
                "qr.size must be between {QR_SIZE_MIN} and {QR_SIZE_MAX}, got {}",
                self.qr.size
            );
        }

        if let Some(url) = &self.qr.public_base_url {
            if !is_http_url(url) {
                anyhow::bail!("qr.public_base_url must start with http:// or https://, got '{url}'");
            }
        }

        if !is_http_url(&self.qr.service_url) {
            anyhow::bail!(
                "qr.service_url must start with http:// or https://, got '{}'",
                self.qr.service_url
            );
        }

        Ok(())
    }

    /// Resolves the data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("data")),
        }
    }

    /// Catalog policy derived from the `catalog` section.
    #[must_use]
    pub const fn catalog_policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            enforce_unique_ids: self.catalog.enforce_unique_ids,
        }
    }

    /// Sets a value by dotted key (see [`KEYS`]). An empty value clears an
    /// optional setting. The result is validated before it is kept.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        let value = value.trim();

        match key {
            "storage.data_dir" => updated.storage.data_dir = optional(value).map(PathBuf::from),
            "display.map_background" => updated.display.map_background = optional(value),
            "display.sidebar_collapsed" => updated.display.sidebar_collapsed = parse_bool(key, value)?,
            "qr.public_base_url" => {
                updated.qr.public_base_url =
                    optional(value).map(|url| url.trim_end_matches('/').to_string());
            }
            "qr.size" => {
                updated.qr.size = value
                    .parse()
                    .with_context(|| format!("{key} expects a whole number of pixels, got '{value}'"))?;
            }
            "qr.service_url" => {
                updated.qr.service_url = optional(value).unwrap_or_else(|| DEFAULT_QR_SERVICE.to_string());
            }
            "catalog.enforce_unique_ids" => {
                updated.catalog.enforce_unique_ids = parse_bool(key, value)?;
            }
            _ => anyhow::bail!("Unknown configuration key '{key}'. Valid keys: {}", KEYS.join(", ")),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => anyhow::bail!("{key} expects true or false, got '{value}'"),
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
