//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and version information.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Centerline";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "centerline";

/// Crate version reported by `--version` and `/health`.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
