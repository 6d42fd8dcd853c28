//! CLI command handlers for Centerline.
//!
//! This module provides headless, scriptable access to the point catalog, the
//! layout, the map and phasing views and the QR links, for operators and for
//! automation.

pub mod common;
pub mod config;
pub mod map;
pub mod module;
pub mod phasing;
pub mod point;
pub mod qr;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use map::MapArgs;
pub use module::ModuleArgs;
pub use phasing::PhasingArgs;
pub use point::PointArgs;
pub use qr::QrArgs;
