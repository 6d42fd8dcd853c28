//! Data models for checkpoints and schematic layout.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of storage, rendering and the command line.

pub mod draft;
pub mod layout;
pub mod point;

// Re-export all model types
pub use draft::{FieldError, PointDraft, ValidationErrors};
pub use layout::{Module, ModuleColor};
pub use point::{Coordinates, Criticality, Point, Status, Zone};
