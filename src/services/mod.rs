//! Service layer for business logic.
//!
//! This module contains the catalog that owns the point and module collections,
//! the storage it writes through, and the built-in dataset it falls back to.

pub mod catalog;
pub mod defaults;
pub mod storage;

// Re-export commonly used types and functions
pub use catalog::{next_number, Catalog, CatalogError, CatalogPolicy, Origin, PointFilter};
pub use storage::{CatalogRepository, FileRepository, MemoryRepository, StorageError};
