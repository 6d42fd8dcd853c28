//! Durable storage for the point and module collections.
//!
//! The catalog talks to storage only through [`CatalogRepository`], so the same
//! catalog logic runs against the JSON files on disk ([`FileRepository`]) or an
//! in-process store ([`MemoryRepository`]).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::models::{Module, Point};

/// File holding the serialized point collection.
pub const POINTS_FILE: &str = "points.json";
/// File holding the serialized module collection.
pub const LAYOUT_FILE: &str = "layout.json";

/// Failure reading or writing a stored collection.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file exists but could not be read.
    #[error("Failed to read {}", .path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The file could not be written.
    #[error("Failed to write {}", .path.display())]
    Write {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The stored JSON does not describe the expected collection.
    #[error("Malformed data in {}", .path.display())]
    Malformed {
        /// File that failed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
    /// The backing store refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Load/save access to the two stored collections.
///
/// `Ok(None)` from a load means nothing has been stored yet.
pub trait CatalogRepository: Send + Sync {
    /// Reads the stored points.
    fn load_points(&self) -> Result<Option<Vec<Point>>, StorageError>;
    /// Overwrites the stored points.
    fn save_points(&self, points: &[Point]) -> Result<(), StorageError>;
    /// Reads the stored modules.
    fn load_modules(&self) -> Result<Option<Vec<Module>>, StorageError>;
    /// Overwrites the stored modules.
    fn save_modules(&self, modules: &[Module]) -> Result<(), StorageError>;
}

/// Collections stored as pretty-printed JSON arrays in a data directory.
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    /// Creates a repository rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the point collection file.
    #[must_use]
    pub fn points_path(&self) -> PathBuf {
        self.dir.join(POINTS_FILE)
    }

    /// Path of the module collection file.
    #[must_use]
    pub fn layout_path(&self) -> PathBuf {
        self.dir.join(LAYOUT_FILE)
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let value = serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(value))
    }

    /// Writes via temp file + rename so a crash never leaves half a file behind.
    fn write<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let content = serde_json::to_string_pretty(value).map_err(|source| {
            StorageError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(write_err)?;
        fs::rename(&temp_path, path).map_err(write_err)?;

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl CatalogRepository for FileRepository {
    fn load_points(&self) -> Result<Option<Vec<Point>>, StorageError> {
        Self::read(&self.points_path())
    }

    fn save_points(&self, points: &[Point]) -> Result<(), StorageError> {
        self.write(&self.points_path(), points)
    }

    fn load_modules(&self) -> Result<Option<Vec<Module>>, StorageError> {
        Self::read(&self.layout_path())
    }

    fn save_modules(&self, modules: &[Module]) -> Result<(), StorageError> {
        self.write(&self.layout_path(), modules)
    }
}

/// In-process repository, used for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    points: Mutex<Option<Vec<Point>>>,
    modules: Mutex<Option<Vec<Module>>>,
    read_only: bool,
}

impl MemoryRepository {
    /// Creates an empty repository (nothing stored yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with stored collections.
    #[must_use]
    pub fn with_data(points: Vec<Point>, modules: Vec<Module>) -> Self {
        Self {
            points: Mutex::new(Some(points)),
            modules: Mutex::new(Some(modules)),
            read_only: false,
        }
    }

    /// Creates a repository whose writes always fail.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Snapshot of the stored points.
    #[must_use]
    pub fn stored_points(&self) -> Option<Vec<Point>> {
        self.points.lock().ok().and_then(|guard| guard.clone())
    }

    /// Snapshot of the stored modules.
    #[must_use]
    pub fn stored_modules(&self) -> Option<Vec<Module>> {
        self.modules.lock().ok().and_then(|guard| guard.clone())
    }

    fn store<T: Clone>(&self, slot: &Mutex<Option<Vec<T>>>, items: &[T]) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable("repository is read-only".to_string()));
        }
        let mut guard = slot
            .lock()
            .map_err(|_| StorageError::Unavailable("repository lock poisoned".to_string()))?;
        *guard = Some(items.to_vec());
        Ok(())
    }
}

impl CatalogRepository for MemoryRepository {
    fn load_points(&self) -> Result<Option<Vec<Point>>, StorageError> {
        Ok(self.stored_points())
    }

    fn save_points(&self, points: &[Point]) -> Result<(), StorageError> {
        self.store(&self.points, points)
    }

    fn load_modules(&self) -> Result<Option<Vec<Module>>, StorageError> {
        Ok(self.stored_modules())
    }

    fn save_modules(&self, modules: &[Module]) -> Result<(), StorageError> {
        self.store(&self.modules, modules)
    }
}
