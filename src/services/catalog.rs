//! The in-memory point and module catalogs.
//!
//! [`Catalog`] is the single owner of both collections for a session. It reads
//! storage once when opened and writes the whole affected collection back after
//! every mutation. Projectors and renderers only ever borrow from it.

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::models::{Criticality, Module, Point, Status, Zone};
use crate::services::defaults;
use crate::services::storage::{CatalogRepository, StorageError};

/// Rejected catalog operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No point has the given id.
    #[error("Point '{0}' not found")]
    PointNotFound(String),
    /// A point with the id already exists and uniqueness is enforced.
    #[error("A point with id '{0}' already exists")]
    DuplicatePointId(String),
    /// A module with the id already exists and uniqueness is enforced.
    #[error("A module with id '{0}' already exists")]
    DuplicateModuleId(String),
}

/// Invariants the catalog enforces on insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogPolicy {
    /// Reject points and modules whose id is already present.
    pub enforce_unique_ids: bool,
}

/// Where the catalog contents came from when it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read from the repository.
    Stored,
    /// Nothing was stored; the built-in dataset was used.
    Defaults,
    /// Stored data was unreadable; the built-in dataset was used.
    Recovered,
}

/// Returns the number the add form suggests: one past the highest, or 1.
#[must_use]
pub fn next_number(points: &[Point]) -> u32 {
    points
        .iter()
        .map(|p| p.number)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Criteria for the tabular point listing.
#[derive(Debug, Clone, Default)]
pub struct PointFilter {
    /// Only points in this zone
    pub zone: Option<Zone>,
    /// Only points of this criticality
    pub criticality: Option<Criticality>,
    /// Only points with this status tag
    pub status: Option<Status>,
    /// Only points whose id, name or description match
    pub search: Option<Regex>,
}

impl PointFilter {
    /// Whether a point passes every criterion.
    #[must_use]
    pub fn matches(&self, point: &Point) -> bool {
        self.zone.is_none_or(|z| point.zone == z)
            && self.criticality.is_none_or(|c| point.criticality == c)
            && self.status.is_none_or(|s| point.status == s)
            && self.search.as_ref().is_none_or(|re| {
                re.is_match(&point.id) || re.is_match(&point.name) || re.is_match(&point.description)
            })
    }
}

/// Session-owned point and module collections with write-through storage.
pub struct Catalog<R: CatalogRepository> {
    points: Vec<Point>,
    modules: Vec<Module>,
    repository: R,
    policy: CatalogPolicy,
    points_origin: Origin,
    modules_origin: Origin,
}

impl<R: CatalogRepository> Catalog<R> {
    /// Loads both collections from `repository`.
    ///
    /// Missing or unreadable data is replaced by the built-in dataset. The
    /// fallback is logged and reported through [`Catalog::points_origin`] and
    /// [`Catalog::modules_origin`]; it is never an error.
    pub fn open(repository: R, policy: CatalogPolicy) -> Self {
        let (points, points_origin) =
            degrade_to_defaults("points", repository.load_points(), defaults::default_points);
        let (modules, modules_origin) =
            degrade_to_defaults("layout", repository.load_modules(), defaults::default_modules);

        info!(
            points = points.len(),
            modules = modules.len(),
            "Catalog opened"
        );

        Self {
            points,
            modules,
            repository,
            policy,
            points_origin,
            modules_origin,
        }
    }

    /// All points in storage order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// All modules in storage order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// How the point collection was obtained.
    #[must_use]
    pub const fn points_origin(&self) -> Origin {
        self.points_origin
    }

    /// How the module collection was obtained.
    #[must_use]
    pub const fn modules_origin(&self) -> Origin {
        self.modules_origin
    }

    /// The backing repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Looks a point up by id.
    #[must_use]
    pub fn point(&self, id: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Looks a module up by id.
    #[must_use]
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Suggested number for the next new point.
    #[must_use]
    pub fn next_number(&self) -> u32 {
        next_number(&self.points)
    }

    /// Points passing `filter`, ordered by number (the table view).
    #[must_use]
    pub fn table(&self, filter: &PointFilter) -> Vec<&Point> {
        let mut rows: Vec<&Point> = self.points.iter().filter(|p| filter.matches(p)).collect();
        rows.sort_by_key(|p| p.number);
        rows
    }

    /// Appends a point.
    ///
    /// Ids and numbers are the caller's responsibility unless the policy enforces
    /// unique ids.
    pub fn add_point(&mut self, point: Point) -> Result<(), CatalogError> {
        if self.policy.enforce_unique_ids && self.point(&point.id).is_some() {
            return Err(CatalogError::DuplicatePointId(point.id));
        }

        debug!(id = %point.id, "Adding point");
        self.points.push(point);
        self.persist_points();
        Ok(())
    }

    /// Replaces the point with the same id wholesale.
    ///
    /// Returns `false` and leaves the collection untouched when no point matches.
    pub fn replace_point(&mut self, point: Point) -> bool {
        let Some(slot) = self.points.iter_mut().find(|p| p.id == point.id) else {
            debug!(id = %point.id, "Replace ignored, no such point");
            return false;
        };

        *slot = point;
        self.persist_points();
        true
    }

    /// Tags a point with `status`, stamping `last_checked` with the current time.
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<&Point, CatalogError> {
        self.set_status_at(id, status, Utc::now())
    }

    /// Tags a point with `status`, stamping `last_checked` with `at`.
    ///
    /// Only `status` and `last_checked` change.
    pub fn set_status_at(
        &mut self,
        id: &str,
        status: Status,
        at: DateTime<Utc>,
    ) -> Result<&Point, CatalogError> {
        let index = self
            .points
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::PointNotFound(id.to_string()))?;

        self.points[index].tag(status, at);
        info!(id, %status, "Status changed");
        self.persist_points();
        Ok(&self.points[index])
    }

    /// Appends a module.
    pub fn add_module(&mut self, module: Module) -> Result<(), CatalogError> {
        if self.policy.enforce_unique_ids && self.module(&module.id).is_some() {
            return Err(CatalogError::DuplicateModuleId(module.id));
        }

        self.modules.push(module);
        self.persist_modules();
        Ok(())
    }

    /// Replaces the module with the same id; `false` when none matches.
    pub fn update_module(&mut self, module: Module) -> bool {
        let Some(slot) = self.modules.iter_mut().find(|m| m.id == module.id) else {
            return false;
        };

        *slot = module;
        self.persist_modules();
        true
    }

    /// Removes every module with `id`; `false` when none matched.
    pub fn delete_module(&mut self, id: &str) -> bool {
        let before = self.modules.len();
        self.modules.retain(|m| m.id != id);
        if self.modules.len() == before {
            return false;
        }

        self.persist_modules();
        true
    }

    fn persist_points(&self) {
        if let Err(e) = self.repository.save_points(&self.points) {
            warn!(error = %e, "Point catalog not persisted; changes are kept in memory only");
        }
    }

    fn persist_modules(&self) {
        if let Err(e) = self.repository.save_modules(&self.modules) {
            warn!(error = %e, "Layout catalog not persisted; changes are kept in memory only");
        }
    }
}

fn degrade_to_defaults<T>(
    what: &str,
    loaded: Result<Option<Vec<T>>, StorageError>,
    defaults: fn() -> Vec<T>,
) -> (Vec<T>, Origin) {
    match loaded {
        Ok(Some(items)) => (items, Origin::Stored),
        Ok(None) => {
            info!("No stored {what}, using built-in defaults");
            (defaults(), Origin::Defaults)
        }
        Err(e) => {
            warn!(error = %e, "Stored {what} unreadable, falling back to built-in defaults");
            (defaults(), Origin::Recovered)
        }
    }
}
