//! Spatial projections of the point catalog.
//!
//! - [`map`] places points on the schematic by percentage coordinates.
//! - [`phase`] places points on the 360° machine-cycle dial.
//! - [`schematic`] is the hardcoded background used when no image is configured.
//!
//! Projectors borrow the catalog and never mutate it.

pub mod map;
pub mod phase;
pub mod schematic;

pub use map::{MapBackground, MapMarker, MapProjector, MarkerRole};
pub use phase::{angle_to_position, is_near, Dial, DialMarker, PhaseProjector, SimulatedAngle};
pub use schematic::{SchematicRegion, DEFAULT_SCHEMATIC};

/// A position on a rendering surface, in surface units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl SurfacePoint {
    /// Creates a surface point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Width in surface units
    pub width: f64,
    /// Height in surface units
    pub height: f64,
}

impl Surface {
    /// Creates a surface.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Converts a percentage position into surface units.
    #[must_use]
    pub fn place(&self, percent_x: f64, percent_y: f64) -> SurfacePoint {
        SurfacePoint::new(
            percent_x * self.width / 100.0,
            percent_y * self.height / 100.0,
        )
    }
}
