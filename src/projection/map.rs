//! Placement of points on the schematic map.

use crate::models::{Coordinates, Point};
use crate::projection::{Surface, SurfacePoint};

/// Drawing role of a marker. Variants are in paint order: later roles are
/// drawn on top of earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MarkerRole {
    /// Ordinary catalog point
    Normal,
    /// In-progress edit, not part of the catalog
    Preview,
    /// The point the caller marked as selected
    Selected,
}

/// A point placed on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMarker<'a> {
    /// The projected record
    pub point: &'a Point,
    /// Marker centre in percent of the surface
    pub position: Coordinates,
    /// Drawing role
    pub role: MarkerRole,
}

impl MapMarker<'_> {
    /// Marker centre on a concrete surface.
    #[must_use]
    pub fn on(&self, surface: Surface) -> SurfacePoint {
        surface.place(self.position.x, self.position.y)
    }
}

/// What the map is drawn over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapBackground {
    /// Operator-supplied image (URL or data URI)
    Image(String),
    /// The built-in seven-zone schematic
    DefaultSchematic,
}

impl MapBackground {
    /// Picks the background from the configured image reference; blank means none.
    #[must_use]
    pub fn from_setting(image: Option<&str>) -> Self {
        match image.map(str::trim) {
            Some(reference) if !reference.is_empty() => Self::Image(reference.to_string()),
            _ => Self::DefaultSchematic,
        }
    }
}

/// Projects a point collection onto the map.
///
/// Only points visible on the map with coordinates get a marker. The caller
/// owns selection; the projector just styles the selected id.
#[derive(Debug, Clone, Copy)]
pub struct MapProjector<'a> {
    points: &'a [Point],
    selected: Option<&'a str>,
    preview: Option<&'a Point>,
}

impl<'a> MapProjector<'a> {
    /// Creates a projector over `points`.
    #[must_use]
    pub const fn new(points: &'a [Point]) -> Self {
        Self {
            points,
            selected: None,
            preview: None,
        }
    }

    /// Styles the point with this id as selected.
    #[must_use]
    pub const fn with_selected(mut self, id: Option<&'a str>) -> Self {
        self.selected = id;
        self
    }

    /// Adds a synthetic preview point.
    ///
    /// When it shares an id with a catalog point, that catalog marker is hidden
    /// so the edit is shown in place.
    #[must_use]
    pub const fn with_preview(mut self, preview: Option<&'a Point>) -> Self {
        self.preview = preview;
        self
    }

    /// Markers in paint order (normal, then preview, then selected).
    #[must_use]
    pub fn markers(&self) -> Vec<MapMarker<'a>> {
        let preview_id = self.preview.map(|p| p.id.as_str());

        let mut markers: Vec<MapMarker<'a>> = self
            .points
            .iter()
            .filter(|p| Some(p.id.as_str()) != preview_id)
            .filter_map(|point| {
                let position = point.map_position()?;
                let role = if self.selected == Some(point.id.as_str()) {
                    MarkerRole::Selected
                } else {
                    MarkerRole::Normal
                };
                Some(MapMarker {
                    point,
                    position,
                    role,
                })
            })
            .collect();

        if let Some(point) = self.preview {
            if let Some(position) = point.coordinates {
                markers.push(MapMarker {
                    point,
                    position,
                    role: MarkerRole::Preview,
                });
            }
        }

        // Stable: storage order is kept within a role.
        markers.sort_by_key(|m| m.role);
        markers
    }

    /// Returns the topmost selectable point whose marker lies within `radius`
    /// of `at`. Preview markers are never hit.
    #[must_use]
    pub fn hit_test(&self, surface: Surface, at: SurfacePoint, radius: f64) -> Option<&'a Point> {
        self.markers()
            .iter()
            .rev()
            .filter(|m| m.role != MarkerRole::Preview)
            .find(|m| m.on(surface).distance_to(at) <= radius)
            .map(|m| m.point)
    }
}
