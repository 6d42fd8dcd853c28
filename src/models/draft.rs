//! Partially-filled point records, validated at commit time.
//!
//! A [`PointDraft`] mirrors the add/edit form: every field is optional while the
//! operator is typing, and [`PointDraft::commit`] either yields a complete
//! [`Point`] or reports every problem at once.

use std::fmt;

use crate::models::point::{
    Coordinates, Criticality, Point, Status, Zone, COORDINATE_MAX, COORDINATE_MIN,
    PHASE_ANGLE_MAX,
};

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Storage name of the field (e.g. "targetValue")
    pub field: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every validation failure of a draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid point: {}", join_errors(.errors))]
pub struct ValidationErrors {
    /// Failures in field order
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Whether a given field was rejected.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Form state for creating or editing a point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointDraft {
    /// Explicit id; derived from the number when unset
    pub id: Option<String>,
    /// Explicit number; the suggested next number is used when unset
    pub number: Option<u32>,
    /// Display name
    pub name: Option<String>,
    /// Line section
    pub zone: Option<Zone>,
    /// Free-text description
    pub description: Option<String>,
    /// Calibration target
    pub target_value: Option<String>,
    /// Accepted deviation
    pub tolerance: Option<String>,
    /// Verification method
    pub measure_method: Option<String>,
    /// Severity ranking
    pub criticality: Option<Criticality>,
    /// Primary photo reference
    pub primary_image: Option<String>,
    /// Secondary photo reference
    pub secondary_image: Option<String>,
    /// Map position in percent
    pub coordinates: Option<Coordinates>,
    /// Map visibility (defaults to visible)
    pub visible_on_map: Option<bool>,
    /// Cycle position in degrees
    pub phase_angle: Option<f64>,
    status: Status,
    last_checked: Option<chrono::DateTime<chrono::Utc>>,
}

impl PointDraft {
    /// Starts an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a draft from an existing record (the edit form).
    ///
    /// Status and `last_checked` are carried over untouched; the draft has no
    /// setter for them.
    #[must_use]
    pub fn from_point(point: &Point) -> Self {
        Self {
            id: Some(point.id.clone()),
            number: Some(point.number),
            name: Some(point.name.clone()),
            zone: Some(point.zone),
            description: Some(point.description.clone()),
            target_value: Some(point.target_value.clone()),
            tolerance: Some(point.tolerance.clone()),
            measure_method: Some(point.measure_method.clone()),
            criticality: Some(point.criticality),
            primary_image: point.primary_image.clone(),
            secondary_image: point.secondary_image.clone(),
            coordinates: point.coordinates,
            visible_on_map: Some(point.visible_on_map),
            phase_angle: point.phase_angle,
            status: point.status,
            last_checked: point.last_checked,
        }
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the zone.
    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets target value, tolerance and measuring method together.
    pub fn standard(
        mut self,
        target_value: impl Into<String>,
        tolerance: impl Into<String>,
        measure_method: impl Into<String>,
    ) -> Self {
        self.target_value = Some(target_value.into());
        self.tolerance = Some(tolerance.into());
        self.measure_method = Some(measure_method.into());
        self
    }

    /// Sets the criticality.
    pub fn criticality(mut self, criticality: Criticality) -> Self {
        self.criticality = Some(criticality);
        self
    }

    /// Places the point on the map.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some(Coordinates::new(x, y));
        self
    }

    /// Sets map visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible_on_map = Some(visible);
        self
    }

    /// Sets the phase angle.
    pub fn phase(mut self, angle: f64) -> Self {
        self.phase_angle = Some(angle);
        self
    }

    /// Sets an explicit display number.
    pub fn number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    /// Validates the draft and produces a complete record.
    ///
    /// `suggested_number` fills in a missing number (see
    /// [`Catalog::next_number`](crate::services::Catalog::next_number)); a missing
    /// id is derived from the resulting number.
    pub fn commit(self, suggested_number: u32) -> Result<Point, ValidationErrors> {
        let mut errors = Vec::new();

        let name = required_text(&mut errors, "name", self.name);
        let target_value = required_text(&mut errors, "targetValue", self.target_value);
        let tolerance = required_text(&mut errors, "tolerance", self.tolerance);
        let measure_method = required_text(&mut errors, "measureMethod", self.measure_method);

        let zone = required(&mut errors, "zone", self.zone);
        let criticality = required(&mut errors, "criticality", self.criticality);

        let visible_on_map = self.visible_on_map.unwrap_or(true);
        match self.coordinates {
            Some(coords) if !coords.in_bounds() => errors.push(field_error(
                "coordinates",
                format!(
                    "({}, {}) must lie within [{COORDINATE_MIN}, {COORDINATE_MAX}]",
                    coords.x, coords.y
                ),
            )),
            None if visible_on_map => errors.push(field_error(
                "coordinates",
                "are required when the point is visible on the map",
            )),
            _ => {}
        }

        if let Some(angle) = self.phase_angle {
            if !(0.0..PHASE_ANGLE_MAX).contains(&angle) {
                errors.push(field_error(
                    "phaseAngle",
                    format!("{angle} must lie within [0, {PHASE_ANGLE_MAX})"),
                ));
            }
        }

        let id = match self.id.map(|s| s.trim().to_string()) {
            Some(id) if id.is_empty() => {
                errors.push(field_error("id", "cannot be blank"));
                None
            }
            other => other,
        };

        let (
            true,
            Some(name),
            Some(zone),
            Some(target_value),
            Some(tolerance),
            Some(measure_method),
            Some(criticality),
        ) = (
            errors.is_empty(),
            name,
            zone,
            target_value,
            tolerance,
            measure_method,
            criticality,
        )
        else {
            return Err(ValidationErrors { errors });
        };

        let number = self.number.unwrap_or(suggested_number);
        Ok(Point {
            id: id.unwrap_or_else(|| Point::id_for_number(number)),
            number,
            name,
            zone,
            description: self.description.unwrap_or_default(),
            target_value,
            tolerance,
            measure_method,
            criticality,
            status: self.status,
            last_checked: self.last_checked,
            primary_image: non_blank(self.primary_image),
            secondary_image: non_blank(self.secondary_image),
            coordinates: self.coordinates,
            visible_on_map,
            phase_angle: self.phase_angle,
        })
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn field_error(field: &'static str, message: impl Into<String>) -> FieldError {
    FieldError {
        field,
        message: message.into(),
    }
}

fn required<T>(errors: &mut Vec<FieldError>, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.push(field_error(field, "is required"));
    }
    value
}

fn required_text(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    required(errors, field, value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
