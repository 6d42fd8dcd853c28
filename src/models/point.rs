//! Calibration checkpoint records and their closed enumerations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound of a map coordinate, in percent of the surface.
pub const COORDINATE_MIN: f64 = 0.0;
/// Upper bound of a map coordinate, in percent of the surface.
pub const COORDINATE_MAX: f64 = 100.0;
/// Exclusive upper bound of a phase angle, in degrees.
pub const PHASE_ANGLE_MAX: f64 = 360.0;

/// Section of the production line a checkpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    /// Product infeed conveyor
    Infeed,
    /// Lane separation and grouping
    Separation,
    /// Side guides and rails
    Guides,
    /// Cardboard blank magazine and feed
    Cardboard,
    /// Tray/case forming station
    Forming,
    /// Shrink film wrapping and tunnel
    #[serde(rename = "Shrink-Film")]
    ShrinkFilm,
    /// Outfeed discharge
    Discharge,
}

impl Zone {
    /// All zones in line order, from infeed to discharge.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Infeed,
            Self::Separation,
            Self::Guides,
            Self::Cardboard,
            Self::Forming,
            Self::ShrinkFilm,
            Self::Discharge,
        ]
    }

    /// Storage and display token (e.g. `"Shrink-Film"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Infeed => "Infeed",
            Self::Separation => "Separation",
            Self::Guides => "Guides",
            Self::Cardboard => "Cardboard",
            Self::Forming => "Forming",
            Self::ShrinkFilm => "Shrink-Film",
            Self::Discharge => "Discharge",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = String;

    /// Parses a zone token, case-insensitive, accepting `shrinkfilm` and
    /// `shrink_film` as spellings of `Shrink-Film`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "infeed" => Ok(Self::Infeed),
            "separation" => Ok(Self::Separation),
            "guides" => Ok(Self::Guides),
            "cardboard" => Ok(Self::Cardboard),
            "forming" => Ok(Self::Forming),
            "shrinkfilm" => Ok(Self::ShrinkFilm),
            "discharge" => Ok(Self::Discharge),
            _ => Err(format!("Unknown zone '{s}'")),
        }
    }
}

/// Severity ranking of a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criticality {
    /// Cosmetic drift
    Low,
    /// Affects quality over time
    Medium,
    /// Affects throughput
    High,
    /// Drift risks equipment damage; stop the line
    Critical,
}

impl Criticality {
    /// All criticality levels, least to most severe.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    /// Storage and display token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Whether a deviation on this checkpoint means stopping the line.
    #[must_use]
    pub const fn stops_line(self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criticality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown criticality '{s}'")),
        }
    }
}

/// Operator-set deviation tag, independent of criticality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Within standard
    #[default]
    #[serde(rename = "OK")]
    Ok,
    /// Minor deviation flagged
    TaggedYellow,
    /// Major deviation flagged
    TaggedRed,
}

impl Status {
    /// All statuses.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Ok, Self::TaggedYellow, Self::TaggedRed]
    }

    /// Storage and display token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::TaggedYellow => "TaggedYellow",
            Self::TaggedRed => "TaggedRed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    /// Accepts the storage tokens plus the operator shorthands `yellow` and `red`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "yellow" | "taggedyellow" | "tagged-yellow" => Ok(Self::TaggedYellow),
            "red" | "taggedred" | "tagged-red" => Ok(Self::TaggedRed),
            _ => Err(format!("Unknown status '{s}' (expected ok, yellow or red)")),
        }
    }
}

/// Position on the map surface, in percent of width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Horizontal position (0 = left edge, 100 = right edge)
    pub x: f64,
    /// Vertical position (0 = top edge, 100 = bottom edge)
    pub y: f64,
}

impl Coordinates {
    /// Creates coordinates without range checking.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components lie within [0, 100].
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        (COORDINATE_MIN..=COORDINATE_MAX).contains(&self.x)
            && (COORDINATE_MIN..=COORDINATE_MAX).contains(&self.y)
    }

    /// Clamps both components into [0, 100].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(COORDINATE_MIN, COORDINATE_MAX),
            y: self.y.clamp(COORDINATE_MIN, COORDINATE_MAX),
        }
    }
}

const fn default_visible() -> bool {
    true
}

/// A single machine-calibration checkpoint.
///
/// # Validation
///
/// Records built through [`PointDraft`](crate::models::PointDraft) satisfy:
///
/// - `name`, `target_value`, `tolerance`, `measure_method` are non-blank
/// - `coordinates` is present and within [0, 100] when `visible_on_map` is true
/// - `phase_angle`, when present, lies in [0, 360)
///
/// Records read back from storage are accepted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Stable identifier, also the deep-link payload (e.g. "P-01")
    pub id: String,
    /// Display and sort index
    pub number: u32,
    /// Display name
    pub name: String,
    /// Line section
    pub zone: Zone,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Calibration target, free text (e.g. "125 mm")
    pub target_value: String,
    /// Accepted deviation, free text (e.g. "± 2 mm")
    pub tolerance: String,
    /// How to verify the setting
    pub measure_method: String,
    /// Severity ranking
    pub criticality: Criticality,
    /// Operator deviation tag
    #[serde(default)]
    pub status: Status,
    /// When the status was last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
    /// Primary photo (URL or data URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<String>,
    /// Secondary photo (URL or data URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_image: Option<String>,
    /// Map position in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Whether the point gets a map marker
    #[serde(default = "default_visible")]
    pub visible_on_map: bool,
    /// Position in the machine cycle, degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_angle: Option<f64>,
}

impl Point {
    /// Derives the conventional identifier for a display number ("P-07", "P-112").
    #[must_use]
    pub fn id_for_number(number: u32) -> String {
        format!("P-{number:02}")
    }

    /// Map position if the point is shown on the map.
    #[must_use]
    pub fn map_position(&self) -> Option<Coordinates> {
        if self.visible_on_map {
            self.coordinates
        } else {
            None
        }
    }

    /// Whether the point takes part in the phasing dial.
    #[must_use]
    pub const fn is_phased(&self) -> bool {
        self.phase_angle.is_some()
    }

    /// Sets the status tag and stamps `last_checked`, leaving every other field untouched.
    pub fn tag(&mut self, status: Status, at: DateTime<Utc>) {
        self.status = status;
        self.last_checked = Some(at);
    }
}
