//! Labelled rectangular regions composing the editable schematic.

use serde::{Deserialize, Serialize};

/// Default font size of a module label, in percent of the canvas.
pub const DEFAULT_FONT_SIZE: f64 = 2.0;

const fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

/// A labelled rectangle on the schematic background.
///
/// Geometry is in percent of the canvas. Overlapping and out-of-bounds modules
/// are allowed; `x + width <= 100` is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Unique identifier
    pub id: String,
    /// Display text
    pub label: String,
    /// Left edge, percent
    pub x: f64,
    /// Top edge, percent
    pub y: f64,
    /// Width, percent
    pub width: f64,
    /// Height, percent
    pub height: f64,
    /// Fill the rectangle with its colour instead of outlining it
    #[serde(default)]
    pub has_fill: bool,
    /// Wrap the label inside the rectangle
    #[serde(default)]
    pub wrap_text: bool,
    /// Label size, percent
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Palette token (see [`ModuleColor`]) or any CSS colour string
    pub color: String,
}

impl Module {
    /// Creates a module with default rendering hints.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x,
            y,
            width,
            height,
            has_fill: false,
            wrap_text: false,
            font_size: DEFAULT_FONT_SIZE,
            color: ModuleColor::Slate.token().to_string(),
        }
    }

    /// Generates a fresh module id.
    #[must_use]
    pub fn generate_id() -> String {
        format!("mod-{}", uuid::Uuid::new_v4().simple())
    }

    /// Resolves the colour to something a renderer can paint.
    #[must_use]
    pub fn paint(&self) -> String {
        ModuleColor::from_token(&self.color)
            .map_or_else(|| self.color.clone(), |c| c.hex().to_string())
    }
}

/// The fixed colour palette offered by the layout editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleColor {
    /// Neutral grey-blue
    Slate,
    /// Blue
    Blue,
    /// Green
    Emerald,
    /// Yellow
    Amber,
    /// Red
    Rose,
    /// Purple
    Violet,
}

impl ModuleColor {
    /// Every palette entry.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Slate,
            Self::Blue,
            Self::Emerald,
            Self::Amber,
            Self::Rose,
            Self::Violet,
        ]
    }

    /// Token stored in [`Module::color`].
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Slate => "slate",
            Self::Blue => "blue",
            Self::Emerald => "emerald",
            Self::Amber => "amber",
            Self::Rose => "rose",
            Self::Violet => "violet",
        }
    }

    /// Hex value painted for the token.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Slate => "#64748B",
            Self::Blue => "#3B82F6",
            Self::Emerald => "#10B981",
            Self::Amber => "#F59E0B",
            Self::Rose => "#F43F5E",
            Self::Violet => "#8B5CF6",
        }
    }

    /// Looks a palette token up, case-insensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.token().eq_ignore_ascii_case(token))
    }
}
