//! SVG rendering of the map, the phasing dial and the module layout.
//!
//! Every renderer takes a [`RenderMode`]. Print mode is the same data path with
//! the interactive chrome removed and a black-on-white palette.

pub mod dial_renderer;
pub mod layout_renderer;
pub mod map_renderer;
pub mod svg;

pub use dial_renderer::render_dial;
pub use layout_renderer::render_layout;
pub use map_renderer::render_map;

use crate::models::Status;

/// Presentation mode of a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// On-screen view with hover classes, `data-` hooks and selection halo
    #[default]
    Interactive,
    /// High-contrast static output for paper
    Print,
}

impl RenderMode {
    /// Picks the mode from a `--print` style flag.
    #[must_use]
    pub const fn from_print_flag(print: bool) -> Self {
        if print {
            Self::Print
        } else {
            Self::Interactive
        }
    }

    /// Whether interactive chrome is drawn.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

/// Ink used for everything in print mode.
pub const PRINT_INK: &str = "#000000";
/// Paper colour in print mode.
pub const PRINT_PAPER: &str = "#FFFFFF";
/// Warning colour for near-angle dial markers.
pub const WARNING_COLOR: &str = "#F97316";

/// On-screen marker fill for a status tag.
#[must_use]
pub const fn status_color(status: Status) -> &'static str {
    match status {
        Status::Ok => "#10B981",
        Status::TaggedYellow => "#EAB308",
        Status::TaggedRed => "#EF4444",
    }
}
