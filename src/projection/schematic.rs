//! Static fallback schematic of the production line.
//!
//! Drawn when no custom map background is configured. It is fixed data and does
//! not read the module catalog.

use crate::models::Zone;

/// One labelled zone of the fallback schematic, geometry in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchematicRegion {
    /// Zone the region depicts
    pub zone: Zone,
    /// Static label
    pub label: &'static str,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

const fn region(zone: Zone, label: &'static str, x: f64, width: f64) -> SchematicRegion {
    SchematicRegion {
        zone,
        label,
        x,
        y: 20.0,
        width,
        height: 60.0,
    }
}

/// The seven line sections, infeed on the left.
pub const DEFAULT_SCHEMATIC: [SchematicRegion; 7] = [
    region(Zone::Infeed, "INFEED", 0.0, 16.0),
    region(Zone::Separation, "SEPARATION", 16.0, 14.0),
    region(Zone::Guides, "GUIDES", 30.0, 14.0),
    region(Zone::Cardboard, "CARDBOARD", 44.0, 13.0),
    region(Zone::Forming, "FORMING", 57.0, 13.0),
    region(Zone::ShrinkFilm, "SHRINK FILM", 70.0, 18.0),
    region(Zone::Discharge, "DISCHARGE", 88.0, 12.0),
];
