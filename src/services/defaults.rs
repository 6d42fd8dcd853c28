//! Built-in dataset used when nothing usable is stored.

use crate::models::{Coordinates, Criticality, Module, ModuleColor, Point, Status, Zone};

#[allow(clippy::too_many_arguments)]
fn point(
    number: u32,
    name: &str,
    zone: Zone,
    target_value: &str,
    tolerance: &str,
    measure_method: &str,
    criticality: Criticality,
    at: (f64, f64),
    phase_angle: Option<f64>,
) -> Point {
    Point {
        id: Point::id_for_number(number),
        number,
        name: name.to_string(),
        zone,
        description: String::new(),
        target_value: target_value.to_string(),
        tolerance: tolerance.to_string(),
        measure_method: measure_method.to_string(),
        criticality,
        status: Status::Ok,
        last_checked: None,
        primary_image: None,
        secondary_image: None,
        coordinates: Some(Coordinates::new(at.0, at.1)),
        visible_on_map: true,
        phase_angle,
    }
}

/// Reference checkpoints of a shrink-wrap tray packer.
#[must_use]
pub fn default_points() -> Vec<Point> {
    use Criticality::{Critical, High, Low, Medium};

    #[rustfmt::skip]
    let mut points = vec![
        point(1, "Infeed conveyor speed", Zone::Infeed, "42 m/min", "± 2 m/min", "Tachometer on return roller", Medium, (7.0, 55.0), None),
        point(2, "Infeed guide width", Zone::Infeed, "Container Ø + 4 mm", "± 1 mm", "Caliper between guide faces", High, (11.0, 42.0), None),
        point(3, "Lane divider pitch", Zone::Separation, "68 mm", "± 0.5 mm", "Gauge block between divider fingers", High, (22.0, 50.0), Some(45.0)),
        point(4, "Separator finger timing", Zone::Separation, "Finger tip on container centre", "± 3°", "Jog to 90°, check timing mark", Critical, (26.0, 36.0), Some(90.0)),
        point(5, "Side rail height", Zone::Guides, "55 mm above belt", "± 2 mm", "Height gauge from belt surface", Medium, (36.0, 62.0), None),
        point(6, "Overhead guide clearance", Zone::Guides, "Product height + 5 mm", "± 1 mm", "Feeler gauge under guide", Low, (39.0, 30.0), None),
        point(7, "Blank magazine stop", Zone::Cardboard, "Blank length + 2 mm", "± 1 mm", "Ruler from magazine back plate", High, (49.0, 18.0), Some(180.0)),
        point(8, "Blank pick-up vacuum", Zone::Cardboard, "-0.6 bar", "± 0.05 bar", "Gauge on suction cup manifold", Critical, (53.0, 28.0), Some(200.0)),
        point(9, "Flap folder cam", Zone::Forming, "Cam lobe at 270°", "± 2°", "Dial indicator on cam follower", Critical, (61.0, 44.0), Some(270.0)),
        point(10, "Glue gun distance", Zone::Forming, "10 mm from blank", "± 1 mm", "Feeler gauge to blank surface", Medium, (65.0, 56.0), Some(275.0)),
        point(11, "Film cut knife timing", Zone::ShrinkFilm, "Cut at 320°", "± 2°", "Strobe on knife at production speed", Critical, (75.0, 40.0), Some(320.0)),
        point(12, "Shrink tunnel temperature", Zone::ShrinkFilm, "185 °C", "± 5 °C", "Thermocouple at tunnel centre", High, (81.0, 50.0), None),
        point(13, "Outfeed belt tracking", Zone::Discharge, "Belt centred on frame", "± 3 mm", "Ruler from frame edge", Low, (93.0, 55.0), None),
    ];

    points[5].description = "Only adjusted on format change; hidden from the map.".to_string();
    points[5].visible_on_map = false;
    points[8].description = "Out of time, the folder hits the incoming blank.".to_string();
    points[10].description = "Must not overlap the film clamp window.".to_string();

    points
}

/// Editable schematic modules, one per machine section.
#[must_use]
pub fn default_modules() -> Vec<Module> {
    let section = |id: &str, label: &str, x: f64, width: f64, color: ModuleColor| Module {
        color: color.token().to_string(),
        has_fill: true,
        wrap_text: true,
        ..Module::new(id, label, x, 25.0, width, 50.0)
    };

    vec![
        section("mod-infeed", "Infeed conveyor", 1.0, 15.0, ModuleColor::Slate),
        section("mod-separation", "Lane separator", 17.0, 13.0, ModuleColor::Blue),
        section("mod-guides", "Guide section", 31.0, 12.0, ModuleColor::Slate),
        section("mod-cardboard", "Blank magazine", 44.0, 13.0, ModuleColor::Amber),
        section("mod-forming", "Forming station", 58.0, 12.0, ModuleColor::Emerald),
        section("mod-shrink", "Wrapper & tunnel", 71.0, 16.0, ModuleColor::Rose),
        section("mod-discharge", "Outfeed", 88.0, 11.0, ModuleColor::Violet),
    ]
}
