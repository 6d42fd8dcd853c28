//! SVG rendering of the phasing dial.

use std::fmt::Write as _;

use serde::Serialize;

use crate::export::svg::{self, num};
use crate::export::{RenderMode, PRINT_INK, PRINT_PAPER, WARNING_COLOR};
use crate::projection::{angle_to_position, Dial, DialMarker, PhaseProjector};

/// Side of the square dial drawing.
pub const DIAL_SIZE: f64 = 400.0;
/// Radius of the ring markers sit on.
pub const MARKER_RING_RADIUS: f64 = 150.0;
/// Radius of a marker that is not near the simulated angle.
pub const MARKER_RADIUS: f64 = 7.0;
/// Radius of a marker near the simulated angle.
pub const NEAR_MARKER_RADIUS: f64 = 11.0;

const RIM_RADIUS: f64 = 170.0;
const TICK_LENGTH: f64 = 10.0;
const TICK_STEP_DEG: usize = 30;
const CARDINAL_LABEL_RADIUS: f64 = 188.0;

/// The dial geometry used by [`render_dial`].
#[must_use]
pub fn dial() -> Dial {
    Dial::centered(DIAL_SIZE, MARKER_RING_RADIUS)
}

/// Renders the dial: rim, ticks, needle at the simulated angle and one marker
/// per phased point.
#[must_use]
pub fn render_dial(projector: &PhaseProjector<'_>, mode: RenderMode) -> String {
    let dial = dial();
    let center = dial.center;
    let simulated = projector.simulated().degrees();
    let interactive = mode.is_interactive();
    let (ink, paper) = if interactive {
        ("#334155", "#F8FAFC")
    } else {
        (PRINT_INK, PRINT_PAPER)
    };

    let mut output = String::new();
    svg::open(&mut output, DIAL_SIZE, DIAL_SIZE, "centerline-dial");

    let _ = writeln!(
        output,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{paper}" stroke="{ink}" stroke-width="2"/>"#,
        num(center.x),
        num(center.y),
        num(RIM_RADIUS),
    );

    for deg in (0_u32..360).step_by(TICK_STEP_DEG) {
        let angle = f64::from(deg);
        let outer = angle_to_position(angle, center, RIM_RADIUS);
        let inner = angle_to_position(angle, center, RIM_RADIUS - TICK_LENGTH);
        let _ = writeln!(
            output,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{ink}" stroke-width="1"/>"#,
            num(inner.x),
            num(inner.y),
            num(outer.x),
            num(outer.y),
        );
        if deg % 90 == 0 {
            let at = angle_to_position(angle, center, CARDINAL_LABEL_RADIUS);
            svg::label(&mut output, at.x, at.y, 11.0, ink, &format!("{deg}°"));
        }
    }

    let tip = angle_to_position(simulated, center, RIM_RADIUS);
    let needle_color = if interactive { "#DC2626" } else { PRINT_INK };
    let hook = if interactive {
        format!(r#" data-angle="{}""#, num(simulated))
    } else {
        String::new()
    };
    let _ = writeln!(
        output,
        r#"<line class="needle"{hook} x1="{}" y1="{}" x2="{}" y2="{}" stroke="{needle_color}" stroke-width="3"/>"#,
        num(center.x),
        num(center.y),
        num(tip.x),
        num(tip.y),
    );

    for marker in projector.markers(dial) {
        render_marker(&mut output, &marker, mode);
    }

    svg::label(
        &mut output,
        center.x,
        center.y,
        16.0,
        ink,
        &format!("{}°", num(simulated)),
    );

    svg::close(&mut output);
    output
}

/// One dial marker in the JSON form of the dial.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialMarkerReport {
    /// Point id
    pub id: String,
    /// Display number
    pub number: u32,
    /// Point name
    pub name: String,
    /// Phase angle, degrees
    pub angle: f64,
    /// Marker centre on the [`DIAL_SIZE`] drawing
    pub x: f64,
    /// Marker centre on the [`DIAL_SIZE`] drawing
    pub y: f64,
    /// Within the proximity threshold of the simulated angle
    pub near: bool,
}

/// The dial as data: every marker plus the near points, closest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialReport {
    /// Simulated cycle position, degrees
    pub simulated_angle: f64,
    /// Markers in storage order
    pub markers: Vec<DialMarkerReport>,
    /// Ids of near points, closest first
    pub near: Vec<String>,
}

/// Builds the JSON form of the dial.
#[must_use]
pub fn dial_report(projector: &PhaseProjector<'_>) -> DialReport {
    let markers = projector
        .markers(dial())
        .into_iter()
        .map(|m| DialMarkerReport {
            id: m.point.id.clone(),
            number: m.point.number,
            name: m.point.name.clone(),
            angle: m.angle,
            x: m.position.x,
            y: m.position.y,
            near: m.near,
        })
        .collect();

    DialReport {
        simulated_angle: projector.simulated().degrees(),
        markers,
        near: projector
            .near_points()
            .into_iter()
            .map(|p| p.id.clone())
            .collect(),
    }
}

fn render_marker(output: &mut String, marker: &DialMarker<'_>, mode: RenderMode) {
    let radius = if marker.near {
        NEAR_MARKER_RADIUS
    } else {
        MARKER_RADIUS
    };
    let (cx, cy) = (num(marker.position.x), num(marker.position.y));

    let (fill, text) = match (mode, marker.near) {
        (RenderMode::Interactive, true) => (WARNING_COLOR, "#FFFFFF"),
        (RenderMode::Interactive, false) => ("#3B82F6", "#FFFFFF"),
        (RenderMode::Print, true) => (PRINT_INK, PRINT_PAPER),
        (RenderMode::Print, false) => (PRINT_PAPER, PRINT_INK),
    };

    if mode.is_interactive() {
        let near = if marker.near { " near" } else { "" };
        let _ = writeln!(
            output,
            r#"<g class="dial-marker hoverable{near}" data-point-id="{}" data-angle="{}" style="cursor:pointer">"#,
            svg::escape(&marker.point.id),
            num(marker.angle),
        );
        let _ = writeln!(
            output,
            "<title>{} {} ({}°)</title>",
            svg::escape(&marker.point.id),
            svg::escape(&marker.point.name),
            num(marker.angle),
        );
    } else {
        output.push_str("<g class=\"dial-marker\">\n");
    }

    let _ = writeln!(
        output,
        r#"<circle cx="{cx}" cy="{cy}" r="{}" fill="{fill}" stroke="{PRINT_INK}" stroke-width="1"/>"#,
        num(radius),
    );
    svg::label(
        output,
        marker.position.x,
        marker.position.y,
        radius,
        text,
        &marker.point.number.to_string(),
    );
    output.push_str("</g>\n");
}
