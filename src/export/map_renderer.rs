//! SVG rendering of the schematic map and its point markers.

use std::fmt::Write as _;

use crate::export::svg::{self, num};
use crate::export::{status_color, RenderMode, PRINT_INK, PRINT_PAPER};
use crate::models::Status;
use crate::projection::{MapBackground, MapMarker, MapProjector, MarkerRole, Surface, DEFAULT_SCHEMATIC};

/// Width of the rendered map.
pub const MAP_WIDTH: f64 = 1000.0;
/// Height of the rendered map.
pub const MAP_HEIGHT: f64 = 500.0;
/// Radius of a point marker.
pub const MARKER_RADIUS: f64 = 9.0;

const SELECTED_RADIUS: f64 = 12.0;
const HALO_RADIUS: f64 = 18.0;
const MARKER_FONT_SIZE: f64 = 10.0;
const REGION_FONT_SIZE: f64 = 14.0;

/// The surface markers are placed on.
#[must_use]
pub const fn map_surface() -> Surface {
    Surface::new(MAP_WIDTH, MAP_HEIGHT)
}

/// Renders the map with every marker the projector yields, in paint order.
///
/// # Examples
///
/// ```
/// use centerline::export::{render_map, RenderMode};
/// use centerline::projection::{MapBackground, MapProjector};
/// use centerline::services::defaults::default_points;
///
/// let points = default_points();
/// let svg = render_map(
///     &MapProjector::new(&points),
///     &MapBackground::DefaultSchematic,
///     RenderMode::Print,
/// );
/// assert!(svg.starts_with("<svg"));
/// ```
#[must_use]
pub fn render_map(projector: &MapProjector<'_>, background: &MapBackground, mode: RenderMode) -> String {
    let mut output = String::new();
    svg::open(&mut output, MAP_WIDTH, MAP_HEIGHT, "centerline-map");

    if !mode.is_interactive() {
        let _ = writeln!(
            output,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{PRINT_PAPER}"/>"#,
            num(MAP_WIDTH),
            num(MAP_HEIGHT),
        );
    }

    render_background(&mut output, background, mode);

    for marker in projector.markers() {
        render_marker(&mut output, &marker, mode);
    }

    svg::close(&mut output);
    output
}

fn render_background(output: &mut String, background: &MapBackground, mode: RenderMode) {
    match background {
        MapBackground::Image(reference) => {
            let _ = writeln!(
                output,
                r#"<image href="{}" x="0" y="0" width="{}" height="{}" preserveAspectRatio="xMidYMid meet"/>"#,
                svg::escape(reference),
                num(MAP_WIDTH),
                num(MAP_HEIGHT),
            );
        }
        MapBackground::DefaultSchematic => {
            let (fill, stroke, text) = if mode.is_interactive() {
                ("#F1F5F9", "#94A3B8", "#475569")
            } else {
                (PRINT_PAPER, PRINT_INK, PRINT_INK)
            };
            let surface = map_surface();

            output.push_str("<g class=\"schematic\">\n");
            for region in &DEFAULT_SCHEMATIC {
                let top_left = surface.place(region.x, region.y);
                let size = surface.place(region.width, region.height);
                let _ = writeln!(
                    output,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" stroke="{stroke}" stroke-width="1"/>"#,
                    num(top_left.x),
                    num(top_left.y),
                    num(size.x),
                    num(size.y),
                );
                svg::label(
                    output,
                    top_left.x + size.x / 2.0,
                    top_left.y + REGION_FONT_SIZE,
                    REGION_FONT_SIZE,
                    text,
                    region.label,
                );
            }
            output.push_str("</g>\n");
        }
    }
}

fn render_marker(output: &mut String, marker: &MapMarker<'_>, mode: RenderMode) {
    let center = marker.on(map_surface());
    let point = marker.point;
    let (cx, cy) = (num(center.x), num(center.y));
    let number = point.number.to_string();

    if mode.is_interactive() {
        let role = match marker.role {
            MarkerRole::Normal => "normal",
            MarkerRole::Preview => "preview",
            MarkerRole::Selected => "selected",
        };
        let _ = writeln!(
            output,
            r#"<g class="marker marker-{role} hoverable" data-point-id="{}" style="cursor:pointer">"#,
            svg::escape(&point.id),
        );
        let _ = writeln!(output, "<title>{} {}</title>", svg::escape(&point.id), svg::escape(&point.name));

        if marker.role == MarkerRole::Selected {
            let _ = writeln!(
                output,
                r##"<circle cx="{cx}" cy="{cy}" r="{}" fill="none" stroke="#2563EB" stroke-width="3" opacity="0.6"/>"##,
                num(HALO_RADIUS),
            );
        }

        let radius = if marker.role == MarkerRole::Selected {
            SELECTED_RADIUS
        } else {
            MARKER_RADIUS
        };
        let stroke = if point.criticality.stops_line() {
            "#7F1D1D"
        } else {
            "#FFFFFF"
        };
        let preview = if marker.role == MarkerRole::Preview {
            r#" stroke-dasharray="4 3" fill-opacity="0.6""#
        } else {
            ""
        };
        let _ = writeln!(
            output,
            r#"<circle cx="{cx}" cy="{cy}" r="{}" fill="{}" stroke="{stroke}" stroke-width="2"{preview}/>"#,
            num(radius),
            status_color(point.status),
        );
        svg::label(output, center.x, center.y, MARKER_FONT_SIZE, "#FFFFFF", &number);
    } else {
        output.push_str("<g class=\"marker\">\n");

        // Tag shapes stand in for colour on paper.
        let (fill, text) = match point.status {
            Status::TaggedRed => (PRINT_INK, PRINT_PAPER),
            Status::Ok | Status::TaggedYellow => (PRINT_PAPER, PRINT_INK),
        };
        if point.status == Status::TaggedYellow {
            let _ = writeln!(
                output,
                r#"<circle cx="{cx}" cy="{cy}" r="{}" fill="none" stroke="{PRINT_INK}" stroke-width="1"/>"#,
                num(MARKER_RADIUS + 3.0),
            );
        }
        let width = if point.criticality.stops_line() { 3.0 } else { 1.5 };
        let _ = writeln!(
            output,
            r#"<circle cx="{cx}" cy="{cy}" r="{}" fill="{fill}" stroke="{PRINT_INK}" stroke-width="{}"/>"#,
            num(MARKER_RADIUS),
            num(width),
        );
        svg::label(output, center.x, center.y, MARKER_FONT_SIZE, text, &number);
    }

    output.push_str("</g>\n");
}
