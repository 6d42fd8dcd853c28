//! SVG rendering of the editable module layout.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::fmt::Write as _;

use crate::export::svg::{self, num};
use crate::export::{RenderMode, PRINT_INK, PRINT_PAPER};
use crate::models::Module;
use crate::projection::Surface;

/// Width of the layout canvas.
pub const LAYOUT_WIDTH: f64 = 1000.0;
/// Height of the layout canvas.
pub const LAYOUT_HEIGHT: f64 = 500.0;

// Average glyph width relative to font size, used for wrapping.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Renders modules in storage order; later modules paint over earlier ones.
#[must_use]
pub fn render_layout(modules: &[Module], mode: RenderMode) -> String {
    let surface = Surface::new(LAYOUT_WIDTH, LAYOUT_HEIGHT);
    let mut output = String::new();
    svg::open(&mut output, LAYOUT_WIDTH, LAYOUT_HEIGHT, "centerline-layout");

    if !mode.is_interactive() {
        let _ = writeln!(
            output,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{PRINT_PAPER}"/>"#,
            num(LAYOUT_WIDTH),
            num(LAYOUT_HEIGHT),
        );
    }

    for module in modules {
        let origin = surface.place(module.x, module.y);
        let size = surface.place(module.width, module.height);
        let font_size = module.font_size * LAYOUT_HEIGHT / 100.0;

        let paint = svg::escape(&module.paint());
        let (fill, stroke, text) = match (mode, module.has_fill) {
            (RenderMode::Interactive, true) => (paint.as_str(), paint.as_str(), "#FFFFFF"),
            (RenderMode::Interactive, false) => ("none", paint.as_str(), paint.as_str()),
            (RenderMode::Print, _) => (PRINT_PAPER, PRINT_INK, PRINT_INK),
        };

        if mode.is_interactive() {
            let _ = writeln!(
                output,
                r#"<g class="module hoverable" data-module-id="{}">"#,
                svg::escape(&module.id)
            );
        } else {
            output.push_str("<g class=\"module\">\n");
        }
        let _ = writeln!(
            output,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" stroke="{stroke}" stroke-width="2"/>"#,
            num(origin.x),
            num(origin.y),
            num(size.x),
            num(size.y),
        );

        let lines = if module.wrap_text {
            wrap_label(&module.label, size.x, font_size)
        } else {
            vec![module.label.clone()]
        };
        let center_x = origin.x + size.x / 2.0;
        let first_y = origin.y + size.y / 2.0 - font_size * (lines.len() as f64 - 1.0) / 2.0;
        for (index, line) in lines.iter().enumerate() {
            let y = (index as f64).mul_add(font_size, first_y);
            svg::label(&mut output, center_x, y, font_size, text, line);
        }

        output.push_str("</g>\n");
    }

    svg::close(&mut output);
    output
}

/// Greedy word wrap of `label` into lines that fit `width` at `font_size`.
///
/// A single word wider than the box gets a line of its own.
#[must_use]
pub fn wrap_label(label: &str, width: f64, font_size: f64) -> Vec<String> {
    let max_chars = (width / (font_size * GLYPH_WIDTH_RATIO)).floor().max(1.0) as usize;

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in label.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
