//! Small SVG writing helpers shared by the renderers.

use std::fmt::Write as _;

/// Formats a coordinate with at most two decimals and no trailing zeros.
#[must_use]
pub fn num(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Escapes text for use in element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Opens an `<svg>` document of the given size.
pub fn open(output: &mut String, width: f64, height: f64, class: &str) {
    let _ = writeln!(
        output,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="{class}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(width),
        h = num(height),
    );
}

/// Closes the document opened by [`open`].
pub fn close(output: &mut String) {
    output.push_str("</svg>\n");
}

/// Writes a `<text>` element centred on (`x`, `y`).
pub fn label(output: &mut String, x: f64, y: f64, size: f64, fill: &str, text: &str) {
    let _ = writeln!(
        output,
        r#"<text x="{}" y="{}" font-size="{}" fill="{fill}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
        num(x),
        num(y),
        num(size),
        escape(text),
    );
}
