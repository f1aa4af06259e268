//! SVG serialization of the scene.
//!
//! Produces one `<svg>` document with three groups in paint order. Paths
//! carry `data-index` so a host can route DOM clicks back to
//! [`crate::controller::DrillDownCore::click_feature`].

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::Write as _;

use crate::scene::{PathElement, Scene};

/// Render the whole scene as SVG markup.
#[must_use]
pub fn to_svg(scene: &Scene, width: f64, height: f64) -> String {
    let mut out = String::new();
    // `fmt::Write` for `String` never fails; results are folded with `and`.
    let written = write!(out, r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#)
        .and_then(|()| write_boxes(&mut out, scene))
        .and_then(|()| write_map(&mut out, scene))
        .and_then(|()| write_highlight(&mut out, scene));
    if written.is_err() {
        return String::new();
    }
    out.push_str("</svg>");
    out
}

fn write_boxes(out: &mut String, scene: &Scene) -> std::fmt::Result {
    out.push_str(r#"<g class="boxes-group">"#);
    for b in scene.boxes() {
        let name = escape(&b.name);
        write!(
            out,
            r#"<rect class="island-box island-box-{name}" x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" transform="translate({}, {})"/>"#,
            b.bounds.min.x,
            b.bounds.min.y,
            b.bounds.width(),
            b.bounds.height(),
            b.translate.0,
            b.translate.1,
        )?;
    }
    out.push_str("</g>");
    Ok(())
}

fn write_map(out: &mut String, scene: &Scene) -> std::fmt::Result {
    out.push_str(r#"<g class="map-group">"#);
    for path in scene.map_paths() {
        write_path(out, path)?;
    }
    out.push_str("</g>");
    Ok(())
}

fn write_highlight(out: &mut String, scene: &Scene) -> std::fmt::Result {
    out.push_str(r#"<g class="highlight-group" style="pointer-events: none">"#);
    if let Some(path) = scene.highlight() {
        write_path(out, path)?;
    }
    out.push_str("</g>");
    Ok(())
}

fn write_path(out: &mut String, path: &PathElement) -> std::fmt::Result {
    write!(out, r#"<path class="{}""#, path.class)?;
    if let Some(index) = path.index {
        write!(out, r#" data-index="{index}""#)?;
    }
    write!(
        out,
        r#" data-name="{}" d="{}" transform="translate({}, {})"/>"#,
        escape(path.feature.display_name()),
        path.d,
        path.translate.0,
        path.translate.1,
    )
}

/// Escape text for use in an XML attribute.
fn escape(text: &str) -> String {
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
