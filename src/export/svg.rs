//! SVG serialization of a card layout.
//!
//! The SVG is the document handed to the rasterizer. Only the paper itself
//! is filled; everything outside the rounded corners stays transparent.

use crate::card::layout::{CardLayout, CORNER_RADIUS, CARD_PADDING};
use std::fmt::Write;

/// Render `layout` as a standalone SVG document.
pub fn render_card_svg(layout: &CardLayout) -> String {
    let palette = &layout.palette;
    let family = xml_escape(layout.font.svg_family());
    let mut svg = String::with_capacity(2048);

    // Writing into a String cannot fail
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    );
    let _ = write!(
        svg,
        r#"<rect x="0.5" y="0.5" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" stroke="{}" stroke-width="1"/>"#,
        layout.width - 1.0,
        layout.height - 1.0,
        palette.paper.hex(),
        palette.border.hex(),
        r = CORNER_RADIUS,
    );
    let _ = write!(
        svg,
        r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{}" stroke-width="1.5"/>"#,
        palette.accent.hex(),
        x1 = CARD_PADDING + 60.0,
        x2 = layout.width - CARD_PADDING - 60.0,
        y = layout.divider_y,
    );

    for run in &layout.runs {
        let color = layout.color_of(run.kind);
        let weight = if run.bold { "bold" } else { "normal" };
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{}" xml:space="preserve">{}</text>"#,
            run.x,
            run.baseline(),
            family,
            run.size,
            weight,
            color.hex(),
            run.anchor.svg_value(),
            xml_escape(&run.text),
        );
    }

    svg.push_str("</svg>");
    svg
}

/// XML-escape a string for text content and attribute values.
///
/// Characters XML 1.0 cannot carry (C0 controls other than tab and line
/// breaks, U+FFFE, U+FFFF) are dropped.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
