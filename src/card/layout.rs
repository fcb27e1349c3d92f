//! Card geometry.
//!
//! `CardLayout` turns a `PreviewState` into positioned single-line text runs
//! in logical pixels. The on-screen preview and the SVG exporter both draw
//! from the same layout, so the exported image matches what the user sees.

use super::preview::{ElementKind, PreviewState};
use super::style::{CardFont, CardPalette, Rgb};
use unicode_width::UnicodeWidthChar;

// ─────────────────────────────────────────────────────────────────────────────
// Metrics
// ─────────────────────────────────────────────────────────────────────────────

/// Card width in logical pixels.
pub const CARD_WIDTH: f32 = 420.0;
/// Inner padding on every side.
pub const CARD_PADDING: f32 = 36.0;
/// Corner radius of the paper.
pub const CORNER_RADIUS: f32 = 14.0;

const TITLE_SIZE: f32 = 26.0;
const DATE_SIZE: f32 = 14.0;
const TEXT_SIZE: f32 = 18.0;
const META_SIZE: f32 = 15.0;

const TEXT_LINE_HEIGHT: f32 = 1.8;
const META_LINE_HEIGHT: f32 = 1.7;

/// Horizontal alignment of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` value.
    pub fn svg_value(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// One line of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Which card element the line belongs to
    pub kind: ElementKind,
    pub text: String,
    /// Anchor x position
    pub x: f32,
    /// Top of the line box
    pub top: f32,
    /// Font size in logical pixels
    pub size: f32,
    pub anchor: TextAnchor,
    pub bold: bool,
}

impl TextRun {
    /// Alphabetic baseline, assuming ascent of roughly 88% of the font size.
    pub fn baseline(&self) -> f32 {
        self.top + self.size * 0.88
    }
}

/// A fully positioned card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: f32,
    pub height: f32,
    pub palette: CardPalette,
    pub font: CardFont,
    /// Y position of the divider under the date
    pub divider_y: f32,
    pub runs: Vec<TextRun>,
}

impl CardLayout {
    /// Lay out `preview` at the fixed card width.
    pub fn compute(preview: &PreviewState) -> Self {
        let inner_width = CARD_WIDTH - CARD_PADDING * 2.0;
        let center = CARD_WIDTH / 2.0;
        let right = CARD_WIDTH - CARD_PADDING;

        let mut runs = Vec::new();
        let mut y = CARD_PADDING;

        runs.push(TextRun {
            kind: ElementKind::Title,
            text: preview.text(ElementKind::Title).to_string(),
            x: center,
            top: y,
            size: TITLE_SIZE,
            anchor: TextAnchor::Middle,
            bold: true,
        });
        y += TITLE_SIZE * 1.5;

        runs.push(TextRun {
            kind: ElementKind::Date,
            text: preview.text(ElementKind::Date).to_string(),
            x: center,
            top: y,
            size: DATE_SIZE,
            anchor: TextAnchor::Middle,
            bold: false,
        });
        y += DATE_SIZE * 1.6;

        let divider_y = y + 10.0;
        y = divider_y + 22.0;

        for line in wrap_text(preview.text(ElementKind::Text), inner_width, TEXT_SIZE) {
            runs.push(TextRun {
                kind: ElementKind::Text,
                text: line,
                x: CARD_PADDING,
                top: y,
                size: TEXT_SIZE,
                anchor: TextAnchor::Start,
                bold: false,
            });
            y += TEXT_SIZE * TEXT_LINE_HEIGHT;
        }
        y += 14.0;

        for kind in [ElementKind::Source, ElementKind::Author] {
            for line in wrap_text(preview.text(kind), inner_width, META_SIZE) {
                runs.push(TextRun {
                    kind,
                    text: line,
                    x: right,
                    top: y,
                    size: META_SIZE,
                    anchor: TextAnchor::End,
                    bold: false,
                });
                y += META_SIZE * META_LINE_HEIGHT;
            }
        }

        Self {
            width: CARD_WIDTH,
            height: (y + CARD_PADDING).ceil(),
            palette: preview.background().palette(),
            font: preview.font(),
            divider_y,
            runs,
        }
    }

    /// Text color of an element: title and body in ink, the rest muted.
    pub fn color_of(&self, kind: ElementKind) -> Rgb {
        match kind {
            ElementKind::Title | ElementKind::Text => self.palette.ink,
            ElementKind::Date | ElementKind::Source | ElementKind::Author => self.palette.muted,
        }
    }

    /// Lines belonging to one element.
    #[cfg(test)]
    pub fn runs_for(&self, kind: ElementKind) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(move |r| r.kind == kind)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Measurement
// ─────────────────────────────────────────────────────────────────────────────

/// Estimated advance of `c` at `size`: wide (CJK) glyphs take a full em,
/// narrow glyphs half of one.
fn char_advance(c: char, size: f32) -> f32 {
    let columns = c.width().unwrap_or(0) as f32;
    columns * size * 0.5
}

/// Estimated width of a single line.
#[cfg(test)]
pub fn measure_line(text: &str, size: f32) -> f32 {
    text.chars().map(|c| char_advance(c, size)).sum()
}

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines are kept and blank lines survive. Lines break between
/// any two characters, which suits CJK text.
pub fn wrap_text(text: &str, max_width: f32, size: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut line = String::new();
        let mut width = 0.0;

        for c in paragraph.chars() {
            let advance = char_advance(c, size);
            if width + advance > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
            }
            line.push(c);
            width += advance;
        }
        lines.push(line);
    }

    lines
}
