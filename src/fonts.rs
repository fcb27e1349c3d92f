//! Font management for Paper Digest
//!
//! egui ships without CJK glyphs, so the preview needs a system or
//! user-configured font that covers Chinese text. Each card font gets its own
//! named family so the preview can switch fonts without rebuilding the atlas.

use crate::card::CardFont;
use crate::config::FontSettings;
use egui::{FontData, FontDefinitions, FontFamily, FontId, TextStyle};
use log::{debug, info, warn};
use resvg::usvg::fontdb;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Font Family Names
// ─────────────────────────────────────────────────────────────────────────────

/// Font data key for the general CJK fallback
pub const FONT_CJK: &str = "cjk-fallback";

/// Well-known locations of CJK-capable fonts, tried in order.
const CJK_CANDIDATES: &[&str] = &[
    // Windows
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simsun.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    // macOS
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    // Linux
    "/usr/share/fonts/opentype/noto/NotoSerifCJK-Regular.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-zenhei/wqy-zenhei.ttc",
];

// ─────────────────────────────────────────────────────────────────────────────
// Font Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Read a font file, keeping it only if it parses as at least one face.
fn read_font(path: &Path) -> Option<Vec<u8>> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Cannot read font {}: {}", path.display(), e);
            return None;
        }
    };

    let mut probe = fontdb::Database::new();
    probe.load_font_data(data.clone());
    if probe.is_empty() {
        warn!("Ignoring {}: not a usable font", path.display());
        return None;
    }
    Some(data)
}

/// First path that exists.
fn first_existing(paths: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    paths.into_iter().find(|p| p.exists())
}

/// Pick the CJK fallback: the configured preview font, else a known system font.
fn cjk_font_path(settings: &FontSettings) -> Option<PathBuf> {
    settings
        .preview_font
        .clone()
        .filter(|p| p.exists())
        .or_else(|| first_existing(CJK_CANDIDATES.iter().map(PathBuf::from)))
}

/// Create font definitions for the UI and the card preview.
///
/// This sets up:
/// - a CJK fallback appended to the proportional and monospace families
/// - one named family per `CardFont`, led by its configured file if any
pub fn create_font_definitions(settings: &FontSettings) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    let cjk_loaded = match cjk_font_path(settings).and_then(|p| {
        debug!("CJK fallback font: {}", p.display());
        read_font(&p)
    }) {
        Some(data) => {
            fonts
                .font_data
                .insert(FONT_CJK.to_owned(), FontData::from_owned(data));
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .push(FONT_CJK.to_owned());
            }
            true
        }
        None => {
            warn!("No CJK font found; Chinese text in the preview may not render");
            false
        }
    };

    let proportional = fonts
        .families
        .get(&FontFamily::Proportional)
        .cloned()
        .unwrap_or_default();

    for font in CardFont::all() {
        let mut chain = Vec::new();

        if let Some(data) = settings.file_for(*font).and_then(|p| read_font(p)) {
            let key = font.family_key().to_owned();
            fonts.font_data.insert(key.clone(), FontData::from_owned(data));
            chain.push(key);
        }
        // Proportional already ends with the CJK fallback when one was found
        chain.extend(proportional.iter().cloned());

        fonts
            .families
            .insert(card_font_family(*font), chain);
    }

    info!(
        "Font definitions ready ({} font files, CJK fallback: {})",
        fonts.font_data.len(),
        cjk_loaded
    );

    fonts
}

/// Apply fonts and text styles to an egui context.
///
/// This should be called once during application initialization.
pub fn setup_fonts(ctx: &egui::Context, settings: &FontSettings) {
    ctx.set_fonts(create_font_definitions(settings));

    let text_styles: BTreeMap<TextStyle, FontId> = [
        (
            TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        ),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (
            TextStyle::Monospace,
            FontId::new(14.0, FontFamily::Monospace),
        ),
        (
            TextStyle::Button,
            FontId::new(15.0, FontFamily::Proportional),
        ),
        (
            TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        ),
    ]
    .into();

    ctx.style_mut(|style| {
        style.text_styles = text_styles.clone();
    });
}

/// egui family used to paint text in `font`.
pub fn card_font_family(font: CardFont) -> FontFamily {
    FontFamily::Name(font.family_key().into())
}
