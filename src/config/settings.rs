//! User settings and preferences for Paper Digest
//!
//! Everything the app remembers between runs: the last card style, the
//! remembered source and author, notification timing, window geometry, and
//! where exported images and fonts come from. Stored as `config.json`.

use crate::card::{Background, CardFont};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outer window geometry restored at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
    /// Left edge; unset until the window has been placed once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 760.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Export Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Where and how exported images are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Ask where to save through the native save dialog
    pub use_save_dialog: bool,
    /// Directory for direct downloads (defaults to the user's download folder)
    pub output_directory: Option<PathBuf>,
    /// Open the image with the system viewer after saving
    pub open_after_export: bool,
    /// Device pixels per card pixel
    pub scale: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            use_save_dialog: true,
            output_directory: None,
            open_after_export: false,
            scale: 2.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Font Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Font sources for the preview and the rasterizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// Scan installed system fonts when building the rasterizer
    pub load_system_fonts: bool,
    /// Extra directories to scan
    pub font_dirs: Vec<PathBuf>,
    /// Font file for the serif card font
    pub serif_file: Option<PathBuf>,
    /// Font file for the brush card font
    pub mashan_file: Option<PathBuf>,
    /// Font file for the rounded card font
    pub kuaile_file: Option<PathBuf>,
    /// CJK font used by the on-screen preview (auto-detected when unset)
    pub preview_font: Option<PathBuf>,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            serif_file: None,
            mashan_file: None,
            kuaile_file: None,
            preview_font: None,
        }
    }
}

impl FontSettings {
    /// Font file configured for `font`, if any.
    pub fn file_for(&self, font: CardFont) -> Option<&PathBuf> {
        match font {
            CardFont::Serif => self.serif_file.as_ref(),
            CardFont::Mashan => self.mashan_file.as_ref(),
            CardFont::Kuaile => self.kuaile_file.as_ref(),
        }
    }

    /// Every configured per-font file.
    pub fn variant_files(&self) -> impl Iterator<Item = &PathBuf> {
        CardFont::all().iter().filter_map(|f| self.file_for(*f))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Root of `config.json`.
///
/// Missing keys take their `Default` value, so older or hand-trimmed files
/// still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Card Style
    // ─────────────────────────────────────────────────────────────────────────
    /// Last selected background theme
    pub background: Background,

    /// Last selected card font
    pub font: CardFont,

    // ─────────────────────────────────────────────────────────────────────────
    // Form Memory
    // ─────────────────────────────────────────────────────────────────────────
    /// Restore the last source and author on startup
    pub remember_form: bool,

    /// Source from the previous session
    pub last_source: Option<String>,

    /// Author from the previous session
    pub last_author: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────
    /// How long a notification stays on screen (seconds)
    pub notification_secs: f32,

    pub window_size: WindowSize,

    pub export: ExportSettings,

    pub fonts: FontSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background: Background::default(),
            font: CardFont::default(),
            remember_form: true,
            last_source: None,
            last_author: None,
            notification_secs: 3.0,
            window_size: WindowSize::default(),
            export: ExportSettings::default(),
            fonts: FontSettings::default(),
        }
    }
}

impl Settings {
    pub const MIN_SCALE: f32 = 1.0;
    pub const MAX_SCALE: f32 = 4.0;
    pub const MIN_NOTIFICATION_SECS: f32 = 1.0;
    pub const MAX_NOTIFICATION_SECS: f32 = 10.0;
    /// Bounds for either window dimension, in points.
    pub const MIN_WINDOW_EDGE: f32 = 200.0;
    pub const MAX_WINDOW_EDGE: f32 = 10000.0;

    /// Pull hand-edited or corrupted values back into range.
    pub fn sanitize(&mut self) {
        if !self.export.scale.is_finite() {
            self.export.scale = ExportSettings::default().scale;
        }
        self.export.scale = self.export.scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE);

        if !self.notification_secs.is_finite() {
            self.notification_secs = Settings::default().notification_secs;
        }
        self.notification_secs = self
            .notification_secs
            .clamp(Self::MIN_NOTIFICATION_SECS, Self::MAX_NOTIFICATION_SECS);

        let edge = |v: f32| v.clamp(Self::MIN_WINDOW_EDGE, Self::MAX_WINDOW_EDGE);
        self.window_size.width = edge(self.window_size.width);
        self.window_size.height = edge(self.window_size.height);

        // Blank remembered values are as good as none
        if self.last_source.as_deref().is_some_and(|s| s.trim().is_empty()) {
            self.last_source = None;
        }
        if self.last_author.as_deref().is_some_and(|s| s.trim().is_empty()) {
            self.last_author = None;
        }
    }

    /// Parse `config.json` text and run [`Settings::sanitize`] on the result.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.background, Background::Classic);
        assert_eq!(settings.font, CardFont::Serif);
        assert_eq!(settings.export.scale, 2.0);
        assert!(settings.export.use_save_dialog);
        assert!(settings.fonts.load_system_fonts);
        assert_eq!(settings.notification_secs, 3.0);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let settings = Settings {
            background: Background::Sakura,
            font: CardFont::Kuaile,
            last_author: Some("莫奈黄".to_string()),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, parsed);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r#"{"background": "ink", "export": {"open_after_export": true}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.background, Background::Ink);
        assert!(settings.export.open_after_export);
        // Missing nested fields fall back to defaults
        assert!(settings.export.use_save_dialog);
        assert_eq!(settings.export.scale, 2.0);
        assert_eq!(settings.font, CardFont::Serif);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitize_scale() {
        let mut settings = Settings::default();
        settings.export.scale = 0.1;
        settings.sanitize();
        assert_eq!(settings.export.scale, Settings::MIN_SCALE);

        settings.export.scale = 64.0;
        settings.sanitize();
        assert_eq!(settings.export.scale, Settings::MAX_SCALE);
    }

    #[test]
    fn test_sanitize_notification_secs() {
        let mut settings = Settings {
            notification_secs: 0.0,
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.notification_secs, Settings::MIN_NOTIFICATION_SECS);
    }

    #[test]
    fn test_sanitize_blank_remembered_fields() {
        let mut settings = Settings {
            last_source: Some("   ".to_string()),
            last_author: Some("作者".to_string()),
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.last_source, None);
        assert_eq!(settings.last_author.as_deref(), Some("作者"));
    }

    #[test]
    fn test_window_size_default() {
        let size = WindowSize::default();
        assert_eq!(size.width, 1000.0);
        assert!(size.x.is_none());
        assert!(!size.maximized);
    }

    #[test]
    fn test_font_variant_files() {
        let fonts = FontSettings {
            serif_file: Some(PathBuf::from("/fonts/serif.otf")),
            kuaile_file: Some(PathBuf::from("/fonts/kuaile.ttf")),
            ..FontSettings::default()
        };
        let files: Vec<_> = fonts.variant_files().collect();
        assert_eq!(files.len(), 2);
        assert_eq!(fonts.file_for(CardFont::Mashan), None);
    }

    #[test]
    fn test_from_json_sanitized() {
        let settings =
            Settings::from_json_sanitized(r#"{"window_size": {"width": 5, "height": 900}}"#)
                .unwrap();
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_EDGE);
        assert_eq!(settings.window_size.height, 900.0);
    }
}
