//! Card styles: background themes and fonts.
//!
//! Both enums are persisted in the settings file, so they carry serde
//! derives with lowercase names, and both expose the style class name used
//! by the preview class lists.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────────────────

/// An opaque sRGB color, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Format as a CSS/SVG hex color (`#rrggbb`).
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Convert to an egui color.
    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.0, self.1, self.2)
    }
}

/// Colors used to paint one card theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPalette {
    /// Paper fill
    pub paper: Rgb,
    /// Main text (title and digest body)
    pub ink: Rgb,
    /// Secondary text (date, source, author)
    pub muted: Rgb,
    /// Divider and decorations
    pub accent: Rgb,
    /// Card outline
    pub border: Rgb,
}

// ─────────────────────────────────────────────────────────────────────────────
// Background Themes
// ─────────────────────────────────────────────────────────────────────────────

/// Background theme of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// Warm off-white paper (default)
    #[default]
    Classic,
    /// Brown kraft paper
    Kraft,
    /// Pale cherry-blossom pink
    Sakura,
    /// Soft mint green
    Mint,
    /// Dark ink with light text
    Ink,
}

impl Background {
    /// Get all available backgrounds in display order.
    pub fn all() -> &'static [Background] {
        &[
            Background::Classic,
            Background::Kraft,
            Background::Sakura,
            Background::Mint,
            Background::Ink,
        ]
    }

    /// Style class applied to the card container.
    pub fn class_name(&self) -> &'static str {
        match self {
            Background::Classic => "bg-classic",
            Background::Kraft => "bg-kraft",
            Background::Sakura => "bg-sakura",
            Background::Mint => "bg-mint",
            Background::Ink => "bg-ink",
        }
    }

    /// Get the display label for the background.
    pub fn label(&self) -> &'static str {
        match self {
            Background::Classic => "经典米白",
            Background::Kraft => "复古牛皮纸",
            Background::Sakura => "樱花粉",
            Background::Mint => "薄荷绿",
            Background::Ink => "墨夜",
        }
    }

    /// Get the color palette for the background.
    pub fn palette(&self) -> CardPalette {
        match self {
            Background::Classic => CardPalette {
                paper: Rgb(253, 248, 238),
                ink: Rgb(51, 51, 51),
                muted: Rgb(128, 118, 104),
                accent: Rgb(196, 164, 120),
                border: Rgb(232, 222, 204),
            },
            Background::Kraft => CardPalette {
                paper: Rgb(222, 196, 160),
                ink: Rgb(70, 50, 30),
                muted: Rgb(110, 84, 58),
                accent: Rgb(150, 105, 60),
                border: Rgb(190, 160, 120),
            },
            Background::Sakura => CardPalette {
                paper: Rgb(253, 236, 240),
                ink: Rgb(88, 52, 64),
                muted: Rgb(160, 110, 124),
                accent: Rgb(232, 150, 170),
                border: Rgb(245, 205, 215),
            },
            Background::Mint => CardPalette {
                paper: Rgb(232, 246, 238),
                ink: Rgb(40, 72, 58),
                muted: Rgb(96, 134, 116),
                accent: Rgb(120, 190, 150),
                border: Rgb(200, 228, 212),
            },
            Background::Ink => CardPalette {
                paper: Rgb(38, 40, 46),
                ink: Rgb(236, 232, 222),
                muted: Rgb(170, 166, 156),
                accent: Rgb(212, 175, 55),
                border: Rgb(70, 72, 80),
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Card Fonts
// ─────────────────────────────────────────────────────────────────────────────

/// Typeface used for every text element of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardFont {
    /// Song-style serif (default)
    #[default]
    Serif,
    /// Ma Shan Zheng brush script
    Mashan,
    /// ZCOOL KuaiLe rounded display face
    Kuaile,
}

impl CardFont {
    /// Get all available fonts in display order.
    pub fn all() -> &'static [CardFont] {
        &[CardFont::Serif, CardFont::Mashan, CardFont::Kuaile]
    }

    /// Style class applied to each text element of the card.
    pub fn class_name(&self) -> &'static str {
        match self {
            CardFont::Serif => "font-serif",
            CardFont::Mashan => "font-mashan",
            CardFont::Kuaile => "font-kuaile",
        }
    }

    /// Get the display label for the font.
    pub fn label(&self) -> &'static str {
        match self {
            CardFont::Serif => "思源宋体",
            CardFont::Mashan => "马善政毛笔",
            CardFont::Kuaile => "站酷快乐体",
        }
    }

    /// Font family list written into the exported SVG, most specific first.
    pub fn svg_family(&self) -> &'static str {
        match self {
            CardFont::Serif => {
                "'Noto Serif SC', 'Noto Serif CJK SC', 'Source Han Serif SC', 'Songti SC', SimSun, serif"
            }
            CardFont::Mashan => "'Ma Shan Zheng', KaiTi, STKaiti, 'AR PL UKai CN', cursive",
            CardFont::Kuaile => "'ZCOOL KuaiLe', YouYuan, 'Yuanti SC', fantasy",
        }
    }

    /// Name of the egui font family registered for this card font.
    pub fn family_key(&self) -> &'static str {
        match self {
            CardFont::Serif => "card-serif",
            CardFont::Mashan => "card-mashan",
            CardFont::Kuaile => "card-kuaile",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
