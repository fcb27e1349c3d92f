//! Card rasterization with resvg.
//!
//! The rasterizer needs a font database before it can draw any text.
//! Building one means scanning every installed font, which takes long enough
//! that it is done on demand, off the UI thread, the first time the user asks
//! for an image. `RasterizerState` tracks that lifecycle.

use crate::config::FontSettings;
use crate::error::{Error, Result};
use image::RgbaImage;
use log::{debug, info, warn};
use resvg::tiny_skia;
use resvg::usvg::{self, fontdb};
use std::io::Cursor;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// How the card is turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Device pixels per logical pixel
    pub scale: f32,
    /// Leave the area outside the paper transparent instead of white
    pub transparent: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            transparent: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Font Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Something that can build the rasterizer's font database.
///
/// Runs on a worker thread.
pub trait FontLoader: Send + Sync {
    fn load(&self) -> Result<fontdb::Database>;
}

/// Loads installed fonts plus any fonts named in the settings.
#[derive(Debug, Clone)]
pub struct SystemFontLoader {
    settings: FontSettings,
}

impl SystemFontLoader {
    pub fn new(settings: FontSettings) -> Self {
        Self { settings }
    }
}

impl FontLoader for SystemFontLoader {
    fn load(&self) -> Result<fontdb::Database> {
        let mut db = fontdb::Database::new();

        if self.settings.load_system_fonts {
            db.load_system_fonts();
            debug!("Loaded {} system font faces", db.len());
        }

        for dir in &self.settings.font_dirs {
            if dir.is_dir() {
                db.load_fonts_dir(dir);
            } else {
                warn!("Font directory not found: {}", dir.display());
            }
        }

        for path in self.settings.variant_files() {
            db.load_font_file(path)
                .map_err(|e| Error::FontLoad(format!("{}: {}", path.display(), e)))?;
        }

        if db.is_empty() {
            return Err(Error::FontLoad("no font faces found".to_string()));
        }

        db.set_serif_family("Noto Serif CJK SC");
        db.set_sans_serif_family("Noto Sans CJK SC");

        info!("Rasterizer font database ready ({} faces)", db.len());
        Ok(db)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rasterizer
// ─────────────────────────────────────────────────────────────────────────────

/// Renders SVG documents to RGBA images.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl Rasterizer {
    pub fn new(fontdb: fontdb::Database) -> Self {
        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Number of font faces available for text.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Rasterize `svg` at `options.scale`.
    pub fn rasterize(&self, svg: &str, options: &RasterOptions) -> Result<RgbaImage> {
        let mut usvg_options = usvg::Options::default();
        usvg_options.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_str(svg, &usvg_options)?;
        let size = tree.size();
        let width = (size.width() * options.scale).ceil() as u32;
        let height = (size.height() * options.scale).ceil() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            Error::Rasterize(format!("cannot allocate a {}x{} surface", width, height))
        })?;
        if !options.transparent {
            pixmap.fill(tiny_skia::Color::WHITE);
        }

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(options.scale, options.scale),
            &mut pixmap.as_mut(),
        );

        // tiny-skia stores premultiplied alpha; PNG wants straight alpha
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| Error::Rasterize("pixel buffer size mismatch".to_string()))
    }
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

/// Availability of the rasterizer within this session.
pub enum RasterizerState {
    /// Nothing loaded yet, or the last load failed
    NoRasterizer,
    /// Font database is being built on a worker thread
    Loading(Receiver<Result<fontdb::Database>>),
    /// Ready to render
    Ready(Rasterizer),
}

impl RasterizerState {
    /// Short name for logging and UI hints.
    pub fn label(&self) -> &'static str {
        match self {
            RasterizerState::NoRasterizer => "no-rasterizer",
            RasterizerState::Loading(_) => "loading",
            RasterizerState::Ready(_) => "ready",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="8" viewBox="0 0 10 8"><rect x="2" y="2" width="4" height="4" fill="#ff0000"/></svg>"##;

    fn rasterizer() -> Rasterizer {
        Rasterizer::new(fontdb::Database::new())
    }

    #[test]
    fn test_default_options() {
        let options = RasterOptions::default();
        assert_eq!(options.scale, 2.0);
        assert!(options.transparent);
    }

    #[test]
    fn test_rasterize_scales_output() {
        let image = rasterizer()
            .rasterize(SQUARE, &RasterOptions::default())
            .unwrap();
        assert_eq!(image.dimensions(), (20, 16));
    }

    #[test]
    fn test_rasterize_keeps_background_transparent() {
        let image = rasterizer()
            .rasterize(SQUARE, &RasterOptions::default())
            .unwrap();
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        assert_eq!(image.get_pixel(8, 8).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_rasterize_opaque_background() {
        let options = RasterOptions {
            scale: 1.0,
            transparent: false,
        };
        let image = rasterizer().rasterize(SQUARE, &options).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_rasterize_invalid_svg() {
        let err = rasterizer()
            .rasterize("<not-svg", &RasterOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Rasterize(_)));
    }

    #[test]
    fn test_rasterize_tall_surface_buffer() {
        let tall = r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="40000" viewBox="0 0 2 40000"><rect width="2" height="40000" fill="#00ff00"/></svg>"##;
        let image = rasterizer().rasterize(tall, &RasterOptions::default()).unwrap();
        assert_eq!(image.dimensions(), (4, 80000));
        assert_eq!(image.as_raw().len(), 4 * 80000 * 4);
    }

    #[test]
    fn test_encode_png_signature() {
        let image = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_loader_without_sources_fails() {
        let loader = SystemFontLoader::new(FontSettings {
            load_system_fonts: false,
            ..FontSettings::default()
        });
        assert!(matches!(loader.load(), Err(Error::FontLoad(_))));
    }

    #[test]
    fn test_loader_missing_variant_file_fails() {
        let loader = SystemFontLoader::new(FontSettings {
            load_system_fonts: false,
            serif_file: Some("/nonexistent/NotoSerifSC.otf".into()),
            ..FontSettings::default()
        });
        let err = loader.load().unwrap_err();
        assert!(err.to_string().contains("NotoSerifSC.otf"));
    }
}
