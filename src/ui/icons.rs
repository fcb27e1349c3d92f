//! Window icon for Paper Digest
//!
//! An `icon.png` in the config directory overrides the built-in icon, a
//! small paper card drawn in the classic palette.

use crate::card::Background;
use crate::config::get_config_dir;
use eframe::egui;
use image::{GenericImageView, Rgba, RgbaImage};
use std::path::Path;
use std::sync::Arc;

/// Edge length of the drawn fallback icon.
const DRAWN_ICON_SIZE: u32 = 64;

/// Decode PNG bytes into window icon data.
pub fn load_icon_from_png(png_data: &[u8]) -> Option<egui::IconData> {
    let image = image::load_from_memory(png_data).ok()?;
    let (width, height) = image.dimensions();

    Some(egui::IconData {
        rgba: image.to_rgba8().into_raw(),
        width,
        height,
    })
}

fn load_icon_from_file(path: &Path) -> Option<egui::IconData> {
    let data = std::fs::read(path).ok()?;
    load_icon_from_png(&data)
}

/// A card in the classic palette: paper, border, title bar and text lines.
pub fn drawn_icon() -> egui::IconData {
    let palette = Background::Classic.palette();
    let size = DRAWN_ICON_SIZE;
    let rgb = |c: crate::card::Rgb| Rgba([c.0, c.1, c.2, 255]);

    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let (left, right, top, bottom) = (8, size - 8, 4, size - 4);

    for y in top..bottom {
        for x in left..right {
            let edge = x == left || x == right - 1 || y == top || y == bottom - 1;
            let color = if edge { palette.border } else { palette.paper };
            img.put_pixel(x, y, rgb(color));
        }
    }

    // Title
    for y in 12..16 {
        for x in 20..44 {
            img.put_pixel(x, y, rgb(palette.ink));
        }
    }
    // Divider
    for x in 22..42 {
        img.put_pixel(x, 21, rgb(palette.accent));
    }
    // Body lines
    for (row, len) in [(28, 40), (35, 40), (42, 30)] {
        for y in row..row + 2 {
            for x in 14..14 + len {
                img.put_pixel(x, y, rgb(palette.muted));
            }
        }
    }

    egui::IconData {
        rgba: img.into_raw(),
        width: size,
        height: size,
    }
}

/// File name of the user icon override inside the config directory.
const ICON_OVERRIDE_NAME: &str = "icon.png";

/// Icon override from `dir`, if present and decodable.
fn icon_override(dir: &Path) -> Option<egui::IconData> {
    let path = dir.join(ICON_OVERRIDE_NAME);
    if !path.exists() {
        return None;
    }
    let icon = load_icon_from_file(&path);
    match &icon {
        Some(_) => log::info!("Loaded application icon from: {}", path.display()),
        None => log::warn!("Ignoring unreadable icon: {}", path.display()),
    }
    icon
}

/// Application icon: the config-directory override, else the drawn card.
pub fn get_app_icon() -> Arc<egui::IconData> {
    let icon = get_config_dir()
        .ok()
        .and_then(|dir| icon_override(&dir))
        .unwrap_or_else(|| {
            log::debug!("No icon override, drawing one");
            drawn_icon()
        });
    Arc::new(icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_icon_from_png_invalid_data() {
        assert!(load_icon_from_png(b"not a png file").is_none());
    }

    #[test]
    fn test_load_icon_from_file_nonexistent() {
        assert!(load_icon_from_file(Path::new("nonexistent_icon.png")).is_none());
    }

    #[test]
    fn test_icon_override_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(icon_override(dir.path()).is_none());

        let icon = drawn_icon();
        let image = RgbaImage::from_raw(icon.width, icon.height, icon.rgba.clone()).unwrap();
        let png = crate::export::rasterizer::encode_png(&image).unwrap();
        std::fs::write(dir.path().join(ICON_OVERRIDE_NAME), png).unwrap();

        let loaded = icon_override(dir.path()).unwrap();
        assert_eq!((loaded.width, loaded.height), (icon.width, icon.height));
    }

    #[test]
    fn test_unreadable_icon_override_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ICON_OVERRIDE_NAME), b"garbage").unwrap();
        assert!(icon_override(dir.path()).is_none());
    }

    #[test]
    fn test_drawn_icon_shape() {
        let icon = drawn_icon();
        assert_eq!(icon.width, DRAWN_ICON_SIZE);
        assert_eq!(icon.rgba.len(), (DRAWN_ICON_SIZE * DRAWN_ICON_SIZE * 4) as usize);
        // Corner pixel stays transparent
        assert_eq!(icon.rgba[3], 0);
    }

    #[test]
    fn test_png_round_trip_through_loader() {
        let icon = drawn_icon();
        let image = RgbaImage::from_raw(icon.width, icon.height, icon.rgba.clone()).unwrap();
        let png = crate::export::rasterizer::encode_png(&image).unwrap();

        let loaded = load_icon_from_png(&png).unwrap();
        assert_eq!(loaded.rgba, icon.rgba);
    }
}
