//! On-screen card preview.
//!
//! Paints the same `CardLayout` the exporter rasterizes, scaled to fit the
//! panel and by the generate pulse.

use crate::card::layout::{CardLayout, TextAnchor, CARD_PADDING, CORNER_RADIUS};
use crate::card::PreviewState;
use crate::fonts::card_font_family;
use eframe::egui::{self, Align2, FontId, Pos2, Rect, Stroke, Vec2};

/// Room left around the card inside the panel.
const PANEL_MARGIN: f32 = 24.0;

/// Scale that fits a `card` sized box into `available`, never enlarging.
pub fn fit_scale(card: Vec2, available: Vec2) -> f32 {
    let room = available - Vec2::splat(PANEL_MARGIN * 2.0);
    if card.x <= 0.0 || card.y <= 0.0 || room.x <= 0.0 || room.y <= 0.0 {
        return 1.0;
    }
    (room.x / card.x).min(room.y / card.y).min(1.0)
}

/// Paint the card centered in the remaining space of `ui`.
pub fn show_preview_panel(ui: &mut egui::Ui, preview: &PreviewState, pulse_scale: f32) {
    let layout = CardLayout::compute(preview);
    let card_size = Vec2::new(layout.width, layout.height);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let available = ui.available_size();
            let scale = fit_scale(card_size, available).max(0.5) * pulse_scale;
            let size = card_size * scale;

            let (area, _response) = ui.allocate_exact_size(
                available.max(size + Vec2::splat(PANEL_MARGIN * 2.0)),
                egui::Sense::hover(),
            );
            let rect = Rect::from_center_size(area.center(), size);
            paint_card(ui.painter(), &layout, rect, scale);
        });
}

fn paint_card(painter: &egui::Painter, layout: &CardLayout, rect: Rect, scale: f32) {
    let palette = &layout.palette;
    let to_screen = |x: f32, y: f32| Pos2::new(rect.min.x + x * scale, rect.min.y + y * scale);

    painter.rect(
        rect,
        CORNER_RADIUS * scale,
        palette.paper.to_color32(),
        Stroke::new(1.0, palette.border.to_color32()),
    );

    painter.line_segment(
        [
            to_screen(CARD_PADDING + 60.0, layout.divider_y),
            to_screen(layout.width - CARD_PADDING - 60.0, layout.divider_y),
        ],
        Stroke::new(1.5 * scale, palette.accent.to_color32()),
    );

    let family = card_font_family(layout.font);
    for run in &layout.runs {
        let align = match run.anchor {
            TextAnchor::Start => Align2::LEFT_TOP,
            TextAnchor::Middle => Align2::CENTER_TOP,
            TextAnchor::End => Align2::RIGHT_TOP,
        };
        let color = layout.color_of(run.kind).to_color32();
        let font = FontId::new(run.size * scale, family.clone());
        let pos = to_screen(run.x, run.top);

        painter.text(pos, align, &run.text, font.clone(), color);
        if run.bold {
            // Faux bold: egui has no weight axis
            painter.text(pos + Vec2::new(0.6 * scale, 0.0), align, &run.text, font, color);
        }
    }
}
