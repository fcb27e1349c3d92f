//! Blocking alert dialog.
//!
//! While an alert is open the rest of the window is covered by a dimmed
//! backdrop that swallows clicks, so the form cannot be used until the alert
//! is acknowledged.

use eframe::egui::{self, Color32, Key, RichText};

/// Button label of the alert.
pub const ALERT_CONFIRM: &str = "确定";

/// Draw the alert. Returns `true` once the user dismisses it.
pub fn show_alert(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = ctx.input(|i| i.key_pressed(Key::Escape) || i.key_pressed(Key::Enter));

    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("alert_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let (rect, _response) = ui.allocate_exact_size(screen.size(), egui::Sense::click());
            ui.painter()
                .rect_filled(rect, 0.0, Color32::from_black_alpha(96));
        });

    let is_dark = ctx.style().visuals.dark_mode;
    let (bg_color, border_color) = if is_dark {
        (Color32::from_rgb(45, 45, 50), Color32::from_rgb(70, 70, 80))
    } else {
        (Color32::from_rgb(252, 252, 252), Color32::from_rgb(200, 200, 200))
    };

    egui::Window::new("提示")
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, border_color))
                .rounding(8.0),
        )
        .show(ctx, |ui| {
            ui.set_min_width(280.0);
            ui.add_space(8.0);
            ui.label(RichText::new(message).size(16.0));
            ui.add_space(16.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(ALERT_CONFIRM).clicked() {
                    dismissed = true;
                }
            });
            ui.add_space(4.0);
        });

    dismissed
}
