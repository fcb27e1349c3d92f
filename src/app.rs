//! Main application module for Paper Digest
//!
//! This module implements the eframe App trait, wiring the form and preview
//! panels to `AppState` and drawing the alert and toast overlays.

use crate::card::date;
use crate::config::{Settings, WindowSize};
use crate::export::{
    select_sink, ClipboardPipeline, ContextClipboard, ExportPipeline, RasterOptions,
    SystemClipboard, SystemFontLoader,
};
use crate::fonts;
use crate::state::AppState;
use crate::ui::{show_alert, show_form_panel, show_preview_panel, show_toasts};
use eframe::egui;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Width of the form side panel.
const FORM_PANEL_WIDTH: f32 = 360.0;

/// Window that hosts the form, the card preview and the overlays.
pub struct DigestApp {
    state: AppState,
    /// Outer window rect seen on the previous frame
    last_geometry: Option<egui::Rect>,
    started: Instant,
}

/// True when two window rects differ by more than a pixel in size or origin.
fn geometry_changed(prev: egui::Rect, next: egui::Rect) -> bool {
    (prev.size() - next.size()).length() > 1.0 || (prev.min - next.min).length() > 1.0
}

impl DigestApp {
    /// Build the app and its collaborators from the loaded settings.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing Paper Digest");

        fonts::setup_fonts(&cc.egui_ctx, &settings.fonts);
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let export = ExportPipeline::new(
            Arc::new(SystemFontLoader::new(settings.fonts.clone())),
            select_sink(&settings),
            RasterOptions {
                scale: settings.export.scale,
                transparent: true,
            },
        );
        let clipboard = ClipboardPipeline::new(
            Box::new(SystemClipboard),
            Box::new(ContextClipboard::new(cc.egui_ctx.clone())),
        );

        Self {
            state: AppState::new(settings, export, clipboard, date::today()),
            last_geometry: None,
            started: Instant::now(),
        }
    }

    /// Seconds since launch; the clock for toasts and the generate pulse.
    fn clock(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Copy the window geometry into the settings when it moved or resized.
    fn track_window(&mut self, ctx: &egui::Context) -> bool {
        let (rect, maximized) = ctx.input(|i| {
            let vp = i.viewport();
            (vp.outer_rect, vp.maximized.unwrap_or(false))
        });
        let Some(rect) = rect else {
            return false;
        };
        if self
            .last_geometry
            .is_some_and(|prev| !geometry_changed(prev, rect))
        {
            return false;
        }
        self.last_geometry = Some(rect);

        self.state.settings.window_size = WindowSize {
            width: rect.width(),
            height: rect.height(),
            x: Some(rect.min.x),
            y: Some(rect.min.y),
            maximized,
        };
        debug!(
            "Window now {:.0}x{:.0} at ({:.0}, {:.0}){}",
            rect.width(),
            rect.height(),
            rect.min.x,
            rect.min.y,
            if maximized { ", maximized" } else { "" }
        );
        true
    }

    /// Draw both panels and apply the events they produced.
    fn render_ui(&mut self, ctx: &egui::Context, now: f64) {
        let interactive = self.state.alert().is_none();
        let download_enabled = self.state.download_enabled();

        let events = egui::SidePanel::left("form_panel")
            .resizable(false)
            .exact_width(FORM_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.add_enabled_ui(interactive, |ui| {
                    egui::ScrollArea::vertical()
                        .show(ui, |ui| {
                            show_form_panel(ui, &self.state.form, download_enabled)
                        })
                        .inner
                })
                .inner
            })
            .inner;

        let pulse_scale = self.state.card_scale(now);
        egui::CentralPanel::default().show(ctx, |ui| {
            show_preview_panel(ui, self.state.preview(), pulse_scale);
        });

        for event in events {
            self.state.handle(event, now);
        }

        let mut dismissed = false;
        if let Some(message) = self.state.alert() {
            dismissed = show_alert(ctx, message);
        }
        if dismissed {
            self.state.dismiss_alert();
        }

        show_toasts(ctx, &self.state.notifications, now);
    }
}

impl eframe::App for DigestApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.clock();

        self.state.set_today(date::today());
        self.state.poll(now);

        if self.track_window(ctx) {
            self.state.mark_settings_dirty();
        }

        self.render_ui(ctx, now);

        // font loader poll, toast slides, pulse
        if self.state.is_animating(now) {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Closing, flushing settings");
        self.state.shutdown();
    }

    /// eframe's periodic autosave hook; settings live in our own file.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.state.save_settings_if_dirty();
    }
}
