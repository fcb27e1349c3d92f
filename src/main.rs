// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Paper Digest - Main Entry Point
//!
//! Turns a quote, its source and an author into a styled digest card that can
//! be saved as a PNG or copied as text.

mod app;
mod card;
mod config;
mod error;
mod export;
mod fonts;
mod state;
mod ui;

use app::DigestApp;
use config::load_config;
use log::info;
use ui::get_app_icon;

/// Application name constant.
const APP_NAME: &str = "文摘生成器";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    // Load settings to get window configuration
    let settings = load_config();
    let window_size = &settings.window_size;

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([720.0, 520.0])
        .with_icon(get_app_icon());

    if let (Some(x), Some(y)) = (window_size.x, window_size.y) {
        viewport = viewport.with_position([x, y]);
    }
    if window_size.maximized {
        viewport = viewport.with_maximized(true);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(DigestApp::new(cc, settings)))),
    )
}
