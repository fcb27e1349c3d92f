//! UI components for Paper Digest
//!
//! This module contains the form, the card preview and the overlays
//! (alert and toasts) drawn on top of them.

mod alert;
mod form_panel;
mod icons;
mod preview_panel;
mod toast;

pub use alert::show_alert;
pub use form_panel::show_form_panel;
pub use icons::get_app_icon;
pub use preview_panel::show_preview_panel;
pub use toast::{show_toasts, Notifications, Severity};
