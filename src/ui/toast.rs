//! Toast notifications.
//!
//! Each toast is timed independently from its creation: it waits briefly,
//! slides in from the right edge, stays, slides out and is dropped. There is
//! no cap on how many can be alive at once.

use eframe::egui::{self, Align2, Color32, RichText};

/// Delay before a new toast starts sliding in (seconds).
pub const ENTER_DELAY: f64 = 0.1;
/// Duration of the slide in and slide out (seconds).
pub const SLIDE_DURATION: f64 = 0.3;
/// Default time from creation until the toast starts leaving (seconds).
pub const DEFAULT_HOLD: f64 = 3.0;

const TOAST_MAX_WIDTH: f32 = 300.0;
const TOAST_MARGIN: f32 = 20.0;
const TOAST_SPACING: f32 = 10.0;
/// Height estimate used to stack toasts.
const TOAST_SLOT_HEIGHT: f32 = 52.0;

// ─────────────────────────────────────────────────────────────────────────────
// Model
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of feedback a toast carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// Fill color of the toast.
    pub fn color(&self) -> Color32 {
        match self {
            Severity::Success => Color32::from_rgb(0x4C, 0xAF, 0x50),
            Severity::Error => Color32::from_rgb(0xF4, 0x43, 0x36),
            Severity::Info => Color32::from_rgb(0x21, 0x96, 0xF3),
        }
    }
}

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Created, still off screen
    Pending,
    /// Sliding in
    Entering,
    /// Fully on screen
    Shown,
    /// Sliding out
    Leaving,
    /// Gone; removed on the next prune
    Expired,
}

/// One notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: f64,
}

impl Toast {
    /// Lifecycle phase at `now`, given the hold time.
    pub fn phase(&self, now: f64, hold: f64) -> ToastPhase {
        let age = now - self.created_at;
        if age < ENTER_DELAY {
            ToastPhase::Pending
        } else if age < ENTER_DELAY + SLIDE_DURATION {
            ToastPhase::Entering
        } else if age < hold {
            ToastPhase::Shown
        } else if age < hold + SLIDE_DURATION {
            ToastPhase::Leaving
        } else {
            ToastPhase::Expired
        }
    }

    /// Horizontal offset as a fraction of the toast width: 1.0 is fully off
    /// screen to the right, 0.0 fully visible.
    pub fn slide_offset(&self, now: f64, hold: f64) -> f32 {
        let age = now - self.created_at;
        let offset = match self.phase(now, hold) {
            ToastPhase::Pending | ToastPhase::Expired => 1.0,
            ToastPhase::Entering => 1.0 - (age - ENTER_DELAY) / SLIDE_DURATION,
            ToastPhase::Shown => 0.0,
            ToastPhase::Leaving => (age - hold) / SLIDE_DURATION,
        };
        offset.clamp(0.0, 1.0) as f32
    }
}

/// All live toasts.
#[derive(Debug, Clone)]
pub struct Notifications {
    entries: Vec<Toast>,
    next_id: u64,
    hold: f64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD)
    }
}

impl Notifications {
    /// Toasts stay `hold` seconds from creation before leaving.
    pub fn new(hold: f64) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            hold: hold.max(ENTER_DELAY + SLIDE_DURATION),
        }
    }

    /// Add a toast created at `now`; returns its id.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            message: message.into(),
            severity,
            created_at: now,
        });
        id
    }

    /// Drop every expired toast.
    pub fn prune(&mut self, now: f64) {
        let hold = self.hold;
        self.entries
            .retain(|t| t.phase(now, hold) != ToastPhase::Expired);
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    pub fn hold(&self) -> f64 {
        self.hold
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent toast, if any.
    #[cfg(test)]
    pub fn last(&self) -> Option<&Toast> {
        self.entries.last()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Draw every live toast in the top-right corner, oldest on top.
///
/// Requests repaints while any toast is alive so animations keep running.
pub fn show_toasts(ctx: &egui::Context, notifications: &Notifications, now: f64) {
    if notifications.is_empty() {
        return;
    }

    let hold = notifications.hold();
    for (slot, toast) in notifications.entries().iter().enumerate() {
        let offset = toast.slide_offset(now, hold);
        if offset >= 1.0 {
            continue;
        }

        let x = -TOAST_MARGIN + offset * (TOAST_MAX_WIDTH + TOAST_MARGIN * 2.0);
        let y = TOAST_MARGIN + slot as f32 * (TOAST_SLOT_HEIGHT + TOAST_SPACING);

        egui::Area::new(egui::Id::new(("toast", toast.id)))
            .anchor(Align2::RIGHT_TOP, egui::vec2(x, y))
            .order(egui::Order::Tooltip)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(toast.severity.color())
                    .rounding(5.0)
                    .inner_margin(egui::Margin::symmetric(20.0, 15.0))
                    .show(ui, |ui| {
                        ui.set_max_width(TOAST_MAX_WIDTH);
                        ui.label(
                            RichText::new(&toast.message)
                                .color(Color32::WHITE)
                                .strong(),
                        );
                    });
            });
    }

    ctx.request_repaint();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_timeline() {
        let toast = Toast {
            id: 0,
            message: "ok".to_string(),
            severity: Severity::Success,
            created_at: 10.0,
        };
        assert_eq!(toast.phase(10.05, 3.0), ToastPhase::Pending);
        assert_eq!(toast.phase(10.2, 3.0), ToastPhase::Entering);
        assert_eq!(toast.phase(11.0, 3.0), ToastPhase::Shown);
        assert_eq!(toast.phase(13.1, 3.0), ToastPhase::Leaving);
        assert_eq!(toast.phase(13.4, 3.0), ToastPhase::Expired);
    }

    #[test]
    fn test_slide_offset() {
        let toast = Toast {
            id: 0,
            message: "ok".to_string(),
            severity: Severity::Info,
            created_at: 0.0,
        };
        assert_eq!(toast.slide_offset(0.0, 3.0), 1.0);
        assert!((toast.slide_offset(0.25, 3.0) - 0.5).abs() < 1e-4);
        assert_eq!(toast.slide_offset(1.0, 3.0), 0.0);
        assert!((toast.slide_offset(3.15, 3.0) - 0.5).abs() < 1e-4);
        assert_eq!(toast.slide_offset(5.0, 3.0), 1.0);
    }

    #[test]
    fn test_notify_and_prune() {
        let mut notifications = Notifications::default();
        let a = notifications.notify("first", Severity::Info, 0.0);
        let b = notifications.notify("second", Severity::Error, 2.0);
        assert_ne!(a, b);
        assert_eq!(notifications.entries().len(), 2);

        notifications.prune(3.5);
        assert_eq!(notifications.entries().len(), 1);
        assert_eq!(notifications.last().unwrap().message, "second");

        notifications.prune(10.0);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_no_cap_on_concurrent_toasts() {
        let mut notifications = Notifications::default();
        for i in 0..50 {
            notifications.notify(format!("toast {i}"), Severity::Info, 0.0);
        }
        notifications.prune(1.0);
        assert_eq!(notifications.entries().len(), 50);
    }

    #[test]
    fn test_hold_has_a_floor() {
        let notifications = Notifications::new(0.0);
        assert!(notifications.hold() >= ENTER_DELAY + SLIDE_DURATION);
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Success.color(), Color32::from_rgb(76, 175, 80));
        assert_eq!(Severity::Error.color(), Color32::from_rgb(244, 67, 54));
        assert_eq!(Severity::Info.color(), Color32::from_rgb(33, 150, 243));
    }
}
