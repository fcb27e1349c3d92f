//! Application state management for Paper Digest
//!
//! This module defines the central `AppState` struct that owns the form, the
//! derived card preview, notifications and the export collaborators. The UI
//! never mutates these directly; it emits `FormEvent`s which are applied here.

use crate::card::{Background, CardFont, FormState, PreviewState, ValidationError};
use crate::config::{save_config_silent, Settings};
use crate::export::sink::SAVE_CANCELLED;
use crate::export::{plain_text_block, ClipboardPipeline, ExportOutcome, ExportPipeline, LoadEvent};
use crate::ui::{Notifications, Severity};
use chrono::NaiveDate;
use log::{debug, info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// User-facing Messages
// ─────────────────────────────────────────────────────────────────────────────

pub const MSG_GENERATED: &str = "文摘生成成功！";
pub const MSG_PREPARING: &str = "正在准备下载功能...";
pub const MSG_READY: &str = "下载功能已准备就绪，请再次点击下载按钮";
pub const MSG_LOAD_FAILED: &str = "下载功能加载失败，请检查字体配置";
pub const MSG_DOWNLOAD_FAILED: &str = "下载失败，请重试";
pub const MSG_COPIED: &str = "内容已复制到剪贴板！";
pub const MSG_COPY_FAILED: &str = "复制失败，请手动复制";

// ─────────────────────────────────────────────────────────────────────────────
// Form Events
// ─────────────────────────────────────────────────────────────────────────────

/// One user interaction with a form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Background selector changed
    BackgroundChanged(Background),
    /// Font selector changed
    FontChanged(CardFont),
    /// Date field changed (raw text)
    DateChanged(String),
    /// Content field edited
    ContentEdited(String),
    /// Source field edited
    SourceEdited(String),
    /// Author field edited
    AuthorEdited(String),
    /// "生成文摘" clicked
    Generate,
    /// "下载图片" clicked
    Download,
    /// "复制内容" clicked
    Copy,
}

// ─────────────────────────────────────────────────────────────────────────────
// Generate Pulse
// ─────────────────────────────────────────────────────────────────────────────

/// Length of the scale pulse after a successful generate (seconds).
pub const PULSE_DURATION: f64 = 0.3;
/// Card scale while the pulse is active.
pub const PULSE_SCALE: f32 = 1.05;

/// Short scale-up of the card confirming a generate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    started_at: f64,
}

impl Pulse {
    pub fn new(started_at: f64) -> Self {
        Self { started_at }
    }

    pub fn is_active(&self, now: f64) -> bool {
        let age = now - self.started_at;
        (0.0..PULSE_DURATION).contains(&age)
    }

    /// Card scale factor at `now`.
    pub fn scale(&self, now: f64) -> f32 {
        if self.is_active(now) {
            PULSE_SCALE
        } else {
            1.0
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state.
pub struct AppState {
    /// What the user typed
    pub form: FormState,
    /// Card as currently shown, always derived from `form`
    preview: PreviewState,
    /// Live toasts
    pub notifications: Notifications,
    /// Active generate pulse
    pulse: Option<Pulse>,
    /// Blocking alert message
    alert: Option<String>,
    /// User settings (loaded from config)
    pub settings: Settings,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
    /// Date used when the date field is empty
    today: NaiveDate,
    export: ExportPipeline,
    clipboard: ClipboardPipeline,
}

impl AppState {
    /// Build the state for a new session.
    ///
    /// The form starts from the first-launch defaults, then takes the
    /// remembered style and, if enabled, the remembered source and author.
    pub fn new(
        settings: Settings,
        export: ExportPipeline,
        clipboard: ClipboardPipeline,
        today: NaiveDate,
    ) -> Self {
        let mut form = FormState::with_defaults(today);
        form.background = settings.background;
        form.font = settings.font;

        if settings.remember_form {
            if let Some(source) = settings.last_source.as_ref().filter(|s| !s.is_empty()) {
                form.source = source.clone();
            }
            if let Some(author) = settings.last_author.as_ref().filter(|s| !s.is_empty()) {
                form.author = author.clone();
            }
        }

        let (preview, date_result) = PreviewState::from_form(&form, today);
        if let Err(e) = date_result {
            warn!("Initial date rejected: {}", e);
        }

        info!(
            "AppState initialized (card: \"{}\", text: {})",
            preview.container_classes().to_attribute(),
            preview.font().class_name()
        );

        Self {
            form,
            preview,
            notifications: Notifications::new(f64::from(settings.notification_secs)),
            pulse: None,
            alert: None,
            settings,
            settings_dirty: false,
            today,
            export,
            clipboard,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply one form event at time `now` (seconds since app start).
    pub fn handle(&mut self, event: FormEvent, now: f64) {
        debug!("Form event: {:?}", event);
        match event {
            FormEvent::BackgroundChanged(background) => {
                self.form.background = background;
                self.preview.apply_background(background);
                self.settings.background = background;
                self.settings_dirty = true;
            }
            FormEvent::FontChanged(font) => {
                self.form.font = font;
                self.preview.apply_font(font);
                self.settings.font = font;
                self.settings_dirty = true;
            }
            FormEvent::DateChanged(value) => {
                self.form.date = value;
                if let Err(e) = self.preview.apply_date(&self.form.date, self.today) {
                    debug!("{}", e);
                }
            }
            FormEvent::ContentEdited(value) => {
                self.form.content = value;
                self.preview.render_preview(&self.form);
            }
            FormEvent::SourceEdited(value) => {
                self.form.source = value;
                self.preview.render_preview(&self.form);
                self.settings_dirty |= self.settings.remember_form;
            }
            FormEvent::AuthorEdited(value) => {
                self.form.author = value;
                self.preview.render_preview(&self.form);
                self.settings_dirty |= self.settings.remember_form;
            }
            FormEvent::Generate => self.generate(now),
            FormEvent::Download => self.download(now),
            FormEvent::Copy => self.copy(now),
        }
    }

    /// Validate, re-render and pulse the card.
    fn generate(&mut self, now: f64) {
        if let Err(e) = self.form.validate() {
            self.show_alert(e.message());
            return;
        }

        if self.preview.sync(&self.form, self.today).is_err() {
            self.show_alert(ValidationError::InvalidDate.message());
            return;
        }

        self.pulse = Some(Pulse::new(now));
        self.notifications
            .notify(MSG_GENERATED, Severity::Success, now);
    }

    /// Advance the export state machine by one click.
    fn download(&mut self, now: f64) {
        if !self.preview.date_valid() {
            self.notifications.notify(
                ValidationError::InvalidDate.message(),
                Severity::Error,
                now,
            );
            return;
        }

        match self.export.request(&self.preview) {
            ExportOutcome::LoadStarted | ExportOutcome::StillLoading => {
                self.notifications.notify(MSG_PREPARING, Severity::Info, now);
            }
            ExportOutcome::Delivered(message) => {
                let severity = if message == SAVE_CANCELLED {
                    Severity::Info
                } else {
                    Severity::Success
                };
                self.notifications.notify(message, severity, now);
            }
            ExportOutcome::Failed(e) => {
                warn!("Download failed: {}", e);
                self.notifications
                    .notify(MSG_DOWNLOAD_FAILED, Severity::Error, now);
            }
        }
    }

    /// Copy the raw field values as a text block.
    fn copy(&mut self, now: f64) {
        let text = plain_text_block(&self.form.content, &self.form.source, &self.form.author);
        match self.clipboard.copy(&text) {
            Ok(route) => {
                debug!("Copied via {:?}", route);
                self.notifications.notify(MSG_COPIED, Severity::Success, now);
            }
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.notifications
                    .notify(MSG_COPY_FAILED, Severity::Error, now);
            }
        }
    }

    /// Per-frame housekeeping: background load results and toast expiry.
    pub fn poll(&mut self, now: f64) {
        match self.export.poll() {
            Some(LoadEvent::Ready { faces }) => {
                debug!("Rasterizer ready ({} faces)", faces);
                self.notifications.notify(MSG_READY, Severity::Success, now);
            }
            Some(LoadEvent::Failed(e)) => {
                warn!("Rasterizer unavailable: {}", e);
                self.notifications
                    .notify(MSG_LOAD_FAILED, Severity::Error, now);
            }
            None => {}
        }

        if self.pulse.is_some_and(|p| !p.is_active(now)) {
            self.pulse = None;
        }
        self.notifications.prune(now);
    }

    /// Update the fallback date, e.g. after midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        if today == self.today {
            return;
        }
        self.today = today;
        if self.form.date.is_empty() {
            if let Err(e) = self.preview.apply_date("", today) {
                debug!("Date not refreshed: {}", e);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Card scale for the generate pulse.
    pub fn card_scale(&self, now: f64) -> f32 {
        self.pulse.map_or(1.0, |p| p.scale(now))
    }

    /// Whether the download button should accept clicks.
    pub fn download_enabled(&self) -> bool {
        !self.export.is_loading()
    }

    /// Whether anything on screen is time-driven.
    pub fn is_animating(&self, now: f64) -> bool {
        self.pulse.is_some_and(|p| p.is_active(now))
            || !self.notifications.is_empty()
            || self.export.is_loading()
    }

    pub fn export_state(&self) -> &'static str {
        self.export.state_label()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Alert
    // ─────────────────────────────────────────────────────────────────────────

    pub fn show_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("Alert: {}", message);
        self.alert = Some(message);
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Persistence
    // ─────────────────────────────────────────────────────────────────────────

    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Copy the remembered form fields into the settings.
    fn remember_form(&mut self) {
        if self.settings.remember_form {
            self.settings.last_source = Some(self.form.source.clone());
            self.settings.last_author = Some(self.form.author.clone());
        }
    }

    /// Save settings to the config file if they changed.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            self.remember_form();
            if save_config_silent(&self.settings) {
                self.settings_dirty = false;
                info!("Settings saved");
                return true;
            }
            warn!("Failed to save settings");
        }
        false
    }

    /// Save state on shutdown.
    pub fn shutdown(&mut self) {
        info!("Shutting down, export state: {}", self.export_state());
        self.mark_settings_dirty();
        self.save_settings_if_dirty();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::preview::INVALID_DATE_TEXT;
    use crate::card::preview::ElementKind;
    use crate::export::clipboard::tests::FakeWriter;
    use crate::export::pipeline::tests::{pipeline, wait_for_load, MemorySink};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    fn state_with(
        settings: Settings,
        sink: MemorySink,
        fail_load: bool,
        clipboard: ClipboardPipeline,
    ) -> AppState {
        AppState::new(settings, pipeline(fail_load, sink), clipboard, today())
    }

    fn state() -> (AppState, Rc<RefCell<Vec<String>>>) {
        let written = Rc::default();
        let clipboard = ClipboardPipeline::new(FakeWriter::ok(&written), FakeWriter::failing());
        let state = state_with(Settings::default(), MemorySink::default(), false, clipboard);
        (state, written)
    }

    fn last_message(state: &AppState) -> (String, Severity) {
        let toast = state.notifications.last().expect("no toast");
        (toast.message.clone(), toast.severity)
    }

    fn poll_until_ready(state: &mut AppState) {
        let event = wait_for_load(&mut state.export);
        // Feed the event back through the same path the UI uses
        match event {
            LoadEvent::Ready { .. } => {
                state.notifications.notify(MSG_READY, Severity::Success, 0.0)
            }
            LoadEvent::Failed(_) => {
                state
                    .notifications
                    .notify(MSG_LOAD_FAILED, Severity::Error, 0.0)
            }
        };
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Startup
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_new_uses_defaults_and_settings() {
        let mut settings = Settings::default();
        settings.background = Background::Sakura;
        settings.font = CardFont::Kuaile;
        settings.last_source = Some("《论语》".to_string());
        settings.last_author = Some("小明".to_string());

        let written = Rc::default();
        let clipboard = ClipboardPipeline::new(FakeWriter::ok(&written), FakeWriter::failing());
        let state = state_with(settings, MemorySink::default(), false, clipboard);

        assert_eq!(state.form.background, Background::Sakura);
        assert_eq!(state.form.source, "《论语》");
        assert_eq!(state.preview().background(), Background::Sakura);
        assert_eq!(state.preview().font(), CardFont::Kuaile);
        assert_eq!(state.preview().text(ElementKind::Author), "@小明");
        assert_eq!(state.preview().text(ElementKind::Date), "2025年01月02日");
    }

    #[test]
    fn test_remember_form_disabled_ignores_saved_fields() {
        let mut settings = Settings::default();
        settings.remember_form = false;
        settings.last_source = Some("《论语》".to_string());

        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let state = state_with(settings, MemorySink::default(), false, clipboard);

        assert_eq!(state.form.source, crate::card::form::DEFAULT_SOURCE);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input Binding
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_edits_update_preview() {
        let (mut state, _) = state();
        state.handle(FormEvent::ContentEdited(String::new()), 0.0);
        state.handle(FormEvent::SourceEdited("《岳阳楼记》".to_string()), 0.0);

        assert_eq!(
            state.preview().text(ElementKind::Text),
            crate::card::preview::CONTENT_PLACEHOLDER
        );
        assert_eq!(state.preview().text(ElementKind::Source), "——《岳阳楼记》");
    }

    #[test]
    fn test_preview_matches_form_after_any_events() {
        let (mut state, _) = state();
        let events = [
            FormEvent::FontChanged(CardFont::Mashan),
            FormEvent::BackgroundChanged(Background::Ink),
            FormEvent::DateChanged("2024-03-05".to_string()),
            FormEvent::AuthorEdited("作者".to_string()),
            FormEvent::FontChanged(CardFont::Kuaile),
            FormEvent::FontChanged(CardFont::Kuaile),
        ];
        for event in events {
            state.handle(event, 0.0);
        }

        let (expected, _) = PreviewState::from_form(&state.form, today());
        assert_eq!(state.preview(), &expected);
    }

    #[test]
    fn test_invalid_date_marks_card() {
        let (mut state, _) = state();
        state.handle(FormEvent::DateChanged("2024-13-01".to_string()), 0.0);

        assert_eq!(state.preview().text(ElementKind::Date), INVALID_DATE_TEXT);
        assert!(state.alert().is_none());
    }

    #[test]
    fn test_style_changes_mark_settings() {
        let (mut state, _) = state();
        state.handle(FormEvent::BackgroundChanged(Background::Mint), 0.0);
        assert_eq!(state.settings.background, Background::Mint);
        assert!(state.settings_dirty);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Generate
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_generate_success_pulses_and_notifies() {
        let (mut state, _) = state();
        state.handle(FormEvent::Generate, 1.0);

        assert!(state.alert().is_none());
        assert_eq!(state.card_scale(1.1), PULSE_SCALE);
        assert_eq!(state.card_scale(1.4), 1.0);
        assert_eq!(
            last_message(&state),
            (MSG_GENERATED.to_string(), Severity::Success)
        );
    }

    #[test]
    fn test_generate_blocked_by_first_empty_field() {
        let (mut state, _) = state();
        state.handle(FormEvent::SourceEdited("  ".to_string()), 0.0);
        state.handle(FormEvent::AuthorEdited(String::new()), 0.0);
        state.handle(FormEvent::Generate, 0.0);

        assert_eq!(state.alert(), Some("请输入出处！"));
        assert!(state.notifications.is_empty());
        assert_eq!(state.card_scale(0.1), 1.0);

        state.dismiss_alert();
        assert!(state.alert().is_none());
    }

    #[test]
    fn test_generate_blocked_by_empty_content() {
        let (mut state, _) = state();
        state.handle(FormEvent::ContentEdited(" \n ".to_string()), 0.0);
        state.handle(FormEvent::Generate, 0.0);

        assert_eq!(state.alert(), Some("请输入文摘内容！"));
        assert!(state.notifications.is_empty());
        assert_eq!(state.card_scale(0.1), 1.0);
    }

    #[test]
    fn test_generate_blocked_by_invalid_date() {
        let (mut state, _) = state();
        state.handle(FormEvent::DateChanged("not a date".to_string()), 0.0);
        state.handle(FormEvent::Generate, 0.0);

        assert_eq!(state.alert(), Some(ValidationError::InvalidDate.message()));
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_pulse_window() {
        let pulse = Pulse::new(2.0);
        assert!(!pulse.is_active(1.9));
        assert!(pulse.is_active(2.0));
        assert!(pulse.is_active(2.29));
        assert!(!pulse.is_active(2.3));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Download
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_first_download_only_prepares() {
        let sink = MemorySink::default();
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let mut state = state_with(Settings::default(), sink.clone(), false, clipboard);

        state.handle(FormEvent::Download, 0.0);

        assert_eq!(
            last_message(&state),
            (MSG_PREPARING.to_string(), Severity::Info)
        );
        assert!(sink.artifacts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_second_download_delivers() {
        let sink = MemorySink::default();
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let mut state = state_with(Settings::default(), sink.clone(), false, clipboard);

        state.handle(FormEvent::Download, 0.0);
        poll_until_ready(&mut state);
        assert!(state.download_enabled());
        assert_eq!(state.export_state(), "ready");

        state.handle(FormEvent::Download, 1.0);
        assert_eq!(last_message(&state), ("saved".to_string(), Severity::Success));
        assert_eq!(sink.artifacts.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_download_with_control_characters_in_content() {
        let sink = MemorySink::default();
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let mut state = state_with(Settings::default(), sink.clone(), false, clipboard);
        state.handle(FormEvent::ContentEdited("第一行\u{000C}第二行".to_string()), 0.0);

        state.handle(FormEvent::Download, 0.0);
        poll_until_ready(&mut state);
        state.handle(FormEvent::Download, 1.0);

        assert_eq!(last_message(&state), ("saved".to_string(), Severity::Success));
        assert_eq!(sink.artifacts.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_poll_reports_ready() {
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let mut state = state_with(Settings::default(), MemorySink::default(), false, clipboard);
        state.handle(FormEvent::Download, 0.0);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while state.export_state() != "ready" {
            assert!(std::time::Instant::now() < deadline, "load timed out");
            state.poll(0.5);
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        assert_eq!(
            last_message(&state),
            (MSG_READY.to_string(), Severity::Success)
        );
    }

    #[test]
    fn test_poll_reports_load_failure() {
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let mut state = state_with(Settings::default(), MemorySink::default(), true, clipboard);
        state.handle(FormEvent::Download, 0.0);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            state.poll(0.5);
            if state
                .notifications
                .last()
                .is_some_and(|t| t.message == MSG_LOAD_FAILED)
            {
                break;
            }
            assert!(std::time::Instant::now() < deadline, "load timed out");
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        assert_eq!(state.export_state(), "no-rasterizer");
        assert!(state.download_enabled());
    }

    #[test]
    fn test_download_failure_notifies() {
        let sink = MemorySink {
            fail: true,
            ..MemorySink::default()
        };
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let mut state = state_with(Settings::default(), sink, false, clipboard);

        state.handle(FormEvent::Download, 0.0);
        poll_until_ready(&mut state);
        state.handle(FormEvent::Download, 1.0);

        assert_eq!(
            last_message(&state),
            (MSG_DOWNLOAD_FAILED.to_string(), Severity::Error)
        );
    }

    #[test]
    fn test_download_refused_with_invalid_date() {
        let sink = MemorySink::default();
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let mut state = state_with(Settings::default(), sink, false, clipboard);

        state.handle(FormEvent::DateChanged("2024-02-30".to_string()), 0.0);
        state.handle(FormEvent::Download, 0.0);

        assert_eq!(last_message(&state).1, Severity::Error);
        assert_eq!(state.export_state(), "no-rasterizer");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Copy
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_copy_uses_raw_values() {
        let (mut state, written) = state();
        state.handle(FormEvent::ContentEdited("山高水长".to_string()), 0.0);
        state.handle(FormEvent::SourceEdited(String::new()), 0.0);
        state.handle(FormEvent::AuthorEdited("小林".to_string()), 0.0);
        state.handle(FormEvent::Copy, 0.0);

        assert_eq!(
            written.borrow().as_slice(),
            ["山高水长\n\n出处: \n@视频号作者: 小林"]
        );
        assert_eq!(
            last_message(&state),
            (MSG_COPIED.to_string(), Severity::Success)
        );
    }

    #[test]
    fn test_copy_fallback_still_succeeds() {
        let written = Rc::default();
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::ok(&written));
        let mut state = state_with(Settings::default(), MemorySink::default(), false, clipboard);

        state.handle(FormEvent::Copy, 0.0);

        assert_eq!(written.borrow().len(), 1);
        assert_eq!(last_message(&state).0, MSG_COPIED);
    }

    #[test]
    fn test_copy_failure_notifies() {
        let clipboard = ClipboardPipeline::new(FakeWriter::failing(), FakeWriter::failing());
        let mut state = state_with(Settings::default(), MemorySink::default(), false, clipboard);

        state.handle(FormEvent::Copy, 0.0);

        assert_eq!(
            last_message(&state),
            (MSG_COPY_FAILED.to_string(), Severity::Error)
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Misc
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_set_today_refreshes_empty_date() {
        let (mut state, _) = state();
        state.handle(FormEvent::DateChanged(String::new()), 0.0);
        state.set_today(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(state.preview().text(ElementKind::Date), "2025年01月03日");
    }

    #[test]
    fn test_is_animating() {
        let (mut state, _) = state();
        assert!(!state.is_animating(0.0));
        state.handle(FormEvent::Generate, 0.0);
        assert!(state.is_animating(0.1));
        state.poll(100.0);
        assert!(!state.is_animating(100.0));
    }
}
