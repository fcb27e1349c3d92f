//! Clipboard Operations for Plain-Text Export
//!
//! The card's text is copied as a fixed-format block. The system clipboard
//! (arboard) is tried first; when it is unavailable the text goes through
//! egui's own clipboard output instead.

// - enum_variant_names: Error variants follow standard naming convention
#![allow(clippy::enum_variant_names)]

use arboard::Clipboard;
use log::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteError(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Block
// ─────────────────────────────────────────────────────────────────────────────

/// Plain-text form of a card: raw field values, no placeholders.
pub fn plain_text_block(content: &str, source: &str, author: &str) -> String {
    format!(
        "{}\n\n出处: {}\n@视频号作者: {}",
        content, source, author
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Writers
// ─────────────────────────────────────────────────────────────────────────────

/// A destination for copied text.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// egui's clipboard output, handed to the windowing backend at frame end.
pub struct ContextClipboard {
    ctx: egui::Context,
}

impl ContextClipboard {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl ClipboardWriter for ContextClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.ctx.copy_text(text.to_owned());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// Which writer ended up holding the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyRoute {
    Primary,
    Fallback,
}

/// Primary writer with a single fallback.
pub struct ClipboardPipeline {
    primary: Box<dyn ClipboardWriter>,
    fallback: Box<dyn ClipboardWriter>,
}

impl ClipboardPipeline {
    pub fn new(primary: Box<dyn ClipboardWriter>, fallback: Box<dyn ClipboardWriter>) -> Self {
        Self { primary, fallback }
    }

    /// Copy `text`, trying the fallback once if the primary writer fails.
    pub fn copy(&mut self, text: &str) -> Result<CopyRoute, ClipboardError> {
        match self.primary.write_text(text) {
            Ok(()) => {
                debug!("Copied {} bytes to the system clipboard", text.len());
                Ok(CopyRoute::Primary)
            }
            Err(e) => {
                warn!("System clipboard failed, using fallback: {}", e);
                self.fallback.write_text(text).map(|()| CopyRoute::Fallback)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
