//! The exported image and its file name.

use base64::Engine;
use chrono::Utc;

/// File name prefix of every exported card.
pub const FILENAME_PREFIX: &str = "文摘";

/// A rendered card ready to be saved.
///
/// Created once per download and dropped after the sink is done with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `文摘_<millis>.png`
    pub filename: String,
    /// Encoded PNG bytes
    pub png: Vec<u8>,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
}

impl ExportArtifact {
    /// Wrap encoded PNG bytes, naming the file after `timestamp_millis`.
    pub fn new(png: Vec<u8>, width: u32, height: u32, timestamp_millis: i64) -> Self {
        Self {
            filename: generate_filename(timestamp_millis),
            png,
            width,
            height,
        }
    }

    /// PNG bytes as standard base64, without the data-URL header.
    pub fn base64_payload(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.png)
    }
}

/// `文摘_<timestamp>.png`
pub fn generate_filename(timestamp_millis: i64) -> String {
    format!("{}_{}.png", FILENAME_PREFIX, timestamp_millis)
}

/// Milliseconds since the Unix epoch.
pub fn timestamp_now() -> i64 {
    Utc::now().timestamp_millis()
}
