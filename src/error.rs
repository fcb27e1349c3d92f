//! Centralized error handling for Paper Digest
//!
//! One error type covers settings persistence, date parsing, font loading,
//! rasterization and image delivery. Form validation has its own
//! `card::form::ValidationError` because it never leaves the generate action.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong outside the form itself.
#[derive(Debug)]
pub enum Error {
    /// Bare I/O failure
    Io(io::Error),

    /// An exported image could not be written
    FileWrite { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────
    /// `config.json` exists but could not be read
    ConfigLoad { path: PathBuf, source: BoxedSource },

    /// Settings could not be written
    ConfigSave { path: PathBuf, source: BoxedSource },

    /// `config.json` is not valid settings JSON
    ConfigParse {
        message: String,
        source: Option<BoxedSource>,
    },

    /// The platform has no config directory (e.g. `HOME` unset)
    ConfigDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Card
    // ─────────────────────────────────────────────────────────────────────────
    /// The date field is not a real `YYYY-MM-DD` calendar date
    InvalidDate { input: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────
    /// The rasterizer font database could not be built
    FontLoad(String),

    /// The card SVG could not be parsed or rendered
    Rasterize(String),

    /// PNG encoding failed
    ImageEncode(image::ImageError),

    /// The host save bridge rejected the image
    HostSave(String),

    /// No directory to download into
    DownloadDirNotFound,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageEncode(err)
    }
}

impl From<resvg::usvg::Error> for Error {
    fn from(err: resvg::usvg::Error) -> Self {
        Error::Rasterize(err.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            Error::ConfigLoad { path, source } => {
                write!(f, "Cannot read settings '{}': {}", path.display(), source)
            }
            Error::ConfigSave { path, source } => {
                write!(f, "Cannot save settings '{}': {}", path.display(), source)
            }
            Error::ConfigParse { message, .. } => write!(f, "Invalid settings: {}", message),
            Error::ConfigDirNotFound => f.write_str("Configuration directory not found"),
            Error::InvalidDate { input } => {
                write!(f, "Invalid date '{}', expected YYYY-MM-DD", input)
            }
            Error::FontLoad(msg) => write!(f, "Failed to load fonts: {}", msg),
            Error::Rasterize(msg) => write!(f, "Failed to rasterize card: {}", msg),
            Error::ImageEncode(err) => write!(f, "Failed to encode PNG: {}", err),
            Error::HostSave(msg) => write!(f, "Host save failed: {}", msg),
            Error::DownloadDirNotFound => f.write_str("Download directory not found"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileWrite { source, .. } => Some(source),
            Error::ConfigLoad { source, .. } | Error::ConfigSave { source, .. } => {
                Some(source.as_ref())
            }
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::ImageEncode(err) => Some(err),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation
// ─────────────────────────────────────────────────────────────────────────────

/// Fall back to a default value instead of failing.
pub trait ResultExt<T> {
    /// On error, log a warning with `context` and return `default`.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        self.unwrap_or_else(|err| {
            warn!("{}: {}. Using default.", context, err);
            default
        })
    }
}
