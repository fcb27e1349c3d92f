//! Where exported images go.
//!
//! The output route is chosen once at startup. When a host bridge is
//! available the user picks the location through it; otherwise, or when
//! the bridge fails, the image is written straight into the download
//! directory.

use super::artifact::ExportArtifact;
use crate::config::Settings;
use crate::error::{Error, Result};
use base64::Engine;
use log::{info, warn};
use rfd::FileDialog;
use std::fs;
use std::path::{Path, PathBuf};

/// Message reported after a direct download.
pub const DOWNLOAD_SUCCESS: &str = "图片下载成功！";
/// Message reported when the user dismisses the save dialog.
pub const SAVE_CANCELLED: &str = "已取消保存";

// ─────────────────────────────────────────────────────────────────────────────
// Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Final destination of an export.
pub trait ExportSink {
    /// Persist `artifact`, returning the message shown to the user.
    fn deliver(&self, artifact: &ExportArtifact) -> Result<String>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// A native host that can save files on the application's behalf.
pub trait HostBridge {
    /// Save `base64_payload` (decoded) under a name derived from `filename`.
    fn save_file(&self, filename: &str, base64_payload: &str) -> Result<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Download Sink
// ─────────────────────────────────────────────────────────────────────────────

/// Writes images into a fixed directory.
#[derive(Debug, Clone)]
pub struct DownloadSink {
    dir: PathBuf,
    open_after: bool,
}

impl DownloadSink {
    pub fn new(dir: PathBuf, open_after: bool) -> Self {
        Self { dir, open_after }
    }
}

impl ExportSink for DownloadSink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<String> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.filename);
        fs::write(&path, &artifact.png).map_err(|source| Error::FileWrite {
            path: path.clone(),
            source,
        })?;

        info!("Saved card image to {}", path.display());
        open_if_requested(&path, self.open_after);
        Ok(DOWNLOAD_SUCCESS.to_string())
    }

    fn name(&self) -> &'static str {
        "download"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Sink
// ─────────────────────────────────────────────────────────────────────────────

/// Hands images to a `HostBridge`, falling back to a direct download when
/// the bridge fails.
pub struct HostSink<B: HostBridge> {
    bridge: B,
    fallback: DownloadSink,
}

impl<B: HostBridge> HostSink<B> {
    pub fn new(bridge: B, fallback: DownloadSink) -> Self {
        Self { bridge, fallback }
    }
}

impl<B: HostBridge> ExportSink for HostSink<B> {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<String> {
        match self
            .bridge
            .save_file(&artifact.filename, &artifact.base64_payload())
        {
            Ok(message) => Ok(message),
            Err(e) => {
                warn!("Host save failed, falling back to download: {}", e);
                self.fallback.deliver(artifact)
            }
        }
    }

    fn name(&self) -> &'static str {
        "host"
    }
}

/// Native save dialog acting as the host bridge.
#[derive(Debug, Clone)]
pub struct DialogBridge {
    initial_dir: Option<PathBuf>,
    open_after: bool,
}

impl DialogBridge {
    pub fn new(initial_dir: Option<PathBuf>, open_after: bool) -> Self {
        Self {
            initial_dir,
            open_after,
        }
    }
}

impl HostBridge for DialogBridge {
    fn save_file(&self, filename: &str, base64_payload: &str) -> Result<String> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(base64_payload)
            .map_err(|e| Error::HostSave(format!("invalid payload: {}", e)))?;

        let mut dialog = FileDialog::new()
            .set_title("保存文摘图片")
            .add_filter("PNG 图片", &["png"])
            .set_file_name(filename);

        if let Some(dir) = &self.initial_dir {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.save_file() else {
            return Ok(SAVE_CANCELLED.to_string());
        };

        fs::write(&path, bytes).map_err(|e| Error::HostSave(format!("{}: {}", path.display(), e)))?;
        info!("Saved card image to {}", path.display());
        open_if_requested(&path, self.open_after);

        Ok(format!("图片已保存到 {}", path.display()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sink Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Directory for direct downloads: the configured one, else the user's
/// download folder, else their pictures folder, else their home.
pub fn resolve_download_dir(settings: &Settings) -> Result<PathBuf> {
    settings
        .export
        .output_directory
        .clone()
        .or_else(dirs::download_dir)
        .or_else(dirs::picture_dir)
        .or_else(dirs::home_dir)
        .ok_or(Error::DownloadDirNotFound)
}

/// Pick the export route for this session.
pub fn select_sink(settings: &Settings) -> Box<dyn ExportSink> {
    let dir = resolve_download_dir(settings).unwrap_or_else(|e| {
        warn!("{}; saving images to the working directory", e);
        PathBuf::from(".")
    });
    let open_after = settings.export.open_after_export;
    let download = DownloadSink::new(dir.clone(), open_after);

    if settings.export.use_save_dialog {
        info!("Export route: save dialog (fallback {})", dir.display());
        Box::new(HostSink::new(
            DialogBridge::new(Some(dir), open_after),
            download,
        ))
    } else {
        info!("Export route: download to {}", dir.display());
        Box::new(download)
    }
}

fn open_if_requested(path: &Path, open_after: bool) {
    if open_after {
        if let Err(e) = open::that(path) {
            warn!("Failed to open exported image: {}", e);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
