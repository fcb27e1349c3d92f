//! Reading and writing `config.json`.
//!
//! Settings live in the platform config directory under `paper-digest/`.
//! A missing, empty or unreadable file never stops the app: the defaults are
//! used and the problem is logged.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory
const APP_NAME: &str = "paper-digest";

const CONFIG_FILE_NAME: &str = "config.json";

/// Temporary file renamed over `config.json` once fully written
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Locations
// ─────────────────────────────────────────────────────────────────────────────

/// `<config_dir>/paper-digest`, e.g. `~/.config/paper-digest` on Linux or
/// `%APPDATA%\paper-digest` on Windows.
pub fn get_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(Error::ConfigDirNotFound)?;
    Ok(base.join(APP_NAME))
}

/// `<config_dir>/paper-digest/config.json`
pub fn get_config_file_path() -> Result<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load the user's settings, falling back to defaults on any problem.
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(Settings::default(), "Could not load settings")
}

/// Read, parse and sanitize the settings file at `path`.
///
/// A missing or blank file yields the defaults.
fn load_config_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!("No settings file at {}", path.display());
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    if contents.trim().is_empty() {
        debug!("Settings file {} is blank", path.display());
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!("Settings file {} is not valid: {}", path.display(), e);
        Error::from(e)
    })?;

    info!("Loaded settings from {}", path.display());
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Persist `settings` to the user's config directory.
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to(&get_config_dir()?, settings)
}

/// Write `settings` into `dir`: serialize, write the temporary file, then
/// rename it over `config.json` so a crash never leaves a half-written file.
fn save_config_to(dir: &Path, settings: &Settings) -> Result<()> {
    let save_err = |path: &Path, e: Box<dyn std::error::Error + Send + Sync>| Error::ConfigSave {
        path: path.to_path_buf(),
        source: e,
    };

    fs::create_dir_all(dir).map_err(|e| save_err(dir, Box::new(e)))?;

    let target = dir.join(CONFIG_FILE_NAME);
    let staging = dir.join(CONFIG_BACKUP_NAME);

    let json = serde_json::to_string_pretty(settings).map_err(|e| save_err(&target, Box::new(e)))?;
    fs::write(&staging, json).map_err(|e| save_err(&staging, Box::new(e)))?;
    fs::rename(&staging, &target).map_err(|e| save_err(&target, Box::new(e)))?;

    info!("Saved settings to {}", target.display());
    Ok(())
}

/// Save settings, logging instead of returning failures.
pub fn save_config_silent(settings: &Settings) -> bool {
    save_config(settings)
        .map_err(|e| warn!("Could not save settings: {}", e))
        .is_ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
