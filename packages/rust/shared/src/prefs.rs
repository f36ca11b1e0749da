//! Persisted user preferences.
//!
//! A single dark-mode flag stored under the fixed `dark_mode` key in
//! `~/.mdsite/preferences.toml`. Read once at startup, written on every
//! toggle. [`ThemeState`] is the single mutation entry point so the flag
//! never forks into duplicated state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::config_dir;
use crate::error::{MdsiteError, Result};

/// Preferences file name under the config directory.
const PREFS_FILE_NAME: &str = "preferences.toml";

/// On-disk preference set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the dark visual theme is active.
    #[serde(default)]
    pub dark_mode: bool,
}

/// Get the path to the preferences file (`~/.mdsite/preferences.toml`).
pub fn prefs_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(PREFS_FILE_NAME))
}

/// Load preferences from a specific path. Missing file yields defaults.
pub fn load_prefs_from(path: &Path) -> Result<Preferences> {
    if !path.exists() {
        tracing::debug!(?path, "preferences file not found, using defaults");
        return Ok(Preferences::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| MdsiteError::io(path, e))?;
    toml::from_str(&content)
        .map_err(|e| MdsiteError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write preferences to a specific path, creating parent directories.
pub fn save_prefs_to(path: &Path, prefs: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MdsiteError::io(parent, e))?;
    }

    let content =
        toml::to_string_pretty(prefs).map_err(|e| MdsiteError::config(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| MdsiteError::io(path, e))
}

// ---------------------------------------------------------------------------
// ThemeState
// ---------------------------------------------------------------------------

/// Single source of truth for the process-wide theme flag.
///
/// Initialized from persisted storage at startup; every mutation goes
/// through [`ThemeState::toggle`], which writes the flag back immediately.
#[derive(Debug)]
pub struct ThemeState {
    prefs: Preferences,
    path: PathBuf,
}

impl ThemeState {
    /// Load theme state from the default preferences location.
    pub fn load() -> Result<Self> {
        Self::load_from(prefs_file_path()?)
    }

    /// Load theme state backed by a specific preferences file.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let prefs = load_prefs_from(&path)?;
        Ok(Self { prefs, path })
    }

    /// Like [`ThemeState::load`], but a missing preferences file seeds the
    /// flag from config instead of `false`. A present file always wins.
    pub fn load_with_default(default_dark_mode: bool) -> Result<Self> {
        let path = prefs_file_path()?;
        if path.exists() {
            return Self::load_from(path);
        }
        Ok(Self {
            prefs: Preferences {
                dark_mode: default_dark_mode,
            },
            path,
        })
    }

    /// Current dark-mode flag.
    pub fn dark_mode(&self) -> bool {
        self.prefs.dark_mode
    }

    /// Flip the flag and persist it. Returns the new value.
    pub fn toggle(&mut self) -> Result<bool> {
        self.prefs.dark_mode = !self.prefs.dark_mode;
        save_prefs_to(&self.path, &self.prefs)?;
        tracing::info!(dark_mode = self.prefs.dark_mode, "theme preference saved");
        Ok(self.prefs.dark_mode)
    }
}
