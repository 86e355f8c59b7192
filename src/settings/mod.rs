//! Settings persistence for the tray timer.
//!
//! Settings live in a single JSON document, by default
//! `~/.pomodoro_settings.json`:
//!
//! ```json
//! {
//!   "pomodoro_duration": 25,
//!   "short_break_duration": 5,
//!   "long_break_duration": 15,
//!   "enable_clock_sound": true
//! }
//! ```
//!
//! A missing, malformed or invalid document falls back to the defaults as
//! a whole; there is no per-field merging.
//!
//! # Editing
//!
//! The interactive edit waits for the editor process to exit before reading
//! the file back. Notepad and `open -W -t` wait for the window to close, but
//! `xdg-open` hands the file to the desktop and returns at once, so on Linux
//! set `$VISUAL` or `$EDITOR` to an editor that blocks (for example `vim` or
//! `gedit --wait`). Otherwise the edit is read back untouched.
//!
//! # Example
//!
//! ```no_run
//! use pomotray::settings::SettingsStore;
//!
//! let store = SettingsStore::new(SettingsStore::default_path());
//! let mut settings = store.load();
//! settings.enable_clock_sound = false;
//! store.save(&settings);
//! ```

pub mod error;
pub mod launch;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::types::TimerSettings;

pub use error::SettingsError;
pub use launch::{open_url, LaunchError, Launcher, PROJECT_URL};

/// File name of the settings document in the home directory.
pub const SETTINGS_FILE_NAME: &str = ".pomodoro_settings.json";

/// Reads and writes [`TimerSettings`] at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `~/.pomodoro_settings.json`, or a file in the working
    /// directory when the home directory is unknown.
    #[must_use]
    pub fn default_path() -> PathBuf {
        match Self::home_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("{}, using the current directory", e);
                PathBuf::from(SETTINGS_FILE_NAME)
            }
        }
    }

    /// Returns the settings path under the home directory.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::HomeDirectoryNotFound` if the home directory
    /// cannot be determined.
    pub fn home_path() -> Result<PathBuf, SettingsError> {
        dirs::home_dir()
            .map(|home| home.join(SETTINGS_FILE_NAME))
            .ok_or(SettingsError::HomeDirectoryNotFound)
    }

    /// Path of the settings document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the settings, falling back to defaults on any failure.
    #[must_use]
    pub fn load(&self) -> TimerSettings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) if e.is_not_found() => {
                debug!("No settings file at {}, using defaults", self.path.display());
                TimerSettings::default()
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                TimerSettings::default()
            }
        }
    }

    /// Loads and validates the settings document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not well-formed, or
    /// holds invalid values.
    pub fn try_load(&self) -> Result<TimerSettings, SettingsError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_settings(&self.path, &text)
    }

    /// Saves the settings, logging rather than returning failures.
    pub fn save(&self, settings: &TimerSettings) {
        if let Err(e) = self.try_save(settings) {
            warn!("{}", e);
        }
    }

    /// Writes the settings as pretty-printed JSON, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn try_save(&self, settings: &TimerSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings).map_err(SettingsError::Serialize)?;
        fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Settings saved to {}", self.path.display());
        Ok(())
    }

    /// Removes the settings file so the next load yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset(&self) -> Result<(), SettingsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SettingsError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Lets the user edit the settings in an external editor.
    ///
    /// Blocks until the editor process exits (see the module docs for
    /// `xdg-open`). A well-formed, valid result is saved and returned;
    /// anything else is logged and discarded.
    pub fn edit_interactively(&self, current: &TimerSettings) -> Option<TimerSettings> {
        self.edit_with(&launch::editor_launcher(), current)
    }

    pub(crate) fn edit_with(
        &self,
        launcher: &Launcher,
        current: &TimerSettings,
    ) -> Option<TimerSettings> {
        match self.try_edit(launcher, current) {
            Ok(updated) => {
                self.save(&updated);
                info!("Settings updated");
                Some(updated)
            }
            Err(e) => {
                warn!("Settings not changed: {}", e);
                None
            }
        }
    }

    fn try_edit(
        &self,
        launcher: &Launcher,
        current: &TimerSettings,
    ) -> Result<TimerSettings, SettingsError> {
        let scratch = tempfile::Builder::new()
            .prefix("pomotray")
            .tempdir()
            .map_err(SettingsError::TempFile)?;
        let path = scratch.path().join("pomodoro_settings.json");

        let json = serde_json::to_string_pretty(current).map_err(SettingsError::Serialize)?;
        fs::write(&path, json).map_err(SettingsError::TempFile)?;

        launch::run_and_wait(launcher, &path)?;

        let text = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        parse_settings(&path, &text)
    }
}

fn parse_settings(path: &Path, text: &str) -> Result<TimerSettings, SettingsError> {
    let settings: TimerSettings =
        serde_json::from_str(text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.validate().map_err(SettingsError::Invalid)?;
    Ok(settings)
}
