//! Display utilities for the pomotray CLI.
//!
//! This module provides formatted output for:
//! - Settings
//! - Success messages
//! - Error messages

use std::path::Path;

use crate::types::TimerSettings;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Prints the settings as the JSON document stored on disk.
    pub fn show_settings(settings: &TimerSettings) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(settings)?);
        Ok(())
    }

    /// Shows the settings file path.
    pub fn show_path(path: &Path) {
        println!("{}", path.display());
    }

    /// Shows a success message after editing.
    pub fn show_settings_updated(settings: &TimerSettings) {
        println!("* Settings updated");
        println!(
            "  Pomodoro {} min, break {} min, long break {} min, clock sound {}",
            settings.pomodoro_duration,
            settings.short_break_duration,
            settings.long_break_duration,
            if settings.enable_clock_sound { "on" } else { "off" }
        );
    }

    /// Shows that an edit was discarded.
    pub fn show_settings_unchanged() {
        println!("Settings not changed");
    }

    /// Shows a success message after a reset.
    pub fn show_settings_reset(path: &Path) {
        println!("* Settings reset");
        println!("  {} removed, defaults apply", path.display());
    }

    /// Shows a success message after writing an icon.
    pub fn show_icon_written(path: &Path, bytes: usize) {
        println!("* Icon written to {} ({} bytes)", path.display(), bytes);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}
