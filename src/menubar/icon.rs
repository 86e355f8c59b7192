//! Text shown on and around the tray icon.
//!
//! The icon itself is drawn by [`crate::render`]; this module decides what
//! it says. Both functions are pure and platform-independent.

// ============================================================================
// IconManager
// ============================================================================

/// Generates icon text and tooltips from the remaining time.
#[derive(Debug, Default)]
pub struct IconManager;

impl IconManager {
    /// Text drawn on the icon while counting.
    ///
    /// Whole seconds under a minute, whole minutes (rounded down) otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pomotray::menubar::icon::IconManager;
    ///
    /// assert_eq!(IconManager::display_text(1500), "25");
    /// assert_eq!(IconManager::display_text(60), "1");
    /// assert_eq!(IconManager::display_text(59), "59");
    /// ```
    pub fn display_text(remaining_seconds: u32) -> String {
        if remaining_seconds < 60 {
            remaining_seconds.to_string()
        } else {
            (remaining_seconds / 60).to_string()
        }
    }

    /// Formats remaining time as MM:SS for the tooltip.
    pub fn format_time(remaining_seconds: u32) -> String {
        let minutes = remaining_seconds / 60;
        let seconds = remaining_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
