//! User commands understood by the session controller.
//!
//! The tray icon click, the menu items and the console shell all produce an
//! [`Intent`], so every trigger path runs through the same dispatch.

use std::fmt;

/// A user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Start a focus session with the configured duration
    StartFocus,
    /// Start a short break
    StartBreak,
    /// Start a long break
    StartLongBreak,
    /// Stop the countdown if one is running, otherwise start the next session
    Toggle,
    /// Stop the countdown
    Stop,
    /// Flip the clock sound setting
    ToggleSound,
    /// Edit the settings file in an external editor
    EditSettings,
    /// Open the project page in the browser
    OpenWebsite,
    /// Shut the application down
    Quit,
}

impl Intent {
    /// Every intent, in menu order.
    pub const ALL: [Intent; 9] = [
        Intent::OpenWebsite,
        Intent::StartFocus,
        Intent::StartBreak,
        Intent::StartLongBreak,
        Intent::ToggleSound,
        Intent::EditSettings,
        Intent::Quit,
        Intent::Toggle,
        Intent::Stop,
    ];

    /// Short name used in logs and by the console shell.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::StartFocus => "focus",
            Intent::StartBreak => "break",
            Intent::StartLongBreak => "long",
            Intent::Toggle => "toggle",
            Intent::Stop => "stop",
            Intent::ToggleSound => "sound",
            Intent::EditSettings => "settings",
            Intent::OpenWebsite => "web",
            Intent::Quit => "quit",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the shell loop keeps running after an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Intent::ALL.iter().map(Intent::as_str).collect();
        assert_eq!(names.len(), Intent::ALL.len());
    }

    #[test]
    fn test_display() {
        assert_eq!(Intent::StartLongBreak.to_string(), "long");
        assert_eq!(Intent::Quit.to_string(), "quit");
    }
}
