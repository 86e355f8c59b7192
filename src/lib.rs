//! pomotray library
//!
//! This library provides the core functionality for the tray Pomodoro timer.
//! It includes:
//! - Session state machine with a cancellable countdown task
//! - Icon rendering (remaining time plus cycle progress dots)
//! - Audio cues: a synthesized beep and a looping clock sound
//! - Settings persistence and the external editor flow
//! - Tray and console shells
//! - CLI command parsing and display utilities

pub mod cli;
pub mod menubar;
pub mod render;
pub mod session;
pub mod settings;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{SessionKind, SessionState, SessionStatus, TickOutcome, TimerSettings};

// Re-export session types
pub use session::{Flow, Intent, SessionController};

// Re-export menubar types
pub use menubar::{
    EventHandler, IconManager, MenuBuilder, MenuConfig, MenuItemConfig, MenuItemId,
    TrayIconManager, TrayUpdate,
};

// Re-export rendering types
pub use render::{BitmapFace, IconRenderer};

// Re-export settings types
pub use settings::{LaunchError, SettingsError, SettingsStore};

// Re-export sound types
pub use sound::{clock_sound, AudioCues, CueEngine, MockAudioCues, SoundError};
