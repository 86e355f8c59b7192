//! Command definitions for the pomotray CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::render::BitmapFace;
use crate::types::READY_GLYPH;

// ============================================================================
// CLI Structure
// ============================================================================

/// System tray Pomodoro timer
#[derive(Parser, Debug)]
#[command(
    name = "pomotray",
    version,
    about = "System tray Pomodoro timer",
    long_about = "A Pomodoro timer that lives in the system tray.\n\
                  The icon counts down the current session and shows a dot for every \
                  completed Pomodoro in the cycle. Without a subcommand the tray app starts.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file to use instead of ~/.pomodoro_settings.json
    #[arg(long, global = true, env = "POMOTRAY_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the tray timer (default)
    Run(RunArgs),

    /// Render a tray icon to a PNG file
    Icon(IconArgs),

    /// Show or change the settings file
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Print the effective settings as JSON
    Show,
    /// Print the settings file path
    Path,
    /// Edit the settings in an external editor
    Edit,
    /// Delete the settings file so defaults apply
    Reset,
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Use the console shell only, even where a tray icon is available
    #[arg(long)]
    pub headless: bool,

    /// Never open the audio device
    #[arg(long)]
    pub no_audio: bool,
}

// ============================================================================
// Icon Command Arguments
// ============================================================================

/// Arguments for the icon command
#[derive(Args, Debug, Clone)]
pub struct IconArgs {
    /// Text to draw: digits or the ready glyph
    #[arg(short, long, default_value = READY_GLYPH, value_parser = validate_icon_text)]
    pub text: String,

    /// Number of progress dots (0-4)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=4)
    )]
    pub dots: u32,

    /// Where to write the PNG
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates icon text.
///
/// - Must not be empty
/// - At most 3 characters, so it fits the icon
/// - Only characters the icon face can draw
fn validate_icon_text(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("icon text cannot be empty".to_string());
    }
    if s.chars().count() > 3 {
        return Err("icon text must be at most 3 characters".to_string());
    }
    let face = BitmapFace::new(1);
    if let Some(ch) = s.chars().find(|ch| !face.supports(*ch)) {
        return Err(format!("'{}' cannot be drawn; use digits or {}", ch, READY_GLYPH));
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================
