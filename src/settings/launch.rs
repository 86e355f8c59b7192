//! External process launching: the settings editor and the web browser.
//!
//! The editor is waited on; the browser is fire and forget.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

/// Project page opened from the version menu item.
pub const PROJECT_URL: &str = "https://github.com/lutischan-ferenc/pomodoro-timer";

/// Errors from launching external programs.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but reported failure.
    #[error("'{program}' exited with {status}")]
    ExitStatus { program: String, status: String },
}

/// A program plus the arguments that precede the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Launcher {
    fn new(program: impl Into<OsString>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(OsString::from).collect(),
        }
    }

    fn command(&self, target: impl AsRef<std::ffi::OsStr>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(target);
        cmd
    }

    fn name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Picks the editor: `$VISUAL`, then `$EDITOR`, then the platform default.
#[must_use]
pub fn editor_launcher() -> Launcher {
    editor_from(std::env::var_os("VISUAL"), std::env::var_os("EDITOR"))
}

/// A variable may carry arguments, as in `code --wait`.
fn editor_from(visual: Option<OsString>, editor: Option<OsString>) -> Launcher {
    let value = visual
        .or(editor)
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut words = value.split_whitespace();
    match words.next() {
        Some(program) => Launcher {
            program: program.into(),
            args: words.map(OsString::from).collect(),
        },
        None => platform_editor(),
    }
}

fn platform_editor() -> Launcher {
    if cfg!(target_os = "windows") {
        Launcher::new("notepad", &[])
    } else if cfg!(target_os = "macos") {
        // -W waits for the editor window to close
        Launcher::new("open", &["-W", "-t"])
    } else {
        // returns before the editor closes
        Launcher::new("xdg-open", &[])
    }
}

/// Picks the platform's URL opener.
#[must_use]
pub fn browser_launcher() -> Launcher {
    if cfg!(target_os = "windows") {
        Launcher::new("rundll32", &["url.dll,FileProtocolHandler"])
    } else if cfg!(target_os = "macos") {
        Launcher::new("open", &[])
    } else {
        Launcher::new("xdg-open", &[])
    }
}

pub(crate) fn run_and_wait(launcher: &Launcher, path: &Path) -> Result<(), LaunchError> {
    info!("Opening {} with {}", path.display(), launcher.name());

    let status = launcher
        .command(path)
        .status()
        .map_err(|source| LaunchError::Spawn {
            program: launcher.name(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(LaunchError::ExitStatus {
            program: launcher.name(),
            status: status.to_string(),
        })
    }
}

/// Opens `url` in the default browser without waiting.
///
/// # Errors
///
/// Returns an error if the opener cannot be started.
pub fn open_url(url: &str) -> Result<(), LaunchError> {
    let launcher = browser_launcher();
    debug!("Opening {} with {}", url, launcher.name());

    launcher
        .command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
        .map_err(|source| LaunchError::Spawn {
            program: launcher.name(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    mod editor_tests {
        use super::*;

        #[test]
        fn test_visual_wins_over_editor() {
            let launcher = editor_from(Some("vim".into()), Some("nano".into()));
            assert_eq!(launcher.program, OsString::from("vim"));
            assert!(launcher.args.is_empty());
        }

        #[test]
        fn test_editor_used_without_visual() {
            let launcher = editor_from(None, Some("nano".into()));
            assert_eq!(launcher.program, OsString::from("nano"));
        }

        #[test]
        fn test_variable_with_wait_flag() {
            let launcher = editor_from(Some("gedit --wait".into()), None);
            assert_eq!(launcher.program, OsString::from("gedit"));
            assert_eq!(launcher.args, vec![OsString::from("--wait")]);
        }

        #[test]
        fn test_blank_variable_falls_back() {
            let launcher = editor_from(None, Some("   ".into()));
            assert_eq!(launcher, platform_editor());
        }

        #[test]
        fn test_empty_variable_falls_back() {
            let launcher = editor_from(Some(OsString::new()), None);
            assert_eq!(launcher, platform_editor());
        }

        #[test]
        fn test_platform_default() {
            let launcher = editor_from(None, None);
            #[cfg(target_os = "linux")]
            assert_eq!(launcher.program, OsString::from("xdg-open"));
            #[cfg(target_os = "macos")]
            assert_eq!(launcher.args, vec![OsString::from("-W"), OsString::from("-t")]);
            #[cfg(target_os = "windows")]
            assert_eq!(launcher.program, OsString::from("notepad"));
            let _ = launcher;
        }
    }

    mod run_tests {
        use super::*;

        #[test]
        fn test_missing_program_is_spawn_error() {
            let launcher = Launcher::new("pomotray-no-such-editor", &[]);
            let err = run_and_wait(&launcher, Path::new("x.json")).unwrap_err();
            assert!(matches!(err, LaunchError::Spawn { .. }));
            assert!(err.to_string().contains("pomotray-no-such-editor"));
        }

        #[cfg(unix)]
        #[test]
        fn test_successful_editor() {
            let launcher = Launcher::new("true", &[]);
            assert!(run_and_wait(&launcher, Path::new("x.json")).is_ok());
        }

        #[cfg(unix)]
        #[test]
        fn test_failing_editor() {
            let launcher = Launcher::new("false", &[]);
            let err = run_and_wait(&launcher, Path::new("x.json")).unwrap_err();
            assert!(matches!(err, LaunchError::ExitStatus { .. }));
        }
    }

    #[test]
    fn test_project_url() {
        assert!(PROJECT_URL.starts_with("https://"));
    }
}
