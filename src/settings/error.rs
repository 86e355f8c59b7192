//! Settings error types.
//!
//! Every failure here is recoverable: callers fall back to defaults or to
//! the in-memory settings and keep the timer running.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, saving or editing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The home directory could not be determined.
    #[error("home directory not found")]
    HomeDirectoryNotFound,

    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be written.
    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not well-formed.
    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The settings document parsed but holds unusable values.
    #[error("invalid settings: {0}")]
    Invalid(String),

    /// The external editor could not be run.
    #[error("failed to launch editor: {0}")]
    EditorLaunch(#[from] super::launch::LaunchError),

    /// The scratch file for editing could not be created.
    #[error("failed to prepare temporary file: {0}")]
    TempFile(#[source] std::io::Error),
}

impl SettingsError {
    /// Returns true if the file simply does not exist yet.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Returns true if the document was unusable rather than unreachable.
    #[must_use]
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Invalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn parse_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_display_read() {
        let err = SettingsError::Read {
            path: PathBuf::from("/tmp/x.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_display_invalid() {
        let err = SettingsError::Invalid("pomodoro_duration must be positive".into());
        assert!(err.to_string().contains("pomodoro_duration"));
    }

    #[test]
    fn test_is_not_found() {
        let missing = SettingsError::Read {
            path: PathBuf::from("missing.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(missing.is_not_found());
        assert!(!SettingsError::HomeDirectoryNotFound.is_not_found());
    }

    #[test]
    fn test_is_content_error() {
        let parse = SettingsError::Parse {
            path: PathBuf::from("s.json"),
            source: parse_error(),
        };
        assert!(parse.is_content_error());
        assert!(SettingsError::Invalid("x".into()).is_content_error());
        assert!(!SettingsError::TempFile(io::Error::from(io::ErrorKind::Other)).is_content_error());
    }
}
