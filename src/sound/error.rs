//! Sound system error types.
//!
//! None of these errors is fatal: the cue engine logs them and degrades to
//! silent playback.

use thiserror::Error;

/// Errors that can occur in the audio cue engine.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no output device connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to decode the bundled clip.
    #[error("failed to decode sound clip: {0}")]
    DecodeError(String),

    /// Failed to create a playback sink on the output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no device".to_string());
        assert!(err.to_string().contains("no device"));
        assert!(err.to_string().contains("audio device not available"));

        let err = SoundError::DecodeError("bad header".to_string());
        assert!(err.to_string().contains("bad header"));

        let err = SoundError::StreamError("stream failed".to_string());
        assert!(err.to_string().contains("stream failed"));
    }
}
