//! Bundled clock clip and its looping playback source.
//!
//! The clip is decoded once at startup into interleaved stereo PCM. The
//! looping source rewinds to the start whenever it reaches the end and only
//! finishes once its stop flag is raised.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, Source};

use super::error::SoundError;

/// The ticking clock clip compiled into the binary (WAV, 16-bit stereo).
pub const CLOCK_SOUND_DATA: &[u8] = include_bytes!("../../assets/clock.wav");

/// Returns the bundled clock clip.
#[must_use]
pub const fn clock_sound() -> &'static [u8] {
    CLOCK_SOUND_DATA
}

/// A decoded clip held in memory as interleaved stereo samples.
#[derive(Debug, Clone)]
pub struct PcmClip {
    samples: Arc<[i16]>,
    sample_rate: u32,
}

impl PcmClip {
    /// Decodes a compressed or container-wrapped clip into stereo PCM.
    ///
    /// Mono clips are duplicated onto both channels; clips with more than two
    /// channels keep the first two.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DecodeError` if the data cannot be decoded or
    /// contains no samples.
    pub fn decode(data: &'static [u8]) -> Result<Self, SoundError> {
        let decoder =
            Decoder::new(Cursor::new(data)).map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let raw: Vec<i16> = decoder.collect();

        let samples = to_stereo(raw, channels)?;
        if samples.is_empty() {
            return Err(SoundError::DecodeError("clip contains no samples".to_string()));
        }

        Ok(Self::from_samples(samples, sample_rate))
    }

    /// Wraps already interleaved stereo samples.
    #[must_use]
    pub fn from_samples(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
        }
    }

    /// Sample rate of the decoded clip.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the clip holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Creates a source that repeats this clip until `stop` is raised.
    #[must_use]
    pub fn looping(&self, stop: Arc<AtomicBool>) -> LoopingPcm {
        LoopingPcm {
            samples: Arc::clone(&self.samples),
            position: 0,
            sample_rate: self.sample_rate,
            stop,
        }
    }
}

fn to_stereo(raw: Vec<i16>, channels: u16) -> Result<Vec<i16>, SoundError> {
    match channels {
        0 => Err(SoundError::DecodeError("clip reports zero channels".to_string())),
        1 => Ok(raw.into_iter().flat_map(|s| [s, s]).collect()),
        2 => Ok(raw),
        n => Ok(raw
            .chunks_exact(usize::from(n))
            .flat_map(|frame| [frame[0], frame[1]])
            .collect()),
    }
}

/// Endless playback of a [`PcmClip`].
#[derive(Debug)]
pub struct LoopingPcm {
    samples: Arc<[i16]>,
    position: usize,
    sample_rate: u32,
    stop: Arc<AtomicBool>,
}

impl Iterator for LoopingPcm {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        if self.samples.is_empty() {
            return None;
        }
        if self.position >= self.samples.len() {
            self.position = 0;
        }
        // only end on a frame boundary so the channels stay aligned
        if self.position % 2 == 0 && self.stop.load(Ordering::Relaxed) {
            return None;
        }

        let sample = self.samples[self.position];
        self.position += 1;
        Some(sample)
    }
}

impl Source for LoopingPcm {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        2
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
