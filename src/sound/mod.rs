//! Audio cue engine for the tray timer.
//!
//! This module provides the two sounds the timer makes:
//!
//! - A short synthesized beep, played to completion (the caller blocks for
//!   its ~200ms duration)
//! - A looping clock tick during focus sessions, started and stopped on demand
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │    AudioCues     │ ← Interface used by the session controller
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │    CueEngine     │────▶│ SineWave (beep)  │
//! │  (rodio sinks)   │     ├──────────────────┤
//! │                  │────▶│ LoopingPcm       │
//! └──────────────────┘     │ (decoded clip)   │
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomotray::sound::{clock_sound, AudioCues, CueEngine};
//!
//! // Never fails: missing audio hardware turns playback into a no-op
//! let engine = CueEngine::initialize(clock_sound());
//!
//! engine.start_ambient();
//! engine.beep();
//! engine.stop_ambient();
//! ```

mod clip;
mod error;
mod player;
mod synth;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

pub use clip::{clock_sound, LoopingPcm, PcmClip, CLOCK_SOUND_DATA};
pub use error::SoundError;
pub use player::CueEngine;
pub use synth::{SineWave, BEEP_AMPLITUDE, BEEP_DURATION, BEEP_FREQUENCY, BEEP_SAMPLE_RATE};

/// Trait for audio cue implementations.
///
/// This trait abstracts playback so the session controller can run against
/// the rodio engine or a mock in tests.
pub trait AudioCues: Send + Sync {
    /// Plays the short beep and returns once it has finished.
    fn beep(&self);

    /// Starts the looping clock sound. No-op if it is already playing.
    fn start_ambient(&self);

    /// Stops the looping clock sound. No-op if it is not playing.
    fn stop_ambient(&self);

    /// Returns true while the looping clock sound is playing.
    fn is_ambient_playing(&self) -> bool;
}

/// Mock cue player for testing.
///
/// Applies the same start/stop guarding as the real engine and counts calls.
#[derive(Debug, Default)]
pub struct MockAudioCues {
    beeps: AtomicUsize,
    ambient_starts: AtomicUsize,
    ambient_stops: AtomicUsize,
    playing: Mutex<bool>,
}

impl MockAudioCues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn beep_count(&self) -> usize {
        self.beeps.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn ambient_start_count(&self) -> usize {
        self.ambient_starts.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn ambient_stop_count(&self) -> usize {
        self.ambient_stops.load(Ordering::SeqCst)
    }
}

impl AudioCues for MockAudioCues {
    fn beep(&self) {
        self.beeps.fetch_add(1, Ordering::SeqCst);
    }

    fn start_ambient(&self) {
        let mut playing = self.playing.lock().unwrap_or_else(PoisonError::into_inner);
        if *playing {
            return;
        }
        *playing = true;
        self.ambient_starts.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_ambient(&self) {
        let mut playing = self.playing.lock().unwrap_or_else(PoisonError::into_inner);
        if !*playing {
            return;
        }
        *playing = false;
        self.ambient_stops.fetch_add(1, Ordering::SeqCst);
    }

    fn is_ambient_playing(&self) -> bool {
        *self.playing.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
