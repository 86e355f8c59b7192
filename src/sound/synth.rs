//! Synthesized short beep.

use std::f64::consts::TAU;
use std::time::Duration;

use rodio::Source;

/// Sample rate of synthesized cues.
pub const BEEP_SAMPLE_RATE: u32 = 44_100;

/// Pitch of the beep (A4).
pub const BEEP_FREQUENCY: f64 = 440.0;

/// Length of the beep.
pub const BEEP_DURATION: Duration = Duration::from_millis(200);

/// Peak amplitude relative to full scale.
pub const BEEP_AMPLITUDE: f64 = 0.3;

const CHANNELS: u16 = 2;

/// A fixed-length sine tone as interleaved stereo `i16` samples.
#[derive(Debug, Clone)]
pub struct SineWave {
    frequency: f64,
    amplitude: f64,
    sample_rate: u32,
    total_frames: u64,
    frame: u64,
    channel: u16,
    current: i16,
}

impl SineWave {
    /// Creates a tone of the given pitch, length and amplitude at 44.1 kHz.
    #[must_use]
    pub fn new(frequency: f64, duration: Duration, amplitude: f64) -> Self {
        let total_frames = (BEEP_SAMPLE_RATE as f64 * duration.as_secs_f64()) as u64;
        Self {
            frequency,
            amplitude: amplitude.clamp(0.0, 1.0),
            sample_rate: BEEP_SAMPLE_RATE,
            total_frames,
            frame: 0,
            channel: 0,
            current: 0,
        }
    }

    /// The completion / final-seconds beep.
    #[must_use]
    pub fn beep() -> Self {
        Self::new(BEEP_FREQUENCY, BEEP_DURATION, BEEP_AMPLITUDE)
    }

    fn remaining_samples(&self) -> usize {
        let frames_left = self.total_frames.saturating_sub(self.frame) as usize;
        frames_left * CHANNELS as usize - self.channel as usize
    }
}

impl Iterator for SineWave {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        if self.frame >= self.total_frames {
            return None;
        }

        if self.channel == 0 {
            let t = self.frame as f64 / self.sample_rate as f64;
            let value = (TAU * self.frequency * t).sin() * self.amplitude;
            self.current = (value * f64::from(i16::MAX)) as i16;
        }

        let sample = self.current;
        self.channel += 1;
        if self.channel == CHANNELS {
            self.channel = 0;
            self.frame += 1;
        }
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining_samples();
        (remaining, Some(remaining))
    }
}

impl Source for SineWave {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.remaining_samples())
    }

    fn channels(&self) -> u16 {
        CHANNELS
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(
            self.total_frames as f64 / self.sample_rate as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beep_length() {
        let samples: Vec<i16> = SineWave::beep().collect();
        // 200ms at 44.1kHz, two channels
        assert_eq!(samples.len(), 8820 * 2);
    }

    #[test]
    fn test_channels_are_interleaved_pairs() {
        let samples: Vec<i16> = SineWave::beep().collect();
        for frame in samples.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn test_amplitude_bound() {
        let peak = SineWave::beep().map(|s| s.unsigned_abs()).max().unwrap();
        let limit = (BEEP_AMPLITUDE * f64::from(i16::MAX)) as u16;
        assert!(peak <= limit);
        assert!(peak > limit / 2);
    }

    #[test]
    fn test_starts_at_zero_crossing() {
        let mut wave = SineWave::beep();
        assert_eq!(wave.next(), Some(0));
    }

    #[test]
    fn test_source_metadata() {
        let wave = SineWave::beep();
        assert_eq!(wave.channels(), 2);
        assert_eq!(wave.sample_rate(), 44_100);
        assert_eq!(wave.total_duration(), Some(Duration::from_millis(200)));
        assert_eq!(wave.current_frame_len(), Some(8820 * 2));
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut wave = SineWave::beep();
        wave.next();
        assert_eq!(wave.size_hint(), (8820 * 2 - 1, Some(8820 * 2 - 1)));
    }
}
