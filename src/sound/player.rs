//! Cue engine implementation using rodio.
//!
//! The output stream is opened on a dedicated thread that keeps it alive
//! for the lifetime of the engine; only the `Send + Sync` stream handle is
//! shared with the rest of the program.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use crossbeam_channel::{bounded, Sender};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::clip::PcmClip;
use super::error::SoundError;
use super::synth::SineWave;
use super::AudioCues;

// ============================================================================
// AudioDevice
// ============================================================================

/// Handle to the default output device.
struct AudioDevice {
    handle: OutputStreamHandle,
    /// Dropping this sender lets the stream thread close the device.
    _keepalive: Sender<()>,
}

impl AudioDevice {
    fn open() -> Result<Self, SoundError> {
        let (ready_tx, ready_rx) = bounded(1);
        let (keepalive_tx, keepalive_rx) = bounded::<()>(0);

        thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((stream, handle)) => {
                    if ready_tx.send(Ok(handle)).is_ok() {
                        // blocks until the engine drops its sender
                        let _ = keepalive_rx.recv();
                    }
                    drop(stream);
                    debug!("Audio output stream closed");
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(SoundError::DeviceNotAvailable(e.to_string())));
                }
            })
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        let handle = ready_rx
            .recv()
            .map_err(|_| SoundError::DeviceNotAvailable("audio thread exited".to_string()))??;

        debug!("Audio output stream initialized");
        Ok(Self {
            handle,
            _keepalive: keepalive_tx,
        })
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

/// A running ambient loop.
struct AmbientLoop {
    sink: Sink,
    stop: Arc<AtomicBool>,
}

// ============================================================================
// CueEngine
// ============================================================================

/// Plays the beep and the looping clock through the default output device.
///
/// Every operation is a silent no-op when the device could not be opened,
/// and the ambient loop is a no-op when the clip could not be decoded.
pub struct CueEngine {
    device: Option<AudioDevice>,
    clip: Option<PcmClip>,
    /// The "currently playing" marker for the ambient loop.
    ambient: Mutex<Option<AmbientLoop>>,
}

impl CueEngine {
    /// Decodes the clip and opens the audio device, logging any failure.
    #[must_use]
    pub fn initialize(clip_data: &'static [u8]) -> Self {
        let clip = match PcmClip::decode(clip_data) {
            Ok(clip) => {
                debug!(
                    sample_rate = clip.sample_rate(),
                    samples = clip.len(),
                    "Clock sound decoded"
                );
                Some(clip)
            }
            Err(e) => {
                warn!("Clock sound unavailable: {}", e);
                None
            }
        };

        let device = match AudioDevice::open() {
            Ok(device) => Some(device),
            Err(e) => {
                warn!("Audio not available, sound disabled: {}", e);
                None
            }
        };

        Self {
            device,
            clip,
            ambient: Mutex::new(None),
        }
    }

    /// Creates an engine that never touches the audio hardware.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            device: None,
            clip: None,
            ambient: Mutex::new(None),
        }
    }

    /// Returns true if an output device is open.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.device.is_some()
    }

    /// Returns true if the ambient loop can play.
    #[must_use]
    pub fn has_clock_sound(&self) -> bool {
        self.device.is_some() && self.clip.is_some()
    }

    fn play_beep(&self, device: &AudioDevice) -> Result<(), SoundError> {
        let sink = device.new_sink()?;
        sink.append(SineWave::beep());
        sink.sleep_until_end();
        Ok(())
    }

    fn start_loop(&self, device: &AudioDevice, clip: &PcmClip) -> Result<AmbientLoop, SoundError> {
        let stop = Arc::new(AtomicBool::new(false));
        let sink = device.new_sink()?;
        sink.append(clip.looping(Arc::clone(&stop)));
        sink.play();
        Ok(AmbientLoop { sink, stop })
    }
}

impl AudioCues for CueEngine {
    fn beep(&self) {
        let Some(device) = &self.device else {
            debug!("Audio unavailable, skipping beep");
            return;
        };
        if let Err(e) = self.play_beep(device) {
            warn!("Failed to play beep: {}", e);
        }
    }

    fn start_ambient(&self) {
        let mut ambient = self.ambient.lock().unwrap_or_else(PoisonError::into_inner);
        if ambient.is_some() {
            debug!("Clock sound already playing");
            return;
        }
        let (Some(device), Some(clip)) = (&self.device, &self.clip) else {
            return;
        };

        match self.start_loop(device, clip) {
            Ok(running) => {
                *ambient = Some(running);
                debug!("Clock sound started");
            }
            Err(e) => warn!("Failed to start clock sound: {}", e),
        }
    }

    fn stop_ambient(&self) {
        let mut ambient = self.ambient.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(running) = ambient.take() {
            running.stop.store(true, Ordering::Relaxed);
            running.sink.stop();
            debug!("Clock sound stopped");
        }
    }

    fn is_ambient_playing(&self) -> bool {
        self.ambient
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for CueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CueEngine")
            .field("available", &self.is_available())
            .field("clock_sound", &self.clip.is_some())
            .field("ambient_playing", &self.is_ambient_playing())
            .finish()
    }
}
