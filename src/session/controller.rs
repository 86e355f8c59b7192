//! Session controller: the timer state machine and its countdown task.
//!
//! The controller owns the single [`SessionState`] behind a tokio mutex.
//! Each start spawns one countdown task bound to a fresh cancellation token
//! and to the state's generation; stopping cancels the token and bumps the
//! generation, so a countdown that loses a race never touches the state.
//!
//! Results reach the tray only as [`TrayUpdate`] messages.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crossbeam_channel::Sender;
use tokio::sync::Mutex;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::intent::{Flow, Intent};
use crate::menubar::{IconManager, TrayUpdate};
use crate::render::IconRenderer;
use crate::settings::{self, Launcher, SettingsStore};
use crate::sound::AudioCues;
use crate::types::{SessionKind, SessionState, TickOutcome, TimerSettings, READY_GLYPH};

const TICK: Duration = Duration::from_secs(1);

/// State guarded by the session lock.
struct Core {
    state: SessionState,
    /// Token of the running countdown; never reused.
    cancel: Option<CancellationToken>,
}

struct Shared {
    core: Mutex<Core>,
    settings: RwLock<TimerSettings>,
    store: SettingsStore,
    audio: Arc<dyn AudioCues>,
    renderer: IconRenderer,
    updates: Sender<TrayUpdate>,
    active: AtomicUsize,
}

// ============================================================================
// SessionController
// ============================================================================

/// Drives focus and break sessions.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

impl SessionController {
    /// Creates an idle controller.
    pub fn new(
        settings: TimerSettings,
        store: SettingsStore,
        audio: Arc<dyn AudioCues>,
        updates: Sender<TrayUpdate>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(Core {
                    state: SessionState::new(),
                    cancel: None,
                }),
                settings: RwLock::new(settings),
                store,
                audio,
                renderer: IconRenderer::new(),
                updates,
                active: AtomicUsize::new(0),
            }),
        }
    }

    /// Publishes the idle icon, tooltip and clock sound check mark.
    pub async fn publish_initial(&self) {
        let core = self.shared.core.lock().await;
        self.shared.publish_idle(&core.state);
        self.shared
            .publish(TrayUpdate::SoundChecked(self.settings().enable_clock_sound));
    }

    /// Starts a countdown of `seconds`, replacing any running one.
    pub async fn start(&self, kind: SessionKind, seconds: u32) {
        let mut core = self.shared.core.lock().await;
        self.shared.start_locked(&mut core, kind, seconds);
    }

    /// Stops the running countdown.
    ///
    /// Returns false when nothing was running.
    pub async fn stop(&self) -> bool {
        let mut core = self.shared.core.lock().await;
        self.shared.stop_locked(&mut core)
    }

    /// Handles a user command.
    pub async fn dispatch(&self, intent: Intent) -> Flow {
        debug!(intent = %intent, "Dispatching");

        match intent {
            Intent::StartFocus => {
                let seconds = self.settings().focus_seconds();
                self.start(SessionKind::Focus, seconds).await;
            }
            Intent::StartBreak => {
                let seconds = self.settings().short_break_seconds();
                self.start(SessionKind::Break, seconds).await;
            }
            Intent::StartLongBreak => {
                let seconds = self.settings().long_break_seconds();
                self.start(SessionKind::Break, seconds).await;
            }
            Intent::Toggle => self.toggle().await,
            Intent::Stop => {
                let mut core = self.shared.core.lock().await;
                if self.shared.stop_locked(&mut core) {
                    self.shared.publish_idle(&core.state);
                }
            }
            Intent::ToggleSound => self.toggle_sound().await,
            Intent::EditSettings => {
                self.edit_settings_with(settings::launch::editor_launcher()).await;
            }
            Intent::OpenWebsite => {
                if let Err(e) = settings::open_url(settings::PROJECT_URL) {
                    warn!("Failed to open browser: {}", e);
                }
            }
            Intent::Quit => {
                self.stop().await;
                self.shared.publish(TrayUpdate::Shutdown);
                info!("Shutting down");
                return Flow::Quit;
            }
        }

        Flow::Continue
    }

    /// Returns a copy of the session state.
    pub async fn snapshot(&self) -> SessionState {
        self.shared.core.lock().await.state.clone()
    }

    /// Returns a copy of the current settings.
    pub fn settings(&self) -> TimerSettings {
        self.shared
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of countdown tasks still alive.
    pub fn active_countdowns(&self) -> usize {
        self.shared.active.load(Ordering::SeqCst)
    }

    async fn toggle(&self) {
        let mut core = self.shared.core.lock().await;
        if core.state.running {
            self.shared.stop_locked(&mut core);
            self.shared.publish_idle(&core.state);
        } else {
            let (kind, seconds) = core.state.next_session(&self.settings());
            self.shared.start_locked(&mut core, kind, seconds);
        }
    }

    async fn toggle_sound(&self) {
        // held across the save so concurrent toggles persist in order
        let core = self.shared.core.lock().await;

        let updated = {
            let mut settings = self
                .shared
                .settings
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            settings.enable_clock_sound = !settings.enable_clock_sound;
            settings.clone()
        };
        let enabled = updated.enable_clock_sound;
        info!(enabled, "Clock sound toggled");
        self.shared.publish(TrayUpdate::SoundChecked(enabled));
        self.shared.sync_ambient(&core.state, enabled);

        let store = self.shared.store.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || store.save(&updated)).await {
            warn!("Settings save task failed: {}", e);
        }
    }

    /// Runs the settings editor through `launcher` and applies a valid result.
    pub(crate) async fn edit_settings_with(&self, launcher: Launcher) {
        let current = self.settings();
        let store = self.shared.store.clone();

        let edited =
            match tokio::task::spawn_blocking(move || store.edit_with(&launcher, &current)).await {
                Ok(edited) => edited,
                Err(e) => {
                    warn!("Settings editor task failed: {}", e);
                    None
                }
            };
        let Some(updated) = edited else {
            return;
        };

        let core = self.shared.core.lock().await;
        let enabled = updated.enable_clock_sound;
        *self
            .shared
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = updated;
        self.shared.publish(TrayUpdate::SoundChecked(enabled));
        self.shared.sync_ambient(&core.state, enabled);
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("store", &self.shared.store)
            .field("active_countdowns", &self.active_countdowns())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Shared
// ============================================================================

impl Shared {
    fn start_locked(self: &Arc<Self>, core: &mut Core, kind: SessionKind, seconds: u32) {
        // replace, never queue
        self.stop_locked(core);

        let generation = core.state.begin(kind, seconds);
        let token = CancellationToken::new();
        core.cancel = Some(token.clone());
        info!(kind = %kind, seconds, generation, "Session started");

        let clock_sound = self
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .enable_clock_sound;
        if kind == SessionKind::Focus && clock_sound {
            self.audio.start_ambient();
        }

        let text = IconManager::display_text(seconds);
        core.state.display_changed(&text);
        self.publish_icon(&text, core.state.completed_focus_count);
        self.publish(TrayUpdate::SetTooltip(IconManager::format_time(seconds)));

        let countdown = ActiveCountdown::enter(Arc::clone(self));
        tokio::spawn(run_countdown(countdown, generation, token));
    }

    fn stop_locked(&self, core: &mut Core) -> bool {
        if !core.state.halt() {
            return false;
        }
        if let Some(token) = core.cancel.take() {
            token.cancel();
        }
        self.audio.stop_ambient();
        info!(kind = %core.state.kind, remaining = core.state.remaining_seconds, "Session stopped");
        true
    }

    /// Matches the ambient loop to the clock sound setting during a focus countdown.
    fn sync_ambient(&self, state: &SessionState, enabled: bool) {
        if !state.running || state.kind != SessionKind::Focus {
            return;
        }
        if enabled {
            self.audio.start_ambient();
        } else {
            self.audio.stop_ambient();
        }
    }

    fn publish(&self, update: TrayUpdate) {
        if self.updates.send(update).is_err() {
            debug!("Tray update channel closed");
        }
    }

    fn publish_icon(&self, text: &str, dots: u32) {
        self.publish(TrayUpdate::SetIcon(self.renderer.render(text, dots)));
    }

    fn publish_idle(&self, state: &SessionState) {
        self.publish_icon(READY_GLYPH, state.completed_focus_count);
        if let Some(tooltip) = state.status.idle_tooltip() {
            self.publish(TrayUpdate::SetTooltip(tooltip.to_string()));
        }
    }

    async fn beep(&self) {
        let audio = Arc::clone(&self.audio);
        if let Err(e) = tokio::task::spawn_blocking(move || audio.beep()).await {
            warn!("Beep task failed: {}", e);
        }
    }
}

/// Counts a live countdown task for as long as it exists.
struct ActiveCountdown {
    shared: Arc<Shared>,
}

impl ActiveCountdown {
    fn enter(shared: Arc<Shared>) -> Self {
        shared.active.fetch_add(1, Ordering::SeqCst);
        Self { shared }
    }
}

impl Drop for ActiveCountdown {
    fn drop(&mut self) {
        self.shared.active.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Countdown
// ============================================================================

async fn run_countdown(countdown: ActiveCountdown, generation: u64, token: CancellationToken) {
    let shared = &countdown.shared;
    let mut ticker = interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(generation, "Countdown cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        let mut core = shared.core.lock().await;
        match core.state.tick(generation) {
            TickOutcome::Stale => {
                debug!(generation, "Countdown superseded");
                return;
            }
            TickOutcome::Counting {
                remaining_seconds,
                beep,
            } => {
                if beep {
                    shared.beep().await;
                }
                let text = IconManager::display_text(remaining_seconds);
                if core.state.display_changed(&text) {
                    shared.publish_icon(&text, core.state.completed_focus_count);
                }
                shared.publish(TrayUpdate::SetTooltip(IconManager::format_time(
                    remaining_seconds,
                )));
            }
            TickOutcome::Finished {
                kind,
                completed_focus_count,
            } => {
                core.cancel = None;
                shared.publish_idle(&core.state);
                shared.beep().await;
                shared.audio.stop_ambient();
                info!(kind = %kind, completed_focus_count, "Session finished");
                return;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
