//! Core data types for the tray timer.
//!
//! This module defines the data structures used for:
//! - Session kinds and idle status messages
//! - Timer settings persisted as JSON, with validation
//! - The shared session state and its per-second transitions

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Number of focus sessions in one cycle (and the most progress dots shown).
pub const CYCLE_LENGTH: u32 = 4;

/// Glyph shown on the icon while no countdown is running.
pub const READY_GLYPH: &str = "▶";

/// Remaining seconds below which every tick plays the short beep.
pub const FINAL_SECONDS: u32 = 11;

// ============================================================================
// SessionKind
// ============================================================================

/// Whether a session is a focus period or a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// A focus (Pomodoro) period
    #[default]
    Focus,
    /// A short or long break
    Break,
}

impl SessionKind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Focus => "focus",
            SessionKind::Break => "break",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SessionStatus
// ============================================================================

/// What the timer last did, used for the tooltip while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Nothing has run yet
    #[default]
    Ready,
    /// A countdown is active
    Running,
    /// The user stopped a countdown of this kind
    Stopped(SessionKind),
    /// A countdown of this kind ran to zero
    Finished(SessionKind),
}

impl SessionStatus {
    /// Returns the tooltip for an idle icon, or `None` while counting.
    pub fn idle_tooltip(&self) -> Option<&'static str> {
        match self {
            SessionStatus::Ready => Some("Click to start Pomodoro"),
            SessionStatus::Running => None,
            SessionStatus::Stopped(SessionKind::Focus) => {
                Some("Pomodoro stopped - Click to start Break")
            }
            SessionStatus::Stopped(SessionKind::Break) => {
                Some("Break stopped - Click to start Pomodoro")
            }
            SessionStatus::Finished(SessionKind::Focus) => {
                Some("Finished pomodoro - Click to start break")
            }
            SessionStatus::Finished(SessionKind::Break) => {
                Some("Finished break - Click to start pomodoro")
            }
        }
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// User settings, stored as a JSON document.
///
/// Field names are the on-disk keys. Unknown keys are ignored when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Focus duration in minutes
    pub pomodoro_duration: u32,
    /// Short break duration in minutes
    pub short_break_duration: u32,
    /// Long break duration in minutes
    pub long_break_duration: u32,
    /// Whether the ticking clock plays during focus sessions
    pub enable_clock_sound: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            pomodoro_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            enable_clock_sound: true,
        }
    }
}

impl TimerSettings {
    /// Sets the focus duration in minutes.
    pub fn with_pomodoro_duration(mut self, minutes: u32) -> Self {
        self.pomodoro_duration = minutes;
        self
    }

    /// Sets the short break duration in minutes.
    pub fn with_short_break_duration(mut self, minutes: u32) -> Self {
        self.short_break_duration = minutes;
        self
    }

    /// Sets the long break duration in minutes.
    pub fn with_long_break_duration(mut self, minutes: u32) -> Self {
        self.long_break_duration = minutes;
        self
    }

    /// Sets the clock sound flag.
    pub fn with_clock_sound(mut self, enabled: bool) -> Self {
        self.enable_clock_sound = enabled;
        self
    }

    /// Validates the settings.
    ///
    /// Returns an error message if a duration is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.pomodoro_duration == 0 {
            return Err("pomodoro_duration must be a positive number of minutes".to_string());
        }
        if self.short_break_duration == 0 {
            return Err("short_break_duration must be a positive number of minutes".to_string());
        }
        if self.long_break_duration == 0 {
            return Err("long_break_duration must be a positive number of minutes".to_string());
        }
        Ok(())
    }

    /// Focus duration in seconds.
    pub fn focus_seconds(&self) -> u32 {
        self.pomodoro_duration.saturating_mul(60)
    }

    /// Short break duration in seconds.
    pub fn short_break_seconds(&self) -> u32 {
        self.short_break_duration.saturating_mul(60)
    }

    /// Long break duration in seconds.
    pub fn long_break_seconds(&self) -> u32 {
        self.long_break_duration.saturating_mul(60)
    }
}

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of one per-second step of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was superseded; it must exit without side effects
    Stale,
    /// Still counting
    Counting {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
        /// Whether the final-seconds beep is due
        beep: bool,
    },
    /// The countdown reached zero
    Finished {
        /// Kind of the session that finished
        kind: SessionKind,
        /// Counter value after the completion was recorded
        completed_focus_count: u32,
    },
}

// ============================================================================
// SessionState
// ============================================================================

/// The single shared session record.
///
/// Every countdown is bound to the `generation` current when it started.
/// Starting or stopping bumps the generation, so a countdown that lost a race
/// with the user sees `TickOutcome::Stale` and leaves the state alone.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Kind of the active or most recently started session
    pub kind: SessionKind,
    /// Whether a countdown is active
    pub running: bool,
    /// Remaining seconds of the current countdown
    pub remaining_seconds: u32,
    /// Completed focus sessions in the current cycle (0-4)
    pub completed_focus_count: u32,
    /// What happened last, for the idle tooltip
    pub status: SessionStatus,
    generation: u64,
    last_display_text: Option<String>,
}

impl SessionState {
    /// Creates the startup state: idle, focus next, nothing completed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identity of the current countdown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true once any session has been started.
    pub fn ever_started(&self) -> bool {
        self.generation > 0
    }

    /// Begins a countdown and returns the generation it is bound to.
    pub fn begin(&mut self, kind: SessionKind, seconds: u32) -> u64 {
        self.generation += 1;
        self.kind = kind;
        self.remaining_seconds = seconds;
        self.running = true;
        self.status = SessionStatus::Running;
        self.last_display_text = None;
        self.generation
    }

    /// Halts the active countdown.
    ///
    /// Returns false (and changes nothing) when no countdown is active.
    pub fn halt(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.generation += 1;
        self.running = false;
        self.status = SessionStatus::Stopped(self.kind);
        true
    }

    /// Advances the countdown bound to `generation` by one second.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if !self.running || generation != self.generation {
            return TickOutcome::Stale;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return TickOutcome::Counting {
                remaining_seconds: self.remaining_seconds,
                beep: self.remaining_seconds < FINAL_SECONDS,
            };
        }

        self.running = false;
        if self.kind == SessionKind::Focus {
            self.record_focus_completion();
        }
        self.status = SessionStatus::Finished(self.kind);
        TickOutcome::Finished {
            kind: self.kind,
            completed_focus_count: self.completed_focus_count,
        }
    }

    /// Counts a completed focus session, wrapping past the cycle length to 1.
    pub fn record_focus_completion(&mut self) {
        self.completed_focus_count += 1;
        if self.completed_focus_count > CYCLE_LENGTH {
            self.completed_focus_count = 1;
        }
    }

    /// Returns true when the next break should be a long one.
    pub fn long_break_due(&self) -> bool {
        self.completed_focus_count == CYCLE_LENGTH
    }

    /// Picks the session a click on the idle icon starts.
    ///
    /// Focus is followed by a break (long when the cycle is full); a break, or
    /// a fresh start, is followed by focus.
    pub fn next_session(&self, settings: &TimerSettings) -> (SessionKind, u32) {
        if self.ever_started() && self.kind == SessionKind::Focus {
            if self.long_break_due() {
                (SessionKind::Break, settings.long_break_seconds())
            } else {
                (SessionKind::Break, settings.short_break_seconds())
            }
        } else {
            (SessionKind::Focus, settings.focus_seconds())
        }
    }

    /// Records `text` as rendered and returns whether it differs from the last one.
    pub fn display_changed(&mut self, text: &str) -> bool {
        if self.last_display_text.as_deref() == Some(text) {
            return false;
        }
        self.last_display_text = Some(text.to_string());
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // SessionKind Tests
    // ------------------------------------------------------------------------

    mod session_kind_tests {
        use super::*;

        #[test]
        fn test_default_is_focus() {
            assert_eq!(SessionKind::default(), SessionKind::Focus);
        }

        #[test]
        fn test_as_str_and_display() {
            assert_eq!(SessionKind::Focus.as_str(), "focus");
            assert_eq!(SessionKind::Break.to_string(), "break");
        }
    }

    // ------------------------------------------------------------------------
    // SessionStatus Tests
    // ------------------------------------------------------------------------

    mod session_status_tests {
        use super::*;

        #[test]
        fn test_running_has_no_idle_tooltip() {
            assert_eq!(SessionStatus::Running.idle_tooltip(), None);
        }

        #[test]
        fn test_idle_tooltips() {
            assert_eq!(
                SessionStatus::Ready.idle_tooltip(),
                Some("Click to start Pomodoro")
            );
            assert_eq!(
                SessionStatus::Stopped(SessionKind::Focus).idle_tooltip(),
                Some("Pomodoro stopped - Click to start Break")
            );
            assert_eq!(
                SessionStatus::Finished(SessionKind::Break).idle_tooltip(),
                Some("Finished break - Click to start pomodoro")
            );
        }
    }

    // ------------------------------------------------------------------------
    // TimerSettings Tests
    // ------------------------------------------------------------------------

    mod timer_settings_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let settings = TimerSettings::default();
            assert_eq!(settings.pomodoro_duration, 25);
            assert_eq!(settings.short_break_duration, 5);
            assert_eq!(settings.long_break_duration, 15);
            assert!(settings.enable_clock_sound);
        }

        #[test]
        fn test_builder_pattern() {
            let settings = TimerSettings::default()
                .with_pomodoro_duration(50)
                .with_short_break_duration(10)
                .with_long_break_duration(30)
                .with_clock_sound(false);

            assert_eq!(settings.focus_seconds(), 3000);
            assert_eq!(settings.short_break_seconds(), 600);
            assert_eq!(settings.long_break_seconds(), 1800);
            assert!(!settings.enable_clock_sound);
        }

        #[test]
        fn test_validate_rejects_zero_durations() {
            assert!(TimerSettings::default().validate().is_ok());
            assert!(TimerSettings::default()
                .with_pomodoro_duration(0)
                .validate()
                .is_err());
            assert!(TimerSettings::default()
                .with_short_break_duration(0)
                .validate()
                .is_err());
            assert!(TimerSettings::default()
                .with_long_break_duration(0)
                .validate()
                .is_err());
        }

        #[test]
        fn test_json_field_names() {
            let json = serde_json::to_string(&TimerSettings::default()).unwrap();
            assert!(json.contains("\"pomodoro_duration\":25"));
            assert!(json.contains("\"short_break_duration\":5"));
            assert!(json.contains("\"long_break_duration\":15"));
            assert!(json.contains("\"enable_clock_sound\":true"));
        }

        #[test]
        fn test_unknown_fields_ignored() {
            let json = r#"{
                "pomodoro_duration": 30,
                "short_break_duration": 6,
                "long_break_duration": 20,
                "enable_clock_sound": false,
                "theme": "dark"
            }"#;
            let settings: TimerSettings = serde_json::from_str(json).unwrap();
            assert_eq!(settings.pomodoro_duration, 30);
            assert!(!settings.enable_clock_sound);
        }

        #[test]
        fn test_missing_field_rejects_document() {
            let json = r#"{"pomodoro_duration": 30}"#;
            assert!(serde_json::from_str::<TimerSettings>(json).is_err());
        }
    }

    // ------------------------------------------------------------------------
    // SessionState Tests
    // ------------------------------------------------------------------------

    mod session_state_tests {
        use super::*;

        #[test]
        fn test_new_state() {
            let state = SessionState::new();
            assert_eq!(state.kind, SessionKind::Focus);
            assert!(!state.running);
            assert_eq!(state.remaining_seconds, 0);
            assert_eq!(state.completed_focus_count, 0);
            assert_eq!(state.generation(), 0);
            assert!(!state.ever_started());
        }

        #[test]
        fn test_begin_bumps_generation() {
            let mut state = SessionState::new();
            let first = state.begin(SessionKind::Focus, 60);
            let second = state.begin(SessionKind::Break, 30);

            assert!(second > first);
            assert_eq!(state.kind, SessionKind::Break);
            assert_eq!(state.remaining_seconds, 30);
            assert!(state.running);
            assert_eq!(state.status, SessionStatus::Running);
        }

        #[test]
        fn test_halt_is_idempotent() {
            let mut state = SessionState::new();
            state.begin(SessionKind::Focus, 60);

            assert!(state.halt());
            let generation = state.generation();
            assert!(!state.halt());
            assert_eq!(state.generation(), generation);
            assert_eq!(state.status, SessionStatus::Stopped(SessionKind::Focus));
        }

        #[test]
        fn test_tick_counts_down() {
            let mut state = SessionState::new();
            let generation = state.begin(SessionKind::Focus, 120);

            assert_eq!(
                state.tick(generation),
                TickOutcome::Counting {
                    remaining_seconds: 119,
                    beep: false
                }
            );
        }

        #[test]
        fn test_tick_beeps_in_final_seconds() {
            let mut state = SessionState::new();
            let generation = state.begin(SessionKind::Focus, 12);

            assert_eq!(
                state.tick(generation),
                TickOutcome::Counting {
                    remaining_seconds: 11,
                    beep: false
                }
            );
            assert_eq!(
                state.tick(generation),
                TickOutcome::Counting {
                    remaining_seconds: 10,
                    beep: true
                }
            );
        }

        #[test]
        fn test_tick_with_stale_generation() {
            let mut state = SessionState::new();
            let old = state.begin(SessionKind::Focus, 60);
            state.begin(SessionKind::Break, 60);

            assert_eq!(state.tick(old), TickOutcome::Stale);
            assert_eq!(state.remaining_seconds, 60);
        }

        #[test]
        fn test_tick_after_halt_is_stale() {
            let mut state = SessionState::new();
            let generation = state.begin(SessionKind::Focus, 60);
            state.halt();

            assert_eq!(state.tick(generation), TickOutcome::Stale);
            assert_eq!(state.remaining_seconds, 60);
        }

        #[test]
        fn test_focus_completion_increments_counter() {
            let mut state = SessionState::new();
            let generation = state.begin(SessionKind::Focus, 1);

            assert_eq!(
                state.tick(generation),
                TickOutcome::Finished {
                    kind: SessionKind::Focus,
                    completed_focus_count: 1
                }
            );
            assert!(!state.running);
            assert_eq!(state.status, SessionStatus::Finished(SessionKind::Focus));
        }

        #[test]
        fn test_break_completion_keeps_counter() {
            let mut state = SessionState::new();
            state.completed_focus_count = 2;
            let generation = state.begin(SessionKind::Break, 1);

            state.tick(generation);
            assert_eq!(state.completed_focus_count, 2);
            assert_eq!(state.status, SessionStatus::Finished(SessionKind::Break));
        }

        #[test]
        fn test_counter_wraps_after_cycle() {
            let mut state = SessionState::new();
            for expected in [1, 2, 3, 4, 1, 2] {
                state.record_focus_completion();
                assert_eq!(state.completed_focus_count, expected);
            }
        }

        #[test]
        fn test_next_session_fresh_start_is_focus() {
            let state = SessionState::new();
            let settings = TimerSettings::default();
            assert_eq!(
                state.next_session(&settings),
                (SessionKind::Focus, 25 * 60)
            );
        }

        #[test]
        fn test_next_session_after_focus_is_break() {
            let mut state = SessionState::new();
            let settings = TimerSettings::default();
            state.begin(SessionKind::Focus, 60);
            state.halt();

            assert_eq!(state.next_session(&settings), (SessionKind::Break, 5 * 60));
        }

        #[test]
        fn test_next_session_long_break_when_cycle_full() {
            let mut state = SessionState::new();
            let settings = TimerSettings::default();
            state.completed_focus_count = 4;
            state.begin(SessionKind::Focus, 60);
            state.halt();

            assert_eq!(
                state.next_session(&settings),
                (SessionKind::Break, 15 * 60)
            );
        }

        #[test]
        fn test_next_session_after_break_is_focus() {
            let mut state = SessionState::new();
            let settings = TimerSettings::default();
            state.begin(SessionKind::Break, 60);
            state.halt();

            assert_eq!(state.next_session(&settings), (SessionKind::Focus, 25 * 60));
        }

        #[test]
        fn test_display_changed() {
            let mut state = SessionState::new();
            assert!(state.display_changed("25"));
            assert!(!state.display_changed("25"));
            assert!(state.display_changed("24"));

            state.begin(SessionKind::Focus, 60);
            assert!(state.display_changed("24"));
        }
    }
}
