//! Event handling for tray interactions.
//!
//! This module handles:
//! - Mapping menu items and icon clicks to [`Intent`]s
//! - The [`TrayUpdate`] messages the session controller sends back
//!
//! Everything here is platform-independent. The native tray code only
//! translates toolkit ids through [`MenuItemId::from_id`].

use crate::session::Intent;

// ============================================================================
// MenuItemId
// ============================================================================

/// Identifiers for menu items.
///
/// The string form is used as the native menu item id, so toolkit events can
/// be mapped back without keeping handles around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    /// "Pomodoro Timer vX.Y.Z", opens the project page
    Website,
    /// "Start Pomodoro"
    StartPomodoro,
    /// "Start Break"
    StartBreak,
    /// "Start Long Break"
    StartLongBreak,
    /// "Clock sound" check item
    ClockSound,
    /// "Settings"
    Settings,
    /// "Exit"
    Exit,
    /// Unknown or unhandled menu item
    Unknown,
}

impl MenuItemId {
    /// Returns the native id for this item.
    pub fn as_id(&self) -> &'static str {
        match self {
            MenuItemId::Website => "website",
            MenuItemId::StartPomodoro => "start-pomodoro",
            MenuItemId::StartBreak => "start-break",
            MenuItemId::StartLongBreak => "start-long-break",
            MenuItemId::ClockSound => "clock-sound",
            MenuItemId::Settings => "settings",
            MenuItemId::Exit => "exit",
            MenuItemId::Unknown => "unknown",
        }
    }

    /// Parses a native id; unrecognized ids map to `Unknown`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "website" => MenuItemId::Website,
            "start-pomodoro" => MenuItemId::StartPomodoro,
            "start-break" => MenuItemId::StartBreak,
            "start-long-break" => MenuItemId::StartLongBreak,
            "clock-sound" => MenuItemId::ClockSound,
            "settings" => MenuItemId::Settings,
            "exit" => MenuItemId::Exit,
            _ => MenuItemId::Unknown,
        }
    }

    /// Converts a menu item to the intent it triggers.
    pub fn to_intent(&self) -> Option<Intent> {
        match self {
            MenuItemId::Website => Some(Intent::OpenWebsite),
            MenuItemId::StartPomodoro => Some(Intent::StartFocus),
            MenuItemId::StartBreak => Some(Intent::StartBreak),
            MenuItemId::StartLongBreak => Some(Intent::StartLongBreak),
            MenuItemId::ClockSound => Some(Intent::ToggleSound),
            MenuItemId::Settings => Some(Intent::EditSettings),
            MenuItemId::Exit => Some(Intent::Quit),
            MenuItemId::Unknown => None,
        }
    }
}

// ============================================================================
// EventHandler
// ============================================================================

/// Turns tray interactions into intents, with logging.
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Processes a menu item click.
    pub fn handle_click(&self, item_id: MenuItemId) -> Option<Intent> {
        let intent = item_id.to_intent();
        match intent {
            Some(intent) => tracing::info!(intent = %intent, "Menu item selected"),
            None => tracing::debug!(item = item_id.as_id(), "Ignoring menu item"),
        }
        intent
    }

    /// Processes a click on the icon itself.
    pub fn handle_icon_click(&self) -> Intent {
        tracing::info!(intent = %Intent::Toggle, "Tray icon clicked");
        Intent::Toggle
    }
}

// ============================================================================
// TrayUpdate
// ============================================================================

/// Updates sent to the tray from the session controller.
///
/// Sent over a crossbeam channel from tokio tasks to the thread that owns
/// the tray icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// Replace the icon image with these PNG bytes
    SetIcon(Vec<u8>),
    /// Replace the tooltip text
    SetTooltip(String),
    /// Set the check mark of the clock sound item
    SoundChecked(bool),
    /// Remove the tray icon and stop the shell loop
    Shutdown,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [MenuItemId; 7] = [
        MenuItemId::Website,
        MenuItemId::StartPomodoro,
        MenuItemId::StartBreak,
        MenuItemId::StartLongBreak,
        MenuItemId::ClockSound,
        MenuItemId::Settings,
        MenuItemId::Exit,
    ];

    mod menu_item_id_tests {
        use super::*;

        #[test]
        fn test_id_round_trip() {
            for item in ITEMS {
                assert_eq!(MenuItemId::from_id(item.as_id()), item);
            }
        }

        #[test]
        fn test_unknown_id() {
            assert_eq!(MenuItemId::from_id("7"), MenuItemId::Unknown);
            assert_eq!(MenuItemId::Unknown.to_intent(), None);
        }

        #[test]
        fn test_to_intent() {
            assert_eq!(MenuItemId::Website.to_intent(), Some(Intent::OpenWebsite));
            assert_eq!(MenuItemId::StartPomodoro.to_intent(), Some(Intent::StartFocus));
            assert_eq!(MenuItemId::StartBreak.to_intent(), Some(Intent::StartBreak));
            assert_eq!(
                MenuItemId::StartLongBreak.to_intent(),
                Some(Intent::StartLongBreak)
            );
            assert_eq!(MenuItemId::ClockSound.to_intent(), Some(Intent::ToggleSound));
            assert_eq!(MenuItemId::Settings.to_intent(), Some(Intent::EditSettings));
            assert_eq!(MenuItemId::Exit.to_intent(), Some(Intent::Quit));
        }
    }

    mod event_handler_tests {
        use super::*;

        #[test]
        fn test_handle_click() {
            let handler = EventHandler::new();
            assert_eq!(handler.handle_click(MenuItemId::Exit), Some(Intent::Quit));
            assert_eq!(handler.handle_click(MenuItemId::Unknown), None);
        }

        #[test]
        fn test_icon_click_toggles() {
            assert_eq!(EventHandler::new().handle_icon_click(), Intent::Toggle);
        }
    }

    #[test]
    fn test_tray_update_eq() {
        assert_eq!(
            TrayUpdate::SetTooltip("25:00".into()),
            TrayUpdate::SetTooltip("25:00".into())
        );
        assert_ne!(TrayUpdate::SoundChecked(true), TrayUpdate::SoundChecked(false));
    }
}
