//! Presentation shell for the tray timer.
//!
//! This module provides:
//! - The tray menu model and its mapping to [`Intent`]s
//! - Icon text and tooltip formatting
//! - A console shell that reads commands from stdin
//! - The tray icon itself on macOS and Windows
//!
//! # Architecture
//!
//! - `icon.rs`: Icon text and tooltip formatting (platform-independent)
//! - `menu.rs`: Menu layout (platform-independent)
//! - `event.rs`: Menu ids, intents and tray updates (platform-independent)
//! - `console.rs`: stdin commands (platform-independent)
//! - `native.rs`: tray-icon and tao event loop (macOS and Windows)
//! - `mod.rs`: TrayIconManager
//!
//! The session controller never touches the tray. It sends [`TrayUpdate`]s
//! over a crossbeam channel, and the manager applies them on the thread that
//! owns the tray.
//!
//! ```ignore
//! use pomotray::menubar::{TrayIconManager, TrayUpdate};
//! use crossbeam_channel::unbounded;
//!
//! let (update_tx, update_rx) = unbounded();
//! let (intent_tx, intent_rx) = unbounded();
//! let manager = TrayIconManager::new(update_rx, intent_rx, true);
//!
//! manager.run(false, move |intent| runtime.block_on(controller.dispatch(intent)))?;
//! ```

pub mod console;
pub mod event;
pub mod icon;
pub mod menu;

#[cfg(any(target_os = "macos", target_os = "windows"))]
mod native;

pub use console::{parse_command, spawn_stdin_reader, ConsoleCommand, CONSOLE_HELP};
pub use event::{EventHandler, MenuItemId, TrayUpdate};
pub use icon::IconManager;
pub use menu::{MenuBuilder, MenuConfig, MenuEntry, MenuItemConfig};

use crossbeam_channel::{Receiver, TryRecvError};

use crate::session::{Flow, Intent};

// ============================================================================
// TrayIconManager
// ============================================================================

/// Owns the tray (or its headless stand-in) and runs the shell loop.
pub struct TrayIconManager {
    /// Menu builder for the native menu
    menu_builder: MenuBuilder,
    /// Maps clicks to intents
    event_handler: EventHandler,
    /// Updates from the session controller
    update_rx: Receiver<TrayUpdate>,
    /// Intents from the console and signal handlers
    intent_rx: Receiver<Intent>,
    /// Last icon PNG received
    last_icon: Option<Vec<u8>>,
    /// Last tooltip received
    tooltip: Option<String>,
    /// Clock sound check mark
    clock_sound: bool,
    /// Whether the shell is up
    initialized: bool,
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    native: Option<native::NativeTray>,
}

impl TrayIconManager {
    /// Creates a manager. Nothing is shown until [`run`](Self::run).
    pub fn new(
        update_rx: Receiver<TrayUpdate>,
        intent_rx: Receiver<Intent>,
        clock_sound: bool,
    ) -> Self {
        Self {
            menu_builder: MenuBuilder::default(),
            event_handler: EventHandler::new(),
            update_rx,
            intent_rx,
            last_icon: None,
            tooltip: None,
            clock_sound,
            initialized: false,
            #[cfg(any(target_os = "macos", target_os = "windows"))]
            native: None,
        }
    }

    /// Returns whether the shell is up.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last tooltip received.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Last icon received, as PNG bytes.
    pub fn last_icon(&self) -> Option<&[u8]> {
        self.last_icon.as_deref()
    }

    /// Current clock sound check mark.
    pub fn clock_sound(&self) -> bool {
        self.clock_sound
    }

    /// Builds the menu layout for the current check state.
    pub fn generate_menu_config(&self) -> MenuConfig {
        self.menu_builder.build(self.clock_sound)
    }

    /// Applies one update. Returns false once shutdown was requested.
    pub fn handle_update(&mut self, update: TrayUpdate) -> bool {
        match update {
            TrayUpdate::SetIcon(png) => {
                tracing::debug!(bytes = png.len(), "Icon updated");
                #[cfg(any(target_os = "macos", target_os = "windows"))]
                if let Some(native) = &self.native {
                    native.set_icon(&png);
                }
                self.last_icon = Some(png);
            }
            TrayUpdate::SetTooltip(tooltip) => {
                tracing::debug!(tooltip = %tooltip, "Tooltip updated");
                if !self.has_native() && !is_countdown(&tooltip) {
                    println!("{}", tooltip);
                }
                #[cfg(any(target_os = "macos", target_os = "windows"))]
                if let Some(native) = &self.native {
                    native.set_tooltip(&tooltip);
                }
                self.tooltip = Some(tooltip);
            }
            TrayUpdate::SoundChecked(checked) => {
                tracing::debug!(checked, "Clock sound check mark updated");
                if !self.has_native() {
                    println!("Clock sound: {}", if checked { "on" } else { "off" });
                }
                #[cfg(any(target_os = "macos", target_os = "windows"))]
                if let Some(native) = &self.native {
                    native.set_sound_checked(checked);
                }
                self.clock_sound = checked;
            }
            TrayUpdate::Shutdown => {
                tracing::info!("Tray shutting down");
                self.shutdown();
                return false;
            }
        }
        true
    }

    /// Applies every queued update. Returns false if one of them was a shutdown.
    pub fn process_pending_updates(&mut self) -> bool {
        loop {
            match self.update_rx.try_recv() {
                Ok(update) => {
                    if !self.handle_update(update) {
                        return false;
                    }
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("Tray update channel disconnected");
                    return false;
                }
            }
        }
    }

    /// Removes the tray icon.
    pub fn shutdown(&mut self) {
        self.initialized = false;
        #[cfg(any(target_os = "macos", target_os = "windows"))]
        {
            self.native = None;
        }
    }

    /// Runs the shell until the user quits.
    ///
    /// Shows the native tray where supported unless `headless` is set; the
    /// console intents are honoured either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the native event loop cannot be set up.
    pub fn run<F>(self, headless: bool, dispatch: F) -> anyhow::Result<()>
    where
        F: FnMut(Intent) -> Flow + 'static,
    {
        #[cfg(any(target_os = "macos", target_os = "windows"))]
        if !headless {
            return native::run(self, dispatch);
        }

        if !headless {
            tracing::warn!("No native tray on this platform, running in the console");
        }
        self.run_headless(dispatch);
        Ok(())
    }

    /// Runs the console-only shell loop.
    pub fn run_headless<F>(mut self, mut dispatch: F)
    where
        F: FnMut(Intent) -> Flow,
    {
        let updates = self.update_rx.clone();
        let intents = self.intent_rx.clone();
        self.initialized = true;
        println!("{}", CONSOLE_HELP);

        loop {
            crossbeam_channel::select! {
                recv(updates) -> update => match update {
                    Ok(update) => {
                        if !self.handle_update(update) {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                recv(intents) -> intent => match intent {
                    Ok(intent) => {
                        if dispatch(intent) == Flow::Quit {
                            self.process_pending_updates();
                            break;
                        }
                    }
                    Err(_) => break,
                },
            }
        }

        self.shutdown();
    }

    fn has_native(&self) -> bool {
        #[cfg(any(target_os = "macos", target_os = "windows"))]
        {
            self.native.is_some()
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            false
        }
    }
}

/// True for "MM:SS" tooltips, which change every second.
fn is_countdown(tooltip: &str) -> bool {
    tooltip.len() >= 5
        && tooltip.bytes().filter(|b| *b == b':').count() == 1
        && tooltip.bytes().all(|b| b == b':' || b.is_ascii_digit())
}

impl std::fmt::Debug for TrayIconManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayIconManager")
            .field("initialized", &self.initialized)
            .field("tooltip", &self.tooltip)
            .field("clock_sound", &self.clock_sound)
            .field("menu_builder", &self.menu_builder)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
