//! Native tray icon on macOS and Windows.
//!
//! tray-icon needs an event loop on the main thread, so this runs a tao loop.
//! Menu clicks, icon clicks, console intents and controller updates are all
//! forwarded into it as user events.

use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tray_icon::menu::{CheckMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

use super::event::{MenuItemId, TrayUpdate};
use super::menu::{MenuConfig, MenuEntry};
use super::TrayIconManager;
use crate::session::{Flow, Intent};

#[derive(Debug)]
enum UserEvent {
    Menu(MenuEvent),
    Tray(TrayIconEvent),
    Intent(Intent),
    Update(TrayUpdate),
}

/// The live tray icon and the item whose check mark follows the settings.
pub(super) struct NativeTray {
    tray: TrayIcon,
    clock_sound: Option<CheckMenuItem>,
}

impl NativeTray {
    fn build(config: &MenuConfig, tooltip: &str, icon: Option<Icon>) -> Result<Self> {
        let menu = Menu::new();
        let mut clock_sound = None;

        for entry in &config.entries {
            match entry {
                MenuEntry::Separator => menu.append(&PredefinedMenuItem::separator())?,
                MenuEntry::Item(item) => match item.checked {
                    Some(checked) => {
                        let check = CheckMenuItem::with_id(
                            item.id.as_id(),
                            &item.text,
                            true,
                            checked,
                            None,
                        );
                        menu.append(&check)?;
                        if item.id == MenuItemId::ClockSound {
                            clock_sound = Some(check);
                        }
                    }
                    None => {
                        menu.append(&MenuItem::with_id(item.id.as_id(), &item.text, true, None))?
                    }
                },
            }
        }

        let mut builder = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_menu_on_left_click(false)
            .with_tooltip(tooltip);
        if let Some(icon) = icon {
            builder = builder.with_icon(icon);
        }
        let tray = builder.build().context("Failed to create tray icon")?;

        Ok(Self { tray, clock_sound })
    }

    pub(super) fn set_icon(&self, png: &[u8]) {
        if let Some(icon) = decode_icon(png) {
            if let Err(e) = self.tray.set_icon(Some(icon)) {
                tracing::warn!("Failed to update tray icon: {}", e);
            }
        }
    }

    pub(super) fn set_tooltip(&self, tooltip: &str) {
        if let Err(e) = self.tray.set_tooltip(Some(tooltip)) {
            tracing::warn!("Failed to update tooltip: {}", e);
        }
    }

    pub(super) fn set_sound_checked(&self, checked: bool) {
        if let Some(item) = &self.clock_sound {
            item.set_checked(checked);
        }
    }
}

fn decode_icon(png: &[u8]) -> Option<Icon> {
    let image = match image::load_from_memory(png) {
        Ok(image) => image.to_rgba8(),
        Err(e) => {
            tracing::warn!("Ignoring undecodable icon: {}", e);
            return None;
        }
    };
    let (width, height) = image.dimensions();
    match Icon::from_rgba(image.into_raw(), width, height) {
        Ok(icon) => Some(icon),
        Err(e) => {
            tracing::warn!("Ignoring invalid icon: {}", e);
            None
        }
    }
}

fn forward<T: Send + 'static>(
    name: &str,
    rx: Receiver<T>,
    proxy: EventLoopProxy<UserEvent>,
    wrap: fn(T) -> UserEvent,
) -> Result<()> {
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            for message in rx {
                if proxy.send_event(wrap(message)).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn tray forwarder")?;
    Ok(())
}

/// Runs the tao event loop until the user quits. Never returns on success.
pub(super) fn run<F>(mut manager: TrayIconManager, mut dispatch: F) -> Result<()>
where
    F: FnMut(Intent) -> Flow + 'static,
{
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let menu_proxy = proxy.clone();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = menu_proxy.send_event(UserEvent::Menu(event));
    }));
    let tray_proxy = proxy.clone();
    TrayIconEvent::set_event_handler(Some(move |event| {
        let _ = tray_proxy.send_event(UserEvent::Tray(event));
    }));

    forward("tray-updates", manager.update_rx.clone(), proxy.clone(), UserEvent::Update)?;
    forward("tray-intents", manager.intent_rx.clone(), proxy, UserEvent::Intent)?;

    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;

        let intent = match event {
            Event::NewEvents(StartCause::Init) => {
                if let Err(e) = manager.initialize_native() {
                    tracing::error!("{:#}", e);
                }
                None
            }
            Event::UserEvent(UserEvent::Update(update)) => {
                if !manager.handle_update(update) {
                    *control_flow = ControlFlow::Exit;
                }
                None
            }
            Event::UserEvent(UserEvent::Menu(event)) => {
                let item = MenuItemId::from_id(&event.id.0);
                manager.event_handler.handle_click(item)
            }
            Event::UserEvent(UserEvent::Tray(TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            })) => Some(manager.event_handler.handle_icon_click()),
            Event::UserEvent(UserEvent::Intent(intent)) => Some(intent),
            _ => None,
        };

        if let Some(intent) = intent {
            if dispatch(intent) == Flow::Quit {
                manager.process_pending_updates();
                manager.shutdown();
                *control_flow = ControlFlow::Exit;
            }
        }
    })
}

impl TrayIconManager {
    fn initialize_native(&mut self) -> Result<()> {
        if self.native.is_some() {
            return Ok(());
        }
        let config = self.generate_menu_config();
        let tooltip = self.tooltip.clone().unwrap_or_default();
        let icon = self.last_icon.as_deref().and_then(decode_icon);

        self.native = Some(NativeTray::build(&config, &tooltip, icon)?);
        self.initialized = true;
        tracing::info!("Tray icon initialized");
        Ok(())
    }
}
