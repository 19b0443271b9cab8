//! OBS Timestamp: standalone desktop host for the timestamp marker plugin.
//!
//! Runs the plugin outside OBS. A tray menu starts and stops "recordings"
//! and a global hotkey drops markers into the timestamps file.

mod app;
mod config;
mod desktop_facilities;
mod error;
mod host_event;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::DesktopHost,
    desktop_facilities::DesktopFacilities,
    error::{HostError, Result as HostResult},
    host_event::HostEvent,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::config::HostSettings;

use obs_timestamp_core::{MODULE_DESCRIPTION, MODULE_NAME};

use global_hotkey::GlobalHotKeyEvent;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tray_icon::menu::MenuEvent;

const DEFAULT_LOG_FILTER: &str = "obs_timestamp=debug,obs_timestamp_core=debug";

/// Application entry point.
fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(module = MODULE_NAME, description = MODULE_DESCRIPTION, "Starting");

    let event_loop = EventLoopBuilder::<HostEvent>::with_user_event().build();

    // Hotkey and menu handlers may fire off the main thread; forward both
    // into the event loop.
    let hotkey_proxy = event_loop.create_proxy();
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        if hotkey_proxy.send_event(HostEvent::Hotkey(event)).is_err() {
            warn!("Event loop closed, dropping hotkey event");
        }
    }));
    let menu_proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        if menu_proxy.send_event(HostEvent::Menu(event)).is_err() {
            warn!("Event loop closed, dropping menu event");
        }
    }));

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => Some(tm),
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    let mut host: Option<DesktopHost> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                let (settings, settings_path) = match HostSettings::load() {
                    Ok(loaded) => loaded,
                    Err(e) => {
                        error!("Failed to load settings: {:?}", e);
                        std::process::exit(1);
                    }
                };

                // Register hotkeys on the main thread; tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let manager = match desktop_facilities::create_manager() {
                    Ok(manager) => manager,
                    Err(e) => {
                        error!("Failed to create hotkey manager: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let Some(tray) = tray_manager.take() else {
                    return;
                };

                host = Some(DesktopHost::start(manager, settings, settings_path, tray));
            }
            Event::UserEvent(event) => {
                let Some(running) = host.as_mut() else {
                    return;
                };

                if !running.handle_event(event) {
                    running.shutdown();
                    host = None;
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            }
            _ => {}
        }
    });
}
