use crate::{
    DesktopFacilities, HostEvent, HostResult, TrayIconState, TrayManager,
    config::{HostSettings, ProfileSettings},
};

use obs_timestamp_core::{FrontendEvent, MonotonicClock, TimestampPlugin};

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;
use uuid::Uuid;

/// Standalone desktop host running the timestamp plugin.
///
/// Owns the plugin and the tray, and translates hotkey and menu events into
/// plugin callbacks. Lives on the event loop thread.
pub struct DesktopHost {
    plugin: TimestampPlugin<DesktopFacilities>,
    tray: TrayManager,
    settings: Arc<Mutex<HostSettings>>,
    settings_path: PathBuf,
    host_session_id: Uuid,
}

impl DesktopHost {
    /// Load the plugin against the given settings and run its post-load
    /// step.
    #[instrument(skip_all)]
    pub fn start(
        manager: GlobalHotKeyManager,
        settings: HostSettings,
        settings_path: PathBuf,
        tray: TrayManager,
    ) -> Self {
        let host_session_id = Uuid::new_v4();
        let settings = Arc::new(Mutex::new(settings));

        let facilities =
            DesktopFacilities::new(manager, Arc::clone(&settings), settings_path.clone());
        let config = ProfileSettings::new(Arc::clone(&settings), HostSettings::module_config_dir());

        let mut plugin =
            TimestampPlugin::load(facilities, Box::new(config), Box::new(MonotonicClock::new()));
        plugin.post_load();

        info!(
            host_session_id = %host_session_id,
            output_path = ?plugin.output_path(),
            "Desktop host started"
        );

        Self {
            plugin,
            tray,
            settings,
            settings_path,
            host_session_id,
        }
    }

    /// Handle one event from the loop. Returns `false` once the host should
    /// exit.
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::Hotkey(event) => {
                self.handle_hotkey(event);
                true
            }
            HostEvent::Menu(event) => self.handle_menu(event),
        }
    }

    fn handle_hotkey(&mut self, event: GlobalHotKeyEvent) {
        let Some(id) = self.plugin.facilities().resolve(event.id) else {
            debug!(raw_id = event.id, "Ignoring unknown hotkey");
            return;
        };

        self.plugin
            .handle_hotkey(id, event.state == HotKeyState::Pressed);
    }

    fn handle_menu(&mut self, event: MenuEvent) -> bool {
        if event.id == *self.tray.start_item_id() {
            self.start_recording();
            true
        } else if event.id == *self.tray.stop_item_id() {
            self.stop_recording();
            true
        } else if event.id == *self.tray.exit_item_id() {
            info!(host_session_id = %self.host_session_id, "Exit requested from tray");
            false
        } else {
            true
        }
    }

    fn start_recording(&mut self) {
        if self.plugin.is_recording() {
            return;
        }

        // Pick up profile edits made while idle.
        if let Err(e) = self.reload_profile() {
            warn!(error = ?e, "Failed to reload profile, using previous values");
        }

        self.deliver(FrontendEvent::RecordingStarting);
        self.deliver(FrontendEvent::RecordingStarted);
        self.set_tray_state(TrayIconState::Recording);
    }

    fn stop_recording(&mut self) {
        if !self.plugin.is_recording() {
            return;
        }

        self.deliver(FrontendEvent::RecordingStopping);
        self.deliver(FrontendEvent::RecordingStopped);
        self.set_tray_state(TrayIconState::Idle);
    }

    fn deliver(&mut self, event: FrontendEvent) {
        if self.plugin.facilities().events_subscribed() {
            self.plugin.handle_frontend_event(event);
        }
    }

    fn reload_profile(&self) -> HostResult<()> {
        let mut settings = self.settings.lock().unwrap_or_else(|e| e.into_inner());
        settings.reload_profile(&self.settings_path)
    }

    fn set_tray_state(&mut self, state: TrayIconState) {
        if let Err(e) = self.tray.update_state(state) {
            error!(error = ?e, "Failed to update tray icon");
        }
    }

    /// Stop any recording in progress, persist bindings and unload the
    /// plugin.
    #[instrument(skip(self), fields(host_session_id = %self.host_session_id))]
    pub fn shutdown(&mut self) {
        self.stop_recording();
        self.deliver(FrontendEvent::Exit);
        self.plugin.pre_save();
        self.plugin.unload();
        info!("Desktop host stopped");
    }
}
