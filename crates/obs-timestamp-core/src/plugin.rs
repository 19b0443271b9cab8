//! Plugin lifecycle: load, post-load, pre-save and unload.
//!
//! Registration is scoped to the [`TimestampPlugin`] value. Dropping it
//! releases the hotkey and the event subscription even if `unload` was
//! never called.

use crate::{
    Clock, ConfigResolver, EventDispatcher, FrontendEvent, HostConfig, HostFacilities, HotkeyId,
    MarkerCallbacks, SessionContext,
};

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

/// Module name reported to the host.
pub const MODULE_NAME: &str = "OBS Timestamp Marker";

/// Module description reported to the host.
pub const MODULE_DESCRIPTION: &str =
    "OBS Timestamp Marker Plugin - Create markers during recording for Premiere Pro";

/// Internal name of the marker hotkey.
pub const HOTKEY_NAME: &str = "timestamp_marker";

/// User-facing description of the marker hotkey.
pub const HOTKEY_DESCRIPTION: &str = "Create Timestamp Marker";

/// A loaded marker plugin bound to a host.
pub struct TimestampPlugin<F: HostFacilities> {
    facilities: F,
    dispatcher: EventDispatcher,
    hotkey_id: Option<HotkeyId>,
    subscribed: bool,
}

impl<F: HostFacilities> TimestampPlugin<F> {
    /// Initialize the plugin: resolve the marker file path, register the
    /// marker hotkey and subscribe to frontend events.
    ///
    /// A refused hotkey registration is logged and leaves the plugin loaded
    /// without a hotkey; recording start/stop markers still work.
    #[instrument(skip_all)]
    pub fn load(mut facilities: F, config: Box<dyn HostConfig>, clock: Box<dyn Clock>) -> Self {
        info!(module = MODULE_NAME, version = env!("CARGO_PKG_VERSION"), "Plugin loading");

        let output_path = ConfigResolver::new(config.as_ref()).resolve_output_path();
        info!(output_path = ?output_path, "Using marker file");

        let hotkey_id = match facilities.register_hotkey(HOTKEY_NAME, HOTKEY_DESCRIPTION) {
            Ok(id) => {
                info!(hotkey_id = %id, "Hotkey registered");
                Some(id)
            }
            Err(e) => {
                error!(error = ?e, "Failed to register hotkey");
                None
            }
        };

        facilities.subscribe_frontend_events();

        let context = SessionContext::new(output_path, clock);

        Self {
            facilities,
            dispatcher: EventDispatcher::new(context, config),
            hotkey_id,
            subscribed: true,
        }
    }

    /// Apply the user's persisted hotkey bindings.
    #[instrument(skip(self))]
    pub fn post_load(&mut self) {
        let Some(id) = self.hotkey_id else {
            return;
        };

        if let Err(e) = self.facilities.load_hotkey_bindings(id) {
            warn!(hotkey_id = %id, error = ?e, "Failed to load hotkey bindings");
        }
    }

    /// Persist the current hotkey bindings.
    #[instrument(skip(self))]
    pub fn pre_save(&mut self) {
        let Some(id) = self.hotkey_id else {
            return;
        };

        if let Err(e) = self.facilities.save_hotkey_bindings(id) {
            warn!(hotkey_id = %id, error = ?e, "Failed to save hotkey bindings");
        }
    }

    /// Release the hotkey and the event subscription. Safe to call twice.
    #[instrument(skip(self))]
    pub fn unload(&mut self) {
        if !self.subscribed && self.hotkey_id.is_none() {
            return;
        }

        if let Some(id) = self.hotkey_id.take() {
            self.facilities.unregister_hotkey(id);
        }

        if self.subscribed {
            self.facilities.unsubscribe_frontend_events();
            self.subscribed = false;
        }

        info!("Plugin cleaned up");
    }

    /// Route a hotkey state change from the host.
    ///
    /// Presses of hotkeys this plugin did not register are ignored.
    pub fn handle_hotkey(&mut self, id: HotkeyId, pressed: bool) {
        if self.hotkey_id != Some(id) {
            return;
        }
        self.dispatcher.on_hotkey_pressed(pressed);
    }

    /// Route a frontend notification from the host.
    ///
    /// Ignored once the plugin has unsubscribed.
    pub fn handle_frontend_event(&mut self, event: FrontendEvent) {
        if !self.subscribed {
            return;
        }
        self.dispatcher.on_recording_lifecycle_event(event);
    }

    /// The registered marker hotkey, if registration succeeded.
    pub fn hotkey_id(&self) -> Option<HotkeyId> {
        self.hotkey_id
    }

    /// Whether frontend events are being delivered.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Whether a recording session is active.
    pub fn is_recording(&self) -> bool {
        self.dispatcher.context().session().is_active()
    }

    /// Current marker file path.
    pub fn output_path(&self) -> &Path {
        self.dispatcher.context().output_path()
    }

    /// Replace the marker file path. Empty paths are ignored.
    pub fn set_output_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.dispatcher.context_mut().set_output_path(path);
    }

    /// The host facilities the plugin registered with.
    pub fn facilities(&self) -> &F {
        &self.facilities
    }
}

impl<F: HostFacilities> Drop for TimestampPlugin<F> {
    fn drop(&mut self) {
        self.unload();
    }
}
