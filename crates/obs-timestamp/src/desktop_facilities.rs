//! Global hotkey registration backing the plugin's host facilities.
//!
//! The plugin sees stable [`HotkeyId`]s; the `global-hotkey` crate derives
//! its ids from the key combination, so they change when a binding does.
//! This module keeps the mapping between the two.

use crate::{
    HostError, HostResult,
    config::{DEFAULT_MARKER_BINDING, HostSettings},
};

use obs_timestamp_core::{CoreResult, HostFacilities, HotkeyId, MarkerError};

use std::{
    collections::HashMap,
    panic::Location,
    path::PathBuf,
    str::FromStr,
    sync::{Arc, Mutex},
};

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyManager, hotkey::HotKey};
use tracing::{debug, info, instrument, warn};

/// Parse a binding string such as `control+shift+KeyM`.
#[track_caller]
pub(crate) fn parse_binding(binding: &str) -> CoreResult<HotKey> {
    HotKey::from_str(binding).map_err(|e| MarkerError::HotkeyBinding {
        reason: format!("Invalid binding {:?}: {}", binding, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Create the OS hotkey manager. Must run on the event loop thread.
#[track_caller]
pub(crate) fn create_manager() -> HostResult<GlobalHotKeyManager> {
    GlobalHotKeyManager::new().map_err(|e| HostError::Hotkey {
        reason: format!("Failed to create hotkey manager: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

struct RegisteredHotkey {
    name: String,
    binding: String,
    hotkey: HotKey,
}

/// Host facilities for the desktop: OS-wide hotkeys plus a flag standing
/// in for the frontend event subscription.
///
/// Must live on the thread running the event loop; on Windows hotkey
/// messages are only delivered to the registering thread.
pub struct DesktopFacilities {
    manager: GlobalHotKeyManager,
    settings: Arc<Mutex<HostSettings>>,
    settings_path: PathBuf,
    hotkeys: HashMap<HotkeyId, RegisteredHotkey>,
    next_id: u32,
    events_subscribed: bool,
}

impl DesktopFacilities {
    /// Create facilities persisting bindings to `settings_path`.
    pub fn new(
        manager: GlobalHotKeyManager,
        settings: Arc<Mutex<HostSettings>>,
        settings_path: PathBuf,
    ) -> Self {
        Self {
            manager,
            settings,
            settings_path,
            hotkeys: HashMap::new(),
            next_id: 1,
            events_subscribed: false,
        }
    }

    /// Translate a raw `global-hotkey` event id to the plugin-facing id.
    pub fn resolve(&self, raw_id: u32) -> Option<HotkeyId> {
        self.hotkeys
            .iter()
            .find(|(_, registered)| registered.hotkey.id() == raw_id)
            .map(|(id, _)| *id)
    }

    /// Whether the plugin currently wants frontend events.
    pub fn events_subscribed(&self) -> bool {
        self.events_subscribed
    }

    fn stored_binding(&self, name: &str) -> Option<String> {
        let settings = self.settings.lock().unwrap_or_else(|e| e.into_inner());
        settings.binding(name).map(str::to_string)
    }

    #[track_caller]
    fn register_with_os(&self, hotkey: HotKey, binding: &str) -> CoreResult<()> {
        self.manager
            .register(hotkey)
            .map_err(|e| MarkerError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", binding, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn persist(&self) -> HostResult<()> {
        let settings = self.settings.lock().unwrap_or_else(|e| e.into_inner());
        settings.save_to(&self.settings_path)
    }
}

impl HostFacilities for DesktopFacilities {
    #[track_caller]
    #[instrument(skip(self))]
    fn register_hotkey(&mut self, name: &str, description: &str) -> CoreResult<HotkeyId> {
        let binding = self
            .stored_binding(name)
            .unwrap_or_else(|| DEFAULT_MARKER_BINDING.to_string());

        let hotkey = parse_binding(&binding).map_err(|e| MarkerError::HotkeyRegistrationFailed {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        self.register_with_os(hotkey, &binding)?;

        let id = HotkeyId(self.next_id);
        self.next_id += 1;
        self.hotkeys.insert(
            id,
            RegisteredHotkey {
                name: name.to_string(),
                binding: binding.clone(),
                hotkey,
            },
        );

        info!(hotkey_id = %id, hotkey = %binding, description, "Global hotkey registered");

        Ok(id)
    }

    #[instrument(skip(self))]
    fn unregister_hotkey(&mut self, id: HotkeyId) {
        let Some(registered) = self.hotkeys.remove(&id) else {
            return;
        };

        if let Err(e) = self.manager.unregister(registered.hotkey) {
            warn!(hotkey = %registered.binding, error = %e, "Failed to unregister hotkey");
        } else {
            debug!(hotkey = %registered.binding, "Global hotkey unregistered");
        }
    }

    fn subscribe_frontend_events(&mut self) {
        self.events_subscribed = true;
    }

    fn unsubscribe_frontend_events(&mut self) {
        self.events_subscribed = false;
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn load_hotkey_bindings(&mut self, id: HotkeyId) -> CoreResult<()> {
        let Some(registered) = self.hotkeys.get(&id) else {
            return Err(MarkerError::HotkeyBinding {
                reason: format!("Unknown hotkey {}", id),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let Some(binding) = self.stored_binding(&registered.name) else {
            return Ok(());
        };
        if binding == registered.binding {
            return Ok(());
        }

        let hotkey = parse_binding(&binding)?;
        let previous = registered.hotkey;

        // Bind the new combination before dropping the old one so a failure
        // leaves the previous binding working.
        self.register_with_os(hotkey, &binding)?;
        if let Err(e) = self.manager.unregister(previous) {
            warn!(error = %e, "Failed to unregister previous binding");
        }

        if let Some(registered) = self.hotkeys.get_mut(&id) {
            info!(hotkey_id = %id, from = %registered.binding, to = %binding, "Hotkey rebound");
            registered.binding = binding;
            registered.hotkey = hotkey;
        }

        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn save_hotkey_bindings(&mut self, id: HotkeyId) -> CoreResult<()> {
        let Some(registered) = self.hotkeys.get(&id) else {
            return Err(MarkerError::HotkeyBinding {
                reason: format!("Unknown hotkey {}", id),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        {
            let mut settings = self.settings.lock().unwrap_or_else(|e| e.into_inner());
            settings.set_binding(&registered.name, &registered.binding);
        }

        self.persist().map_err(|e| MarkerError::HotkeyBinding {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
