use crate::CoreResult;

use std::fmt;

/// Host-assigned handle for a registered hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyId(pub u32);

impl fmt::Display for HotkeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration services the host offers the plugin.
///
/// The host keeps the callbacks themselves: once registered, it routes
/// presses of the returned [`HotkeyId`] and frontend notifications to
/// [`TimestampPlugin`](crate::TimestampPlugin) on its own dispatch thread.
pub trait HostFacilities {
    /// Register a frontend hotkey under `name`, shown to users as
    /// `description`.
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses the registration.
    fn register_hotkey(&mut self, name: &str, description: &str) -> CoreResult<HotkeyId>;

    /// Release a hotkey previously returned by `register_hotkey`.
    fn unregister_hotkey(&mut self, id: HotkeyId);

    /// Start delivering frontend lifecycle events to the plugin.
    fn subscribe_frontend_events(&mut self);

    /// Stop delivering frontend lifecycle events.
    fn unsubscribe_frontend_events(&mut self);

    /// Apply the user's persisted bindings for `id`.
    ///
    /// # Errors
    ///
    /// Returns error if the stored binding cannot be read or applied.
    fn load_hotkey_bindings(&mut self, id: HotkeyId) -> CoreResult<()>;

    /// Persist the current bindings for `id`.
    ///
    /// # Errors
    ///
    /// Returns error if the binding cannot be stored.
    fn save_hotkey_bindings(&mut self, id: HotkeyId) -> CoreResult<()>;
}
