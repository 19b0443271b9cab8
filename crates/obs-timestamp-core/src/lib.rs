//! OBS Timestamp Marker core library
//!
//! Records timestamp markers during a recording session and writes them to
//! a JSON Lines file for later conversion into video-editor markers.
//!
//! The host (OBS, or the standalone desktop host) provides configuration
//! and registration services through [`HostConfig`] and [`HostFacilities`]
//! and forwards hotkey presses and lifecycle events to [`TimestampPlugin`].
//!
//! # Example
//!
//! ```no_run
//! use obs_timestamp_core::{
//!     CoreResult, FrontendEvent, HostConfig, HostFacilities, HotkeyId, MonotonicClock,
//!     TimestampPlugin,
//! };
//!
//! use std::path::PathBuf;
//!
//! struct Config;
//!
//! impl HostConfig for Config {
//!     fn module_config_dir(&self) -> Option<PathBuf> {
//!         Some(PathBuf::from("/tmp/obs-timestamp"))
//!     }
//!     fn profile_string(&self, _section: &str, _key: &str) -> Option<String> {
//!         None
//!     }
//!     fn profile_uint(&self, _section: &str, _key: &str) -> Option<u64> {
//!         None
//!     }
//! }
//!
//! struct Facilities;
//!
//! impl HostFacilities for Facilities {
//!     fn register_hotkey(&mut self, _name: &str, _description: &str) -> CoreResult<HotkeyId> {
//!         Ok(HotkeyId(1))
//!     }
//!     fn unregister_hotkey(&mut self, _id: HotkeyId) {}
//!     fn subscribe_frontend_events(&mut self) {}
//!     fn unsubscribe_frontend_events(&mut self) {}
//!     fn load_hotkey_bindings(&mut self, _id: HotkeyId) -> CoreResult<()> {
//!         Ok(())
//!     }
//!     fn save_hotkey_bindings(&mut self, _id: HotkeyId) -> CoreResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut plugin = TimestampPlugin::load(
//!     Facilities,
//!     Box::new(Config),
//!     Box::new(MonotonicClock::new()),
//! );
//!
//! plugin.handle_frontend_event(FrontendEvent::RecordingStarted);
//! plugin.handle_hotkey(HotkeyId(1), true);
//! plugin.handle_frontend_event(FrontendEvent::RecordingStopped);
//! ```

mod config;
mod dispatcher;
mod error;
mod host;
mod output;
mod plugin;
mod session;

pub use {
    config::{ConfigResolver, FrameRate, OUTPUT_FILE_NAME, RecordingSettings},
    dispatcher::{EventDispatcher, MarkerCallbacks},
    error::MarkerError,
    error::Result as CoreResult,
    host::{FrontendEvent, HostConfig, HostFacilities, HotkeyId},
    output::{
        HEADER_TIMESTAMP_FORMAT, MarkerColor, MarkerRecord, MarkerWriter, RECORDING_END_COMMENT,
        RECORDING_START_COMMENT, SessionMetadata,
    },
    plugin::{HOTKEY_DESCRIPTION, HOTKEY_NAME, MODULE_DESCRIPTION, MODULE_NAME, TimestampPlugin},
    session::{Clock, MonotonicClock, RecordingSession, RecordingState, SessionContext},
};

#[cfg(test)]
mod tests;
