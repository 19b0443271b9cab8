mod profile;
mod settings;

pub(crate) use {profile::ProfileSettings, settings::HostSettings};

/// Default binding for the marker hotkey.
pub(crate) const DEFAULT_MARKER_BINDING: &str = "control+shift+KeyM";

/// Common frame rate written into a freshly created profile.
pub(crate) const DEFAULT_FPS_COMMON: &str = "60";
