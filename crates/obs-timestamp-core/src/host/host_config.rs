use std::path::PathBuf;

/// Read access to host-owned configuration.
///
/// Every lookup is optional: a missing profile, section or key is reported
/// as `None` and the caller falls back to its defaults.
pub trait HostConfig: Send {
    /// Per-plugin configuration directory, if the host can provide one.
    fn module_config_dir(&self) -> Option<PathBuf>;

    /// String value from the active profile.
    fn profile_string(&self, section: &str, key: &str) -> Option<String>;

    /// Unsigned integer value from the active profile.
    fn profile_uint(&self, section: &str, key: &str) -> Option<u64>;
}
