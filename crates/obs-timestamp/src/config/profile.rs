use crate::config::HostSettings;

use obs_timestamp_core::HostConfig;

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

/// [`HostConfig`] view over the shared desktop settings.
///
/// Reads go through the shared lock each time, so a profile reloaded from
/// disk is picked up by the next recording.
pub struct ProfileSettings {
    settings: Arc<Mutex<HostSettings>>,
    module_config_dir: Option<PathBuf>,
}

impl ProfileSettings {
    /// Create a view over `settings` using `module_config_dir` as the
    /// plugin's config directory.
    pub fn new(settings: Arc<Mutex<HostSettings>>, module_config_dir: Option<PathBuf>) -> Self {
        Self {
            settings,
            module_config_dir,
        }
    }

    fn with_value<T>(
        &self,
        section: &str,
        key: &str,
        f: impl FnOnce(&toml::Value) -> Option<T>,
    ) -> Option<T> {
        // Lock poisoning only means another thread panicked mid-read;
        // the settings themselves are still usable.
        let settings = self.settings.lock().unwrap_or_else(|e| e.into_inner());
        settings.profile_value(section, key).and_then(f)
    }
}

impl HostConfig for ProfileSettings {
    fn module_config_dir(&self) -> Option<PathBuf> {
        self.module_config_dir.clone()
    }

    fn profile_string(&self, section: &str, key: &str) -> Option<String> {
        self.with_value(section, key, |value| match value {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            _ => None,
        })
    }

    fn profile_uint(&self, section: &str, key: &str) -> Option<u64> {
        self.with_value(section, key, |value| match value {
            toml::Value::Integer(i) => u64::try_from(*i).ok(),
            toml::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}
