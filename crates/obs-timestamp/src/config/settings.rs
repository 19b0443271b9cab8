//! Settings for the standalone desktop host.
//!
//! Holds the hotkey bindings and a stand-in for the host's active profile,
//! persisted as TOML in the platform config directory.

use crate::{
    HostError, HostResult,
    config::{DEFAULT_FPS_COMMON, DEFAULT_MARKER_BINDING},
};

use obs_timestamp_core::HOTKEY_NAME;

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    panic::Location,
    path::{Path, PathBuf},
};

use directories::{ProjectDirs, UserDirs};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

const SETTINGS_FILE_NAME: &str = "config.toml";

/// One profile section: key to value.
pub type ProfileSection = BTreeMap<String, toml::Value>;

/// Persisted desktop host settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSettings {
    /// Hotkey binding strings keyed by hotkey name.
    #[serde(default)]
    pub hotkeys: BTreeMap<String, String>,
    /// Profile sections mirroring the host's recording configuration.
    #[serde(default)]
    pub profile: BTreeMap<String, ProfileSection>,
}

impl HostSettings {
    /// Load settings from the platform config directory, creating the
    /// defaults if no file exists yet.
    #[track_caller]
    #[instrument]
    pub fn load() -> HostResult<(Self, PathBuf)> {
        let path = Self::settings_path()?;

        if path.exists() {
            let settings = Self::load_from(&path)?;
            info!(settings_path = ?path, "Settings loaded");
            Ok((settings, path))
        } else {
            info!("No settings found, creating default");
            let settings = Self::with_defaults();
            settings.save_to(&path)?;
            Ok((settings, path))
        }
    }

    /// Read and parse the settings file at `path`.
    #[track_caller]
    pub fn load_from(path: &Path) -> HostResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Cannot read {}: {}", path.display(), e)))?;

        Self::from_toml(&contents)
    }

    /// Parse settings from TOML text.
    #[track_caller]
    pub fn from_toml(contents: &str) -> HostResult<Self> {
        toml::from_str(contents).map_err(|e| config_error(format!("Invalid settings: {}", e)))
    }

    /// Save settings to `path`. The file is replaced atomically, so a crash
    /// mid-save leaves the previous settings intact.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> HostResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| config_error(format!("Cannot encode settings: {}", e)))?;

        replace_file(path, contents.as_bytes())
            .map_err(|e| config_error(format!("Cannot save {}: {}", path.display(), e)))?;

        info!(settings_path = ?path, "Settings saved");

        Ok(())
    }

    /// Re-read the profile sections from `path`, keeping in-memory hotkey
    /// bindings.
    #[track_caller]
    pub fn reload_profile(&mut self, path: &Path) -> HostResult<()> {
        let on_disk = Self::load_from(path)?;
        self.profile = on_disk.profile;
        debug!(settings_path = ?path, "Profile reloaded");
        Ok(())
    }

    /// Default settings: the marker hotkey on CTRL+SHIFT+M and a simple
    /// output profile recording into the user's video directory.
    pub fn with_defaults() -> Self {
        let recording_path = UserDirs::new()
            .and_then(|dirs| dirs.video_dir().map(Path::to_path_buf))
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut settings = Self::default();
        settings
            .hotkeys
            .insert(HOTKEY_NAME.to_string(), DEFAULT_MARKER_BINDING.to_string());
        settings.set_profile_value("Output", "Mode", toml::Value::String("Simple".to_string()));
        settings.set_profile_value("SimpleOutput", "FilePath", toml::Value::String(recording_path));
        settings.set_profile_value("Video", "FPSType", toml::Value::Integer(2));
        settings.set_profile_value(
            "Video",
            "FPSCommon",
            toml::Value::String(DEFAULT_FPS_COMMON.to_string()),
        );
        settings
    }

    /// Binding string for the hotkey called `name`.
    pub fn binding(&self, name: &str) -> Option<&str> {
        self.hotkeys.get(name).map(String::as_str)
    }

    /// Store the binding string for the hotkey called `name`.
    pub fn set_binding(&mut self, name: &str, binding: &str) {
        self.hotkeys.insert(name.to_string(), binding.to_string());
    }

    /// Raw profile value.
    pub fn profile_value(&self, section: &str, key: &str) -> Option<&toml::Value> {
        self.profile.get(section).and_then(|s| s.get(key))
    }

    /// Set a profile value, creating the section if needed.
    pub fn set_profile_value(&mut self, section: &str, key: &str, value: toml::Value) {
        self.profile
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Directory handed to the plugin as its per-plugin config directory.
    pub fn module_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    #[track_caller]
    fn settings_path() -> HostResult<PathBuf> {
        let config_dir = Self::project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| config_error("No home directory to keep settings in"))?;

        fs::create_dir_all(&config_dir)?;
        debug!(config_dir = ?config_dir, "Settings directory ready");

        Ok(config_dir.join(SETTINGS_FILE_NAME))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "obs-timestamp", "OBS-Timestamp")
    }
}

#[track_caller]
fn config_error(reason: impl Into<String>) -> HostError {
    HostError::ConfigError {
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Write `contents` beside `path`, flush it to disk, then rename over
/// `path`.
fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let staging = path.with_extension("toml.tmp");

    let mut file = fs::File::create(&staging)?;
    file.write_all(contents)?;
    file.sync_all()?;

    fs::rename(&staging, path)
}
