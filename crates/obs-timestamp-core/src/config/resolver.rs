//! Derives the marker file location and the session metadata from host
//! configuration.
//!
//! Nothing here fails: unreadable or missing values degrade to the
//! documented defaults so a recording is never blocked by configuration.

use crate::{
    CoreResult, HostConfig, MarkerError,
    config::{FrameRate, OUTPUT_FILE_NAME},
};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

const OUTPUT_SECTION: &str = "Output";
const OUTPUT_MODE_KEY: &str = "Mode";
const ADVANCED_MODE: &str = "Advanced";
const ADVANCED_SECTION: &str = "AdvOut";
const ADVANCED_PATH_KEY: &str = "RecFilePath";
const SIMPLE_SECTION: &str = "SimpleOutput";
const SIMPLE_PATH_KEY: &str = "FilePath";

const VIDEO_SECTION: &str = "Video";
const FPS_TYPE_KEY: &str = "FPSType";
const FPS_COMMON_KEY: &str = "FPSCommon";
const FPS_NUM_KEY: &str = "FPSNum";
const FPS_DEN_KEY: &str = "FPSDen";

/// `FPSType` value selecting a named common rate.
const FPS_TYPE_COMMON: u64 = 2;

/// Host recording settings embedded in the session header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordingSettings {
    /// Directory the host records into; empty when unknown.
    pub recording_path: String,
    /// Output frame rate.
    pub frame_rate: FrameRate,
}

/// Reads plugin paths and recording settings through [`HostConfig`].
pub struct ConfigResolver<'a> {
    config: &'a dyn HostConfig,
}

impl<'a> ConfigResolver<'a> {
    /// Create a resolver over `config`.
    pub fn new(config: &'a dyn HostConfig) -> Self {
        Self { config }
    }

    /// Location of the marker file.
    ///
    /// Uses `<module config dir>/timestamps.jsonl`, creating the directory
    /// if needed, or a bare relative `timestamps.jsonl` when the host has
    /// no config directory to offer.
    #[instrument(skip(self))]
    pub fn resolve_output_path(&self) -> PathBuf {
        let Some(config_dir) = self.config.module_config_dir() else {
            warn!("No plugin config directory available, using working directory");
            return PathBuf::from(OUTPUT_FILE_NAME);
        };

        if let Err(e) = ensure_dir(&config_dir) {
            error!(error = %e, "Failed to create plugin config directory");
        } else {
            info!(config_dir = ?config_dir, "Plugin config directory");
        }

        config_dir.join(OUTPUT_FILE_NAME)
    }

    /// Recording directory and frame rate of the active profile.
    #[instrument(skip(self))]
    pub fn resolve_recording_metadata(&self) -> RecordingSettings {
        let settings = RecordingSettings {
            recording_path: self.recording_path(),
            frame_rate: self.frame_rate(),
        };

        debug!(
            recording_path = %settings.recording_path,
            frame_rate = %settings.frame_rate,
            "Recording settings resolved"
        );

        settings
    }

    fn recording_path(&self) -> String {
        let advanced = self
            .config
            .profile_string(OUTPUT_SECTION, OUTPUT_MODE_KEY)
            .is_some_and(|mode| mode.eq_ignore_ascii_case(ADVANCED_MODE));

        let (section, key) = if advanced {
            (ADVANCED_SECTION, ADVANCED_PATH_KEY)
        } else {
            (SIMPLE_SECTION, SIMPLE_PATH_KEY)
        };

        self.config.profile_string(section, key).unwrap_or_default()
    }

    fn frame_rate(&self) -> FrameRate {
        let fps_type = self.config.profile_uint(VIDEO_SECTION, FPS_TYPE_KEY);

        if fps_type == Some(FPS_TYPE_COMMON) {
            let common = self.config.profile_string(VIDEO_SECTION, FPS_COMMON_KEY);
            return match common.as_deref().and_then(FrameRate::from_common) {
                Some(rate) => rate,
                None => {
                    warn!(fps_common = ?common, "Unrecognised common frame rate, using default");
                    FrameRate::DEFAULT
                }
            };
        }

        let num = self.profile_u32(FPS_NUM_KEY);
        let den = self.profile_u32(FPS_DEN_KEY);

        match num {
            Some(num) => FrameRate::new(num, den.unwrap_or(1)),
            None => FrameRate::DEFAULT,
        }
    }

    fn profile_u32(&self, key: &str) -> Option<u32> {
        self.config
            .profile_uint(VIDEO_SECTION, key)
            .and_then(|value| u32::try_from(value).ok())
    }
}

#[track_caller]
fn ensure_dir(dir: &Path) -> CoreResult<()> {
    if dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| MarkerError::ConfigDirectory {
        path: dir.to_path_buf(),
        source,
        location: ErrorLocation::from(Location::caller()),
    })
}
