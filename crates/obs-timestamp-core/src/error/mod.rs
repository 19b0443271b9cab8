use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Marker plugin errors with source location tracking.
///
/// None of these are fatal to the host. The dispatcher and plugin log them
/// and carry on with reduced functionality.
#[derive(Error, Debug)]
pub enum MarkerError {
    /// No output path has been configured.
    #[error("Output path not set {location}")]
    OutputPathUnset {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The output file could not be opened or written.
    #[error("Failed to write output file {path:?}: {source} {location}")]
    OutputFile {
        /// Path of the marker file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A record could not be encoded as a JSON line.
    #[error("Failed to encode record: {source} {location}")]
    Serialization {
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The per-plugin configuration directory could not be created.
    #[error("Failed to create config directory {path:?}: {source} {location}")]
    ConfigDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The host refused to register the marker hotkey.
    #[error("Hotkey registration failed: {reason} {location}")]
    HotkeyRegistrationFailed {
        /// Human-readable reason for failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Loading or saving hotkey bindings through the host failed.
    #[error("Hotkey binding error: {reason} {location}")]
    HotkeyBinding {
        /// Human-readable reason for failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`MarkerError`].
pub type Result<T> = std::result::Result<T, MarkerError>;
