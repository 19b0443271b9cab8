use crate::config::FrameRate;

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Wall-clock format used in the session header.
pub const HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Comment on the marker written at the start of every session.
pub const RECORDING_START_COMMENT: &str = "Recording Start";

/// Comment on the marker written when a session stops.
pub const RECORDING_END_COMMENT: &str = "Recording End";

/// Marker colours understood by the editor-marker converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    /// Default for user markers and the start marker.
    #[default]
    Blue,
    /// Cyan.
    Cyan,
    /// Used for the end marker.
    Green,
    /// Yellow.
    Yellow,
    /// Red.
    Red,
    /// Magenta.
    Magenta,
    /// Purple.
    Purple,
    /// Orange.
    Orange,
}

impl MarkerColor {
    /// Lower-case name as written to the marker file.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Magenta => "magenta",
            Self::Purple => "purple",
            Self::Orange => "orange",
        }
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One point-in-time annotation, relative to the start of the recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRecord {
    /// Milliseconds since the recording started.
    pub timestamp_ms: u64,
    /// Free-text comment shown in the editor.
    pub comment: String,
    /// Marker name; empty for generated markers.
    pub name: String,
    /// Marker colour.
    pub color: MarkerColor,
}

impl MarkerRecord {
    /// Marker with an explicit comment, empty name and the given colour.
    pub fn new(timestamp_ms: u64, comment: impl Into<String>, color: MarkerColor) -> Self {
        Self {
            timestamp_ms,
            comment: comment.into(),
            name: String::new(),
            color,
        }
    }

    /// The fixed marker at `0` that opens every session.
    pub fn recording_start() -> Self {
        Self::new(0, RECORDING_START_COMMENT, MarkerColor::Blue)
    }

    /// The marker closing a session after `timestamp_ms`.
    pub fn recording_end(timestamp_ms: u64) -> Self {
        Self::new(timestamp_ms, RECORDING_END_COMMENT, MarkerColor::Green)
    }

    /// A hotkey marker numbered `index` within its session.
    pub fn numbered(timestamp_ms: u64, index: u64) -> Self {
        Self::new(timestamp_ms, format!("Marker {index}"), MarkerColor::Blue)
    }
}

/// Session-wide context written as the first line of the marker file.
///
/// The converter needs the frame rate to turn milliseconds into frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Directory the host records into.
    pub recording_path: String,
    /// Local wall-clock time the session started, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Frame rate numerator.
    pub fps_num: u32,
    /// Frame rate denominator.
    pub fps_den: u32,
}

impl SessionMetadata {
    /// Build the header for a session started at `started_at`.
    pub fn new(
        recording_path: impl Into<String>,
        frame_rate: FrameRate,
        started_at: DateTime<Local>,
    ) -> Self {
        Self {
            recording_path: recording_path.into(),
            timestamp: started_at.format(HEADER_TIMESTAMP_FORMAT).to_string(),
            fps_num: frame_rate.numerator(),
            fps_den: frame_rate.denominator(),
        }
    }
}

/// Wrapper giving the header line its `{"metadata": {...}}` shape.
#[derive(Debug, Serialize)]
pub(crate) struct MetadataLine<'a> {
    pub(crate) metadata: &'a SessionMetadata,
}
