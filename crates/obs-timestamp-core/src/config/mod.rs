mod frame_rate;
mod resolver;

pub use {
    frame_rate::FrameRate,
    resolver::{ConfigResolver, RecordingSettings},
};

/// File name of the marker file inside the plugin config directory.
pub const OUTPUT_FILE_NAME: &str = "timestamps.jsonl";
