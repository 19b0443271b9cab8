use crate::session::{Clock, RecordingSession};

use std::path::{Path, PathBuf};

use tracing::info;

/// Everything the plugin mutates over its lifetime: where markers go and
/// the state of the current recording.
///
/// Owned by the dispatcher; lives from plugin load to unload.
pub struct SessionContext {
    output_path: PathBuf,
    session: RecordingSession,
}

impl SessionContext {
    /// Create a context writing to `output_path`.
    pub fn new(output_path: PathBuf, clock: Box<dyn Clock>) -> Self {
        Self {
            output_path,
            session: RecordingSession::new(clock),
        }
    }

    /// Path of the marker file.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Replace the output path. Empty paths are ignored.
    pub fn set_output_path<P: Into<PathBuf>>(&mut self, path: P) {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return;
        }

        info!(output_path = ?path, "Output path set");
        self.output_path = path;
    }

    /// The recording tracker.
    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    /// Mutable access to the recording tracker.
    pub fn session_mut(&mut self) -> &mut RecordingSession {
        &mut self.session
    }
}
