//! Routes hotkey presses and recording lifecycle notifications to the
//! session tracker and the marker file.
//!
//! State machine:
//!   INACTIVE -> ACTIVE   (recording started)
//!   ACTIVE   -> INACTIVE (recording stopped)
//!
//! Hotkey presses only produce markers while ACTIVE. Presses while
//! INACTIVE are dropped, not queued.

use crate::{
    ConfigResolver, FrontendEvent, HostConfig, MarkerRecord, MarkerWriter, SessionContext,
    SessionMetadata,
};

use std::path::Path;

use chrono::Local;
use tracing::{debug, error, info, instrument};

/// Callbacks the host drives once the plugin is registered.
pub trait MarkerCallbacks {
    /// The marker hotkey changed state; `pressed` is false on key-up.
    fn on_hotkey_pressed(&mut self, pressed: bool);

    /// A frontend lifecycle notification arrived.
    fn on_recording_lifecycle_event(&mut self, event: FrontendEvent);
}

/// Owns the session context and turns host callbacks into marker lines.
pub struct EventDispatcher {
    context: SessionContext,
    writer: MarkerWriter,
    config: Box<dyn HostConfig>,
}

impl EventDispatcher {
    /// Create a dispatcher over `context`, reading session metadata from
    /// `config` at each recording start.
    pub fn new(context: SessionContext, config: Box<dyn HostConfig>) -> Self {
        Self {
            context,
            writer: MarkerWriter::new(),
            config,
        }
    }

    /// Session context.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Mutable session context.
    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    #[instrument(skip(self))]
    fn recording_started(&mut self) {
        let settings = ConfigResolver::new(self.config.as_ref()).resolve_recording_metadata();
        let metadata = SessionMetadata::new(settings.recording_path, settings.frame_rate, Local::now());

        let session_id = self.context.session_mut().begin_session();

        info!(
            session_id = %session_id,
            output_path = ?self.context.output_path(),
            "Recording started, clearing marker file"
        );

        if let Err(e) = self
            .writer
            .write_session_header(self.context.output_path(), &metadata)
        {
            error!(session_id = %session_id, error = ?e, "Failed to create marker file");
        }
    }

    #[instrument(skip(self))]
    fn recording_stopped(&mut self) {
        let session_id = self.context.session().session_id();

        let Some(elapsed_ms) = self.context.session_mut().end_session() else {
            debug!("Recording stopped while inactive, nothing to close");
            return;
        };

        self.save(&MarkerRecord::recording_end(elapsed_ms));

        info!(
            session_id = ?session_id,
            final_timestamp_ms = elapsed_ms,
            "Recording stopped"
        );
    }

    fn save(&self, record: &MarkerRecord) {
        let path: &Path = self.context.output_path();

        match self.writer.append_marker(path, record) {
            Ok(()) => info!(
                timestamp_ms = record.timestamp_ms,
                comment = %record.comment,
                "Saved marker"
            ),
            Err(e) => error!(path = ?path, error = ?e, "Failed to save marker"),
        }
    }
}

impl MarkerCallbacks for EventDispatcher {
    fn on_hotkey_pressed(&mut self, pressed: bool) {
        if !pressed {
            return;
        }

        let Some(elapsed_ms) = self.context.session().elapsed_ms() else {
            debug!("Marker hotkey pressed while not recording, ignoring");
            return;
        };

        let index = self.context.session_mut().next_marker_index();
        self.save(&MarkerRecord::numbered(elapsed_ms, index));
    }

    fn on_recording_lifecycle_event(&mut self, event: FrontendEvent) {
        match event {
            FrontendEvent::RecordingStarted => self.recording_started(),
            FrontendEvent::RecordingStopped => self.recording_stopped(),
            _ => {}
        }
    }
}
