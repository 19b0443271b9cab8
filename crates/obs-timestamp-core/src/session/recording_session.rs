use crate::session::Clock;

use tracing::debug;
use uuid::Uuid;

/// Recording state for the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// No recording in progress.
    Inactive,
    /// A recording is in progress.
    Active {
        /// Clock reading when the recording started.
        started_at_ms: u64,
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
}

/// Tracks whether a recording is running, when it started and how many
/// markers have been placed in it.
///
/// A new `begin_session` simply restarts the session: the host only ever
/// runs one recording at a time, so there is no nesting to guard against.
pub struct RecordingSession {
    clock: Box<dyn Clock>,
    state: RecordingState,
    marker_counter: u64,
}

impl RecordingSession {
    /// Create an inactive tracker reading time from `clock`.
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            state: RecordingState::Inactive,
            marker_counter: 0,
        }
    }

    /// Start (or restart) a session at the current clock reading.
    ///
    /// Resets the marker counter and returns the new session ID.
    pub fn begin_session(&mut self) -> Uuid {
        let session_id = Uuid::new_v4();
        let started_at_ms = self.clock.now_ms();

        self.state = RecordingState::Active {
            started_at_ms,
            session_id,
        };
        self.marker_counter = 0;

        debug!(session_id = %session_id, started_at_ms, "Session started");

        session_id
    }

    /// End the session.
    ///
    /// Returns the elapsed milliseconds if a session was active. The
    /// tracker is inactive afterwards either way.
    pub fn end_session(&mut self) -> Option<u64> {
        let elapsed = self.elapsed_ms();
        self.state = RecordingState::Inactive;
        elapsed
    }

    /// Whether a session is running.
    pub fn is_active(&self) -> bool {
        matches!(self.state, RecordingState::Active { .. })
    }

    /// Current state.
    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// ID of the running session, if any.
    pub fn session_id(&self) -> Option<Uuid> {
        match self.state {
            RecordingState::Active { session_id, .. } => Some(session_id),
            RecordingState::Inactive => None,
        }
    }

    /// Milliseconds since the session started, or `None` when inactive.
    pub fn elapsed_ms(&self) -> Option<u64> {
        match self.state {
            RecordingState::Active { started_at_ms, .. } => {
                Some(self.clock.now_ms().saturating_sub(started_at_ms))
            }
            RecordingState::Inactive => None,
        }
    }

    /// Increment the marker counter and return the new value.
    pub fn next_marker_index(&mut self) -> u64 {
        self.marker_counter += 1;
        self.marker_counter
    }

    /// Number of markers placed in the current session.
    pub fn marker_count(&self) -> u64 {
        self.marker_counter
    }
}
