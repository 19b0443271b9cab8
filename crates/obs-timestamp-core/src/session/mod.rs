mod clock;
mod context;
mod recording_session;

pub use {
    clock::{Clock, MonotonicClock},
    context::SessionContext,
    recording_session::{RecordingSession, RecordingState},
};
