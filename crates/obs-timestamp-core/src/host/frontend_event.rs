/// Lifecycle notifications delivered by the host frontend.
///
/// Only the recording start and stop notifications change plugin state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontendEvent {
    /// Recording has been requested but output has not begun.
    RecordingStarting,
    /// Recording output has begun.
    RecordingStarted,
    /// Recording stop has been requested.
    RecordingStopping,
    /// Recording output has ended.
    RecordingStopped,
    /// Recording paused.
    RecordingPaused,
    /// Recording resumed after a pause.
    RecordingUnpaused,
    /// Streaming output has begun.
    StreamingStarted,
    /// Streaming output has ended.
    StreamingStopped,
    /// The active scene changed.
    SceneChanged,
    /// The host is shutting down.
    Exit,
}
