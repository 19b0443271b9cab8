/// Tray icon states corresponding to the recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// No recording in progress.
    Idle,
    /// Recording; the marker hotkey is live.
    Recording,
}
