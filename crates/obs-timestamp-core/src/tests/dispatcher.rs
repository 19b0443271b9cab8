use crate::{
    EventDispatcher, FrontendEvent, MarkerCallbacks, SessionContext,
    tests::support::{FakeConfig, ManualClock, read_lines},
};

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

#[allow(clippy::unwrap_used)]
fn dispatcher(clock: &ManualClock) -> (TempDir, PathBuf, EventDispatcher) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timestamps.jsonl");
    let config = FakeConfig::with_dir(dir.path())
        .uint("Video", "FPSType", 2)
        .string("Video", "FPSCommon", "29.97")
        .string("SimpleOutput", "FilePath", "/recordings");
    let context = SessionContext::new(path.clone(), Box::new(clock.clone()));
    (dir, path, EventDispatcher::new(context, Box::new(config)))
}

fn comments(lines: &[Value]) -> Vec<String> {
    lines[1..]
        .iter()
        .map(|line| line["comment"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// WHAT: start, N presses, stop yields exactly N + 3 lines
/// WHY: Header, start marker, N markers in press order, end marker last
#[test]
fn given_session_with_presses_when_stopped_then_n_plus_three_lines() {
    // Given: A dispatcher and an active recording
    let clock = ManualClock::at(1_000);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);

    // When: Pressing the hotkey four times, then stopping
    for _ in 0..4 {
        clock.advance(750);
        dispatcher.on_hotkey_pressed(true);
    }
    clock.advance(250);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);

    // Then: 4 + 3 lines with numbered markers between start and end
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 7);
    assert!(lines[0].get("metadata").is_some());
    assert_eq!(
        comments(&lines),
        [
            "Recording Start",
            "Marker 1",
            "Marker 2",
            "Marker 3",
            "Marker 4",
            "Recording End"
        ]
    );
    assert_eq!(lines[6]["timestamp_ms"], 3_250);
    assert_eq!(lines[6]["color"], "green");
}

/// WHAT: Marker timestamps are non-decreasing and start at zero
/// WHY: Editors place markers by offset from the recording start
#[test]
fn given_presses_when_recording_then_timestamps_non_decreasing() {
    // Given: An active recording
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);

    // When: Pressing at irregular intervals, including twice at the same instant
    for step in [0, 10, 0, 5_000, 1] {
        clock.advance(step);
        dispatcher.on_hotkey_pressed(true);
    }
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);

    // Then: Timestamps never go backwards
    let stamps: Vec<u64> = read_lines(&path)[1..]
        .iter()
        .filter_map(|line| line["timestamp_ms"].as_u64())
        .collect();
    assert_eq!(stamps.first(), Some(&0));
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
}

/// WHAT: Hotkey presses while inactive write nothing and keep the counter
/// WHY: Markers outside a recording have no reference point
#[test]
fn given_inactive_when_hotkey_pressed_then_no_output_and_counter_unchanged() {
    // Given: A dispatcher that has not seen a recording start
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);

    // When: Pressing the hotkey
    dispatcher.on_hotkey_pressed(true);

    // Then: No file and no marker counted
    assert!(!path.exists());
    assert_eq!(dispatcher.context().session().marker_count(), 0);
}

/// WHAT: Hotkey presses after a recording stopped write nothing
/// WHY: The end marker must stay the last line of the session
#[test]
fn given_stopped_session_when_hotkey_pressed_then_file_and_counter_unchanged() {
    // Given: A session with one marker that has been stopped
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);
    clock.advance(1_000);
    dispatcher.on_hotkey_pressed(true);
    clock.advance(1_000);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);
    let lines_before = read_lines(&path);

    // When: Pressing the hotkey twice more
    clock.advance(500);
    dispatcher.on_hotkey_pressed(true);
    dispatcher.on_hotkey_pressed(true);

    // Then: The file and the counter are untouched
    let lines_after = read_lines(&path);
    assert_eq!(lines_after, lines_before);
    assert_eq!(lines_after.len(), 4);
    assert_eq!(lines_after[3]["comment"], "Recording End");
    assert_eq!(dispatcher.context().session().marker_count(), 1);
}

/// WHAT: Key-up events are ignored
/// WHY: One physical press must produce one marker
#[test]
fn given_active_when_key_released_then_no_marker() {
    // Given: An active recording
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);

    // When: A full press/release cycle
    dispatcher.on_hotkey_pressed(true);
    dispatcher.on_hotkey_pressed(false);

    // Then: Only one marker after the start marker
    assert_eq!(read_lines(&path).len(), 3);
    assert_eq!(dispatcher.context().session().marker_count(), 1);
}

/// WHAT: A new recording truncates the file and restarts numbering
/// WHY: Each recording has its own marker file and numbering
#[test]
fn given_finished_session_when_new_recording_starts_then_truncated_and_renumbered() {
    // Given: A completed session with two markers
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);
    dispatcher.on_hotkey_pressed(true);
    dispatcher.on_hotkey_pressed(true);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);

    // When: A second recording starts and gets one marker
    clock.advance(60_000);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);
    clock.advance(400);
    dispatcher.on_hotkey_pressed(true);

    // Then: Only the second session is on disk, numbered from 1
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert_eq!(comments(&lines), ["Recording Start", "Marker 1"]);
    assert_eq!(lines[2]["timestamp_ms"], 400);
}

/// WHAT: Stopping while inactive adds nothing
/// WHY: Hosts may repeat stop notifications
#[test]
fn given_stopped_session_when_stopped_again_then_no_extra_end_marker() {
    // Given: A session that has already stopped
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);

    // When: Stop arrives again
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);

    // Then: Still exactly one end marker
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert!(!dispatcher.context().session().is_active());
}

/// WHAT: Stop without any start creates no file
/// WHY: INACTIVE is re-entrant for stop
#[test]
fn given_never_started_when_stopped_then_no_file() {
    // Given: A fresh dispatcher
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);

    // When: Stop arrives
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);

    // Then: Nothing written
    assert!(!path.exists());
}

/// WHAT: Lifecycle events other than start/stop change nothing
/// WHY: Pauses, streaming and scene changes are not session boundaries
#[test]
fn given_active_when_unrelated_events_arrive_then_state_and_file_unchanged() {
    // Given: An active recording
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);

    // When: Every other event kind arrives
    for event in [
        FrontendEvent::RecordingStarting,
        FrontendEvent::RecordingStopping,
        FrontendEvent::RecordingPaused,
        FrontendEvent::RecordingUnpaused,
        FrontendEvent::StreamingStarted,
        FrontendEvent::StreamingStopped,
        FrontendEvent::SceneChanged,
        FrontendEvent::Exit,
    ] {
        dispatcher.on_recording_lifecycle_event(event);
    }

    // Then: Still recording with only the header on disk
    assert!(dispatcher.context().session().is_active());
    assert_eq!(read_lines(&path).len(), 2);
}

/// WHAT: Header carries the resolved recording path and frame rate
/// WHY: The converter needs fps to compute frame numbers
#[test]
fn given_profile_settings_when_recording_starts_then_header_has_metadata() {
    // Given: A profile recording to /recordings at 29.97
    let clock = ManualClock::at(0);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);

    // When: Recording starts
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);

    // Then: Header reflects the profile
    let header = &read_lines(&path)[0]["metadata"];
    assert_eq!(header["recording_path"], "/recordings");
    assert_eq!(header["fps_num"], 30000);
    assert_eq!(header["fps_den"], 1001);
    assert_eq!(header["timestamp"].as_str().map(str::len), Some(19));
}

/// WHAT: End-to-end start, press at 15 s, stop
/// WHY: Reference scenario for the converter contract
#[test]
fn given_press_at_fifteen_seconds_when_stopped_then_reference_markers() {
    // Given: Recording starts at clock 100_000
    let clock = ManualClock::at(100_000);
    let (_dir, path, mut dispatcher) = dispatcher(&clock);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);

    // When: Hotkey at +15 s, stop at +20 s
    clock.advance(15_000);
    dispatcher.on_hotkey_pressed(true);
    clock.advance(5_000);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);

    // Then: Start at 0, Marker 1 at 15000, End at 20000
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1]["timestamp_ms"], 0);
    assert_eq!(lines[1]["comment"], "Recording Start");
    assert_eq!(lines[2]["timestamp_ms"], 15_000);
    assert_eq!(lines[2]["comment"], "Marker 1");
    assert_eq!(lines[2]["color"], "blue");
    assert_eq!(lines[3]["timestamp_ms"], 20_000);
    assert_eq!(lines[3]["comment"], "Recording End");
    assert_eq!(lines[3]["color"], "green");
}

/// WHAT: An unwritable marker file does not stop the session
/// WHY: The host keeps recording; only the marker lines are lost
#[test]
fn given_unwritable_path_when_recording_then_session_still_tracked() {
    // Given: A dispatcher pointed at a path inside a missing directory
    let clock = ManualClock::at(0);
    let (_dir, _path, mut dispatcher) = dispatcher(&clock);
    let bad = Path::new("/nonexistent-dir-for-markers/timestamps.jsonl");
    dispatcher.context_mut().set_output_path(bad);

    // When: A full session runs
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStarted);
    dispatcher.on_hotkey_pressed(true);

    // Then: State advanced even though nothing could be written
    assert!(dispatcher.context().session().is_active());
    assert_eq!(dispatcher.context().session().marker_count(), 1);
    dispatcher.on_recording_lifecycle_event(FrontendEvent::RecordingStopped);
    assert!(!dispatcher.context().session().is_active());
    assert!(!bad.exists());
}
