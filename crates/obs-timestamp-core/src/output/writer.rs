//! JSON Lines marker file.
//!
//! Every write opens the file, writes, and closes it again. No handle is
//! kept between calls, so an abnormal host exit can at worst lose the line
//! being written.

use crate::{
    CoreResult, MarkerError,
    output::{MarkerRecord, SessionMetadata, record::MetadataLine},
};

use std::{
    fs::{File, OpenOptions},
    io::Write,
    panic::Location,
    path::Path,
};

use error_location::ErrorLocation;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Writes session headers and markers to the marker file.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerWriter;

impl MarkerWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }

    /// Truncate `path` and write the session header followed by the
    /// `Recording Start` marker.
    ///
    /// # Errors
    ///
    /// Returns error if the path is empty or the file cannot be created.
    #[track_caller]
    #[instrument(skip(self, metadata))]
    pub fn write_session_header(&self, path: &Path, metadata: &SessionMetadata) -> CoreResult<()> {
        ensure_path_set(path)?;

        let mut contents = encode_line(&MetadataLine { metadata })?;
        contents.push_str(&encode_line(&MarkerRecord::recording_start())?);

        let mut file = File::create(path).map_err(|source| output_error(path, source))?;
        file.write_all(contents.as_bytes())
            .map_err(|source| output_error(path, source))?;

        info!(path = ?path, "Marker file cleared for new session");

        Ok(())
    }

    /// Append one marker line to `path`, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the path is empty or the file cannot be opened.
    #[track_caller]
    #[instrument(skip(self, record), fields(timestamp_ms = record.timestamp_ms))]
    pub fn append_marker(&self, path: &Path, record: &MarkerRecord) -> CoreResult<()> {
        ensure_path_set(path)?;

        let line = encode_line(record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| output_error(path, source))?;
        file.write_all(line.as_bytes())
            .map_err(|source| output_error(path, source))?;

        debug!(
            timestamp_ms = record.timestamp_ms,
            comment = %record.comment,
            "Marker appended"
        );

        Ok(())
    }
}

/// Encode `value` as a single JSON line, newline included.
///
/// serde_json escapes quotes, backslashes and control characters, so a
/// comment can never break the one-object-per-line framing.
#[track_caller]
pub(crate) fn encode_line<T: Serialize>(value: &T) -> CoreResult<String> {
    let mut line = serde_json::to_string(value).map_err(|source| MarkerError::Serialization {
        source,
        location: ErrorLocation::from(Location::caller()),
    })?;
    line.push('\n');
    Ok(line)
}

#[track_caller]
fn ensure_path_set(path: &Path) -> CoreResult<()> {
    if path.as_os_str().is_empty() {
        return Err(MarkerError::OutputPathUnset {
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

#[track_caller]
fn output_error(path: &Path, source: std::io::Error) -> MarkerError {
    MarkerError::OutputFile {
        path: path.to_path_buf(),
        source,
        location: ErrorLocation::from(Location::caller()),
    }
}
