pub(crate) mod record;
mod writer;

pub use {
    record::{
        HEADER_TIMESTAMP_FORMAT, MarkerColor, MarkerRecord, RECORDING_END_COMMENT,
        RECORDING_START_COMMENT, SessionMetadata,
    },
    writer::MarkerWriter,
};

#[cfg(test)]
pub(crate) use writer::encode_line;
