//! Dual-stream writer run on the flush thread
//!
//! Debug, info and notice records go to `<prefix>.log`; warning and above go
//! to `<prefix>.log.wf`. Each stream rotates independently: a new date bucket
//! only rotates the stream being written, the other catches up on its own
//! next record.

mod stream;

pub use stream::StreamState;

use std::fs;

use crate::config::LoggerConfig;
use crate::diagnostics::{FlushFailure, SharedSink};
use crate::error::{LogError, LogResult};
use crate::rotation::{RotationPolicy, RotationReason};
use crate::types::{LogRecord, StreamKind};

/// Both streams of one logger
pub struct DualStreamWriter {
    normal: StreamState,
    warning: StreamState,
    sync_to_disk: bool,
    sink: SharedSink,
}

impl DualStreamWriter {
    /// Create the prefix directory if needed and open both streams
    pub fn open(config: &LoggerConfig, date_bucket: &str, sink: SharedSink) -> LogResult<Self> {
        config.validate()?;

        if let Some(dir) = config.directory() {
            fs::create_dir_all(dir).map_err(|source| LogError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let policy = RotationPolicy::new(config.rotation_size_bytes());
        let normal = StreamState::open(config.stream_path(StreamKind::Normal), date_bucket, policy)?;
        let warning = StreamState::open(config.stream_path(StreamKind::Warning), date_bucket, policy)?;

        Ok(Self {
            normal,
            warning,
            sync_to_disk: config.sync_to_disk(),
            sink,
        })
    }

    pub fn stream(&self, kind: StreamKind) -> &StreamState {
        match kind {
            StreamKind::Normal => &self.normal,
            StreamKind::Warning => &self.warning,
        }
    }

    fn stream_mut(&mut self, kind: StreamKind) -> &mut StreamState {
        match kind {
            StreamKind::Normal => &mut self.normal,
            StreamKind::Warning => &mut self.warning,
        }
    }

    /// Rotate the record's stream if needed, then append the line
    ///
    /// Write failures are reported to the diagnostics sink and dropped.
    pub fn write(&mut self, record: &LogRecord) -> Vec<RotationReason> {
        let sink = self.sink.clone();
        let sync = self.sync_to_disk;
        let stream = self.stream_mut(record.stream());

        let rotated = stream.prepare(&record.date_bucket, sink.as_ref());
        if let Err(e) = stream.append(record.formatted_line.as_bytes(), sync) {
            sink.io_failed(FlushFailure::Write, stream.path(), &e);
        }
        rotated
    }
}

impl std::fmt::Debug for DualStreamWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualStreamWriter")
            .field("normal", &self.normal.path())
            .field("warning", &self.warning.path())
            .field("sync_to_disk", &self.sync_to_disk)
            .finish()
    }
}
