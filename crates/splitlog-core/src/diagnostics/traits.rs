//! Diagnostic sink trait and the events it receives

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::rotation::RotationReason;

/// File operation on the flush thread that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushFailure {
    /// Appending a line
    Write,
    /// Renaming the active file to its archive name
    Rename,
    /// Reopening the canonical path after a rename
    Reopen,
}

impl FlushFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlushFailure::Write => "write",
            FlushFailure::Rename => "rename",
            FlushFailure::Reopen => "reopen",
        }
    }
}

/// Something the flush thread reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    Rotated {
        path: PathBuf,
        archive: PathBuf,
        reason: RotationReason,
    },
    IoFailed {
        failure: FlushFailure,
        path: PathBuf,
        error: String,
    },
}

impl DiagnosticEvent {
    pub fn rotated(path: &Path, archive: &Path, reason: RotationReason) -> Self {
        Self::Rotated {
            path: path.to_path_buf(),
            archive: archive.to_path_buf(),
            reason,
        }
    }

    pub fn io_failed(failure: FlushFailure, path: &Path, error: &io::Error) -> Self {
        Self::IoFailed {
            failure,
            path: path.to_path_buf(),
            error: error.to_string(),
        }
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEvent::Rotated { path, archive, reason } => write!(
                f,
                "rotated {} -> {} ({})",
                path.display(),
                archive.display(),
                reason.as_str()
            ),
            DiagnosticEvent::IoFailed { failure, path, error } => {
                write!(f, "{} failed for {}: {}", failure.as_str(), path.display(), error)
            }
        }
    }
}

/// Where the flush thread reports what happens to it
///
/// The worker cannot log through the logger it serves, so rotations and
/// I/O failures go here instead. Both methods run on the flush thread.
///
/// Implementations:
/// - `NoOpSink`: Discards everything (default)
/// - `ConsoleSink`: Writes one line per event to stderr
/// - `MemorySink`: Keeps events for inspection
pub trait DiagnosticSink: Send + Sync {
    /// A stream was archived to `archive` and reopened at `path`
    fn rotated(&self, path: &Path, archive: &Path, reason: RotationReason);

    /// A write, rename or reopen failed; the record or rotation is dropped
    fn io_failed(&self, failure: FlushFailure, path: &Path, error: &io::Error);
}

/// Type alias for an Arc-wrapped sink
pub type SharedSink = Arc<dyn DiagnosticSink>;
