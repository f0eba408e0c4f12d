//! In-memory diagnostic sink

use std::io;
use std::path::Path;

use parking_lot::Mutex;

use super::traits::{DiagnosticEvent, DiagnosticSink, FlushFailure};
use crate::rotation::RotationReason;

/// A sink that keeps every event, useful in tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events so far, oldest first
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().clone()
    }

    /// Reasons of every rotation reported so far
    pub fn rotations(&self) -> Vec<RotationReason> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                DiagnosticEvent::Rotated { reason, .. } => Some(*reason),
                _ => None,
            })
            .collect()
    }

    /// Kinds of every failure reported so far
    pub fn failures(&self) -> Vec<FlushFailure> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                DiagnosticEvent::IoFailed { failure, .. } => Some(*failure),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn rotated(&self, path: &Path, archive: &Path, reason: RotationReason) {
        self.events.lock().push(DiagnosticEvent::rotated(path, archive, reason));
    }

    fn io_failed(&self, failure: FlushFailure, path: &Path, error: &io::Error) {
        self.events.lock().push(DiagnosticEvent::io_failed(failure, path, error));
    }
}
