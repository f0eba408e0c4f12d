//! Sink that drops every event

use std::io;
use std::path::Path;

use super::traits::{DiagnosticSink, FlushFailure};
use crate::rotation::RotationReason;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl DiagnosticSink for NoOpSink {
    fn rotated(&self, _path: &Path, _archive: &Path, _reason: RotationReason) {}
    fn io_failed(&self, _failure: FlushFailure, _path: &Path, _error: &io::Error) {}
}
