//! Stderr diagnostic sink

use std::io::{self, Write};
use std::path::Path;

use super::traits::{DiagnosticEvent, DiagnosticSink, FlushFailure};
use crate::rotation::RotationReason;

/// Writes one line per event to stderr, e.g.
/// `[splitlog] rotated logs/app.log -> logs/app.log.202401011704067200 (date rollover)`
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    prefix: String,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::with_prefix("[splitlog]")
    }
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The line written for `event`, without the trailing newline
    pub fn render(&self, event: &DiagnosticEvent) -> String {
        let level = match event {
            DiagnosticEvent::Rotated { .. } => "INFO",
            DiagnosticEvent::IoFailed { .. } => "ERROR",
        };
        format!("{} {}: {}", self.prefix, level, event)
    }

    fn emit(&self, event: DiagnosticEvent) {
        // stderr failures have nowhere left to go
        let _ = writeln!(io::stderr().lock(), "{}", self.render(&event));
    }
}

impl DiagnosticSink for ConsoleSink {
    fn rotated(&self, path: &Path, archive: &Path, reason: RotationReason) {
        self.emit(DiagnosticEvent::rotated(path, archive, reason));
    }

    fn io_failed(&self, failure: FlushFailure, path: &Path, error: &io::Error) {
        self.emit(DiagnosticEvent::io_failed(failure, path, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rotation() {
        let sink = ConsoleSink::new();
        let event = DiagnosticEvent::rotated(
            Path::new("logs/app.log"),
            Path::new("logs/app.log.202401011704067200"),
            RotationReason::DateRollover,
        );
        assert_eq!(
            sink.render(&event),
            "[splitlog] INFO: rotated logs/app.log -> logs/app.log.202401011704067200 (date rollover)"
        );
    }

    #[test]
    fn test_render_failure_with_custom_prefix() {
        let sink = ConsoleSink::with_prefix("[svc-log]");
        let error = io::Error::new(io::ErrorKind::Other, "disk full");
        let event = DiagnosticEvent::io_failed(FlushFailure::Write, Path::new("app.log.wf"), &error);
        assert_eq!(sink.render(&event), "[svc-log] ERROR: write failed for app.log.wf: disk full");
    }
}
