//! Log records handed from producers to the flush thread

use std::cell::Cell;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use super::severity::{Severity, StreamKind};
use crate::timestamp::Timestamp;

/// Where a logging call was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Base name of the source file (directories stripped)
    pub fn file_name(&self) -> &str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }
}

/// Capture the current source location
#[macro_export]
macro_rules! location {
    () => {
        $crate::SourceLocation::new(file!(), line!())
    };
}

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: Cell<u64> = const { Cell::new(0) };
}

/// Small numeric id for the calling thread, assigned on first use
pub fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| {
        if id.get() == 0 {
            id.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        id.get()
    })
}

/// One formatted line on its way to a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    /// Complete line, terminated by exactly one `\n`
    pub formatted_line: String,
    /// `yyyymmdd` at formatting time
    pub date_bucket: String,
}

impl LogRecord {
    /// Format a record on the producer thread
    pub fn format(
        severity: Severity,
        timestamp: &Timestamp,
        thread_id: u64,
        location: &SourceLocation,
        message: fmt::Arguments<'_>,
    ) -> Self {
        let mut formatted_line = format!(
            "{} {} [{}][{}:{}] {}",
            timestamp.header(),
            severity.label(),
            thread_id,
            location.file_name(),
            location.line,
            message,
        );
        let trimmed = formatted_line.trim_end_matches(['\r', '\n']).len();
        formatted_line.truncate(trimmed);
        formatted_line.push('\n');

        Self {
            severity,
            formatted_line,
            date_bucket: timestamp.date_bucket().to_string(),
        }
    }

    pub fn stream(&self) -> StreamKind {
        self.severity.stream()
    }
}
