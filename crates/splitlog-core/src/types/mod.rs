//! Core types for splitlog

mod record;
mod severity;

pub use record::{current_thread_id, LogRecord, SourceLocation};
pub use severity::{ParseSeverityError, Severity, StreamKind};
