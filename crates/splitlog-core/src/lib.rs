//! Splitlog Core
//!
//! Leveled file logging with a background flush thread.
//! Every record is formatted on the calling thread, then queued to a single
//! worker that owns two files:
//!
//! - `<prefix>.log`: debug, info and notice
//! - `<prefix>.log.wf`: warning, error and fatal
//!
//! Each file is archived as `<file>.<yyyymmdd><epoch_seconds>` when the date
//! of an incoming record changes or when it grows past the rotation size.
//!
//! ```rust,no_run
//! use splitlog_core::{log_error, log_info, Logger, LoggerConfig, Severity};
//!
//! let logger = Logger::new(LoggerConfig::new("./logs/app", Severity::Info, 10))?;
//! log_info!(logger, "ready");
//! log_error!(logger, "lost connection to {}", "db-1");
//! logger.shutdown();
//! # Ok::<(), splitlog_core::LogError>(())
//! ```

pub mod types;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod timestamp;
pub mod rotation;
pub mod worker;
pub mod writer;
pub mod logger;
pub mod global;

// Re-export commonly used types
pub use types::{LogRecord, Severity, SourceLocation, StreamKind};

pub use config::LoggerConfig;

pub use diagnostics::{ConsoleSink, DiagnosticEvent, DiagnosticSink, FlushFailure, MemorySink, NoOpSink, SharedSink};

pub use error::{LogError, LogResult};

pub use logger::Logger;
