//! The logger front end
//!
//! Producers pass the level gate, format their line on their own thread, and
//! hand it to the flush thread. All file I/O happens on that one thread.
//!
//! ```no_run
//! use splitlog_core::{log_info, log_warning, Logger, LoggerConfig, Severity};
//!
//! let logger = Logger::new(LoggerConfig::new("./logs/app", Severity::Info, 10))?;
//! log_info!(logger, "listening on {}", 8080);
//! log_warning!(logger, "slow request: {}ms", 950);
//! logger.shutdown();
//! # Ok::<(), splitlog_core::LogError>(())
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::LoggerConfig;
use crate::diagnostics::{NoOpSink, SharedSink};
use crate::error::LogResult;
use crate::timestamp::{today_bucket, Timestamp};
use crate::types::{current_thread_id, LogRecord, Severity, SourceLocation, StreamKind};
use crate::worker::Worker;
use crate::writer::DualStreamWriter;

/// Name of the background thread
pub const FLUSH_THREAD_NAME: &str = "splitlog-flush";

/// Work handed to the flush thread
enum Command {
    Write(LogRecord),
    /// Acknowledged once every earlier command has run
    Barrier(crossbeam_channel::Sender<()>),
}

/// A leveled logger writing to two rotating files
///
/// Construct one at startup and share it (e.g. in an `Arc`). Logging never
/// blocks on I/O and never reports failure to the caller.
pub struct Logger {
    config: LoggerConfig,
    worker: Worker<Command>,
}

impl Logger {
    /// Open both streams and start the flush thread
    pub fn new(config: LoggerConfig) -> LogResult<Self> {
        Self::with_diagnostics(config, Arc::new(NoOpSink))
    }

    /// Like [`Logger::new`], reporting rotations and I/O failures to `sink`
    pub fn with_diagnostics(config: LoggerConfig, sink: SharedSink) -> LogResult<Self> {
        let mut writer = DualStreamWriter::open(&config, &today_bucket(), sink)?;

        let worker = Worker::spawn(FLUSH_THREAD_NAME, move |command: Command| match command {
            Command::Write(record) => {
                writer.write(&record);
            }
            Command::Barrier(done) => {
                let _ = done.send(());
            }
        })?;

        Ok(Self { config, worker })
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Canonical path of a stream
    pub fn path(&self, kind: StreamKind) -> PathBuf {
        self.config.stream_path(kind)
    }

    /// Whether records of `severity` pass the level gate
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.config.minimum_level()
    }

    /// Log a message
    ///
    /// Below the minimum level this returns immediately without formatting
    /// or sampling the clock. Always returns `true`.
    pub fn log(&self, severity: Severity, location: SourceLocation, args: fmt::Arguments<'_>) -> bool {
        if !self.enabled(severity) {
            return true;
        }

        let timestamp = Timestamp::now();
        let record = LogRecord::format(severity, &timestamp, current_thread_id(), &location, args);
        self.worker.post(Command::Write(record));
        true
    }

    /// Hand an already formatted record to the flush thread
    ///
    /// The level gate still applies. Returns `false` if the record was not
    /// queued (filtered out or logger shut down).
    pub fn submit(&self, record: LogRecord) -> bool {
        if !self.enabled(record.severity) {
            return false;
        }
        self.worker.post(Command::Write(record))
    }

    pub fn debug(&self, location: SourceLocation, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Debug, location, args)
    }

    pub fn info(&self, location: SourceLocation, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Info, location, args)
    }

    pub fn notice(&self, location: SourceLocation, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Notice, location, args)
    }

    pub fn warning(&self, location: SourceLocation, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Warning, location, args)
    }

    pub fn error(&self, location: SourceLocation, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Error, location, args)
    }

    pub fn fatal(&self, location: SourceLocation, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Fatal, location, args)
    }

    /// Block until everything queued so far has been written
    ///
    /// Returns `false` if the flush thread is no longer running.
    pub fn flush(&self) -> bool {
        let (done, wait) = crossbeam_channel::bounded(1);
        if !self.worker.post(Command::Barrier(done)) {
            return false;
        }
        wait.recv().is_ok()
    }

    /// Records queued but not yet written
    pub fn pending(&self) -> usize {
        self.worker.pending()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_running()
    }

    /// Stop the flush thread after writing everything already queued
    ///
    /// Both files are closed once the thread exits. Later logging calls are
    /// dropped. Safe to call more than once.
    pub fn shutdown(&self) {
        self.worker.stop();
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("worker", &self.worker)
            .finish()
    }
}

/// Log at debug level through an explicit logger
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Debug, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Info, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_notice {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Notice, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Warning, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Error, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Fatal, $crate::location!(), format_args!($($arg)*))
    };
}
