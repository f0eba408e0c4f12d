//! Process-wide logger
//!
//! For code that cannot have a [`Logger`] passed in. The first call to
//! [`configure`] or [`instance`] creates the logger; later `configure` calls
//! are ignored until [`shutdown`] tears it down. The flush thread reports to
//! the sink named by `SPLITLOG_DIAGNOSTICS` (see [`sink_from_env`]).
//!
//! ```no_run
//! use splitlog_core::{global, info_log, LoggerConfig, Severity};
//!
//! global::configure(LoggerConfig::new("./logs/svc", Severity::Info, 10))?;
//! info_log!("started with {} workers", 4);
//! global::shutdown();
//! # Ok::<(), splitlog_core::LogError>(())
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::config::LoggerConfig;
use crate::diagnostics::sink_from_env;
use crate::error::LogResult;
use crate::logger::Logger;

static GLOBAL: Lazy<RwLock<Option<Arc<Logger>>>> = Lazy::new(|| RwLock::new(None));

/// Create the process-wide logger from `config`
///
/// Returns `Ok(true)` if this call created it and `Ok(false)` if one already
/// existed, in which case `config` is ignored.
pub fn configure(config: LoggerConfig) -> LogResult<bool> {
    let mut slot = GLOBAL.write();
    if slot.is_some() {
        return Ok(false);
    }
    *slot = Some(Arc::new(Logger::with_diagnostics(config, sink_from_env())?));
    Ok(true)
}

/// The process-wide logger, created with default settings on first use
///
/// # Panics
///
/// Panics if the default logger cannot be created (for example the working
/// directory is not writable). A process that cannot log is treated as having
/// failed to start.
pub fn instance() -> Arc<Logger> {
    if let Some(logger) = GLOBAL.read().as_ref() {
        return logger.clone();
    }

    let mut slot = GLOBAL.write();
    if let Some(logger) = slot.as_ref() {
        return logger.clone();
    }
    let config = LoggerConfig::default().with_env_overrides();
    let logger = match Logger::with_diagnostics(config, sink_from_env()) {
        Ok(logger) => Arc::new(logger),
        Err(e) => panic!("splitlog: cannot create default logger: {}", e),
    };
    *slot = Some(logger.clone());
    logger
}

/// The process-wide logger if one exists, without creating it
pub fn try_instance() -> Option<Arc<Logger>> {
    GLOBAL.read().clone()
}

/// Whether a process-wide logger exists
pub fn is_configured() -> bool {
    GLOBAL.read().is_some()
}

/// Drain and close the process-wide logger
///
/// Handles still held elsewhere stop accepting records. A later
/// [`configure`] or [`instance`] creates a fresh logger.
pub fn shutdown() {
    let taken = GLOBAL.write().take();
    if let Some(logger) = taken {
        logger.shutdown();
    }
}

/// Log at debug level through the process-wide logger
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::global::instance().log($crate::Severity::Debug, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::global::instance().log($crate::Severity::Info, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! notice_log {
    ($($arg:tt)*) => {
        $crate::global::instance().log($crate::Severity::Notice, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warning_log {
    ($($arg:tt)*) => {
        $crate::global::instance().log($crate::Severity::Warning, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::global::instance().log($crate::Severity::Error, $crate::location!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! fatal_log {
    ($($arg:tt)*) => {
        $crate::global::instance().log($crate::Severity::Fatal, $crate::location!(), format_args!($($arg)*))
    };
}
