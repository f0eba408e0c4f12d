//! Diagnostics for the flush thread itself
//!
//! - `NoOpSink`: Discards events (default)
//! - `ConsoleSink`: Writes events to stderr
//! - `MemorySink`: Keeps events in memory for inspection

mod traits;
mod noop;
mod console;
mod memory;

pub use traits::{DiagnosticEvent, DiagnosticSink, FlushFailure, SharedSink};
pub use noop::NoOpSink;
pub use console::ConsoleSink;
pub use memory::MemorySink;

use std::sync::Arc;

use crate::config::ENV_DIAGNOSTICS;

/// Sink selected by `SPLITLOG_DIAGNOSTICS`: `stderr` or `console` gives a
/// [`ConsoleSink`], anything else a [`NoOpSink`]
pub fn sink_from_env() -> SharedSink {
    sink_named(std::env::var(ENV_DIAGNOSTICS).ok().as_deref())
}

fn sink_named(name: Option<&str>) -> SharedSink {
    match name.map(|n| n.trim().to_lowercase()).as_deref() {
        Some("stderr") | Some("console") => Arc::new(ConsoleSink::new()),
        _ => Arc::new(NoOpSink),
    }
}
