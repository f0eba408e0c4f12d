//! Logger configuration
//!
//! A `LoggerConfig` can be built in code, loaded from a YAML or JSON file,
//! and adjusted through `SPLITLOG_*` environment variables.

mod settings;
mod file;

pub use settings::{LoggerConfig, DEFAULT_PREFIX, DEFAULT_ROTATION_MIB};
pub use file::{ENV_DIAGNOSTICS, ENV_LEVEL, ENV_PREFIX, ENV_ROTATE_MIB};
