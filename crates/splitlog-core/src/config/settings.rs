//! Logger configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::types::{Severity, StreamKind};

/// Prefix used when nothing else is configured
pub const DEFAULT_PREFIX: &str = "./log";

/// Rotation threshold used when nothing else is configured
pub const DEFAULT_ROTATION_MIB: u64 = 10;

const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Configuration for one logger
///
/// Fixed once the logger is built.
///
/// # Example
///
/// ```
/// use splitlog_core::{LoggerConfig, Severity};
///
/// let config = LoggerConfig::new("./logs/app", Severity::Info, 10);
/// assert_eq!(config.rotation_size_bytes(), 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile", into = "ConfigFile")]
pub struct LoggerConfig {
    /// Path prefix; streams are `<prefix>.log` and `<prefix>.log.wf`
    file_prefix: String,

    /// Records strictly below this are discarded before formatting
    minimum_level: Severity,

    /// Size in bytes above which a stream is rotated
    rotation_size_bytes: u64,

    /// Call `sync_data` after every append
    sync_to_disk: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, Severity::Debug, DEFAULT_ROTATION_MIB)
    }
}

impl LoggerConfig {
    /// Create a config with the rotation threshold given in MiB
    pub fn new(file_prefix: impl Into<String>, minimum_level: Severity, rotation_size_mib: u64) -> Self {
        Self {
            file_prefix: file_prefix.into(),
            minimum_level,
            rotation_size_bytes: rotation_size_mib.saturating_mul(BYTES_PER_MIB),
            sync_to_disk: false,
        }
    }

    /// Set an exact rotation threshold in bytes
    pub fn with_rotation_size_bytes(mut self, bytes: u64) -> Self {
        self.rotation_size_bytes = bytes;
        self
    }

    pub fn with_minimum_level(mut self, level: Severity) -> Self {
        self.minimum_level = level;
        self
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_sync_to_disk(mut self, sync: bool) -> Self {
        self.sync_to_disk = sync;
        self
    }

    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    pub fn minimum_level(&self) -> Severity {
        self.minimum_level
    }

    pub fn rotation_size_bytes(&self) -> u64 {
        self.rotation_size_bytes
    }

    pub fn sync_to_disk(&self) -> bool {
        self.sync_to_disk
    }

    /// Canonical path of a stream
    pub fn stream_path(&self, kind: StreamKind) -> PathBuf {
        PathBuf::from(format!("{}{}", self.file_prefix, kind.suffix()))
    }

    /// Directory that holds both streams, if the prefix names one
    pub fn directory(&self) -> Option<&Path> {
        Path::new(&self.file_prefix)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// Check the config can produce a working logger
    pub fn validate(&self) -> LogResult<()> {
        if self.file_prefix.trim().is_empty() {
            return Err(LogError::invalid_config("file prefix is empty"));
        }
        if self.file_prefix.ends_with('/') || self.file_prefix.ends_with(std::path::MAIN_SEPARATOR) {
            return Err(LogError::invalid_config(format!(
                "file prefix names a directory: {}",
                self.file_prefix
            )));
        }
        if self.rotation_size_bytes == 0 {
            return Err(LogError::invalid_config("rotation size must be non-zero"));
        }
        Ok(())
    }
}

/// On-disk form of [`LoggerConfig`]
///
/// Whole-MiB thresholds are written as `rotation_size_mib`, anything else as
/// `rotation_size_bytes`. When both are present the byte count wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    file_prefix: String,
    minimum_level: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation_size_mib: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation_size_bytes: Option<u64>,
    sync_to_disk: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        LoggerConfig::default().into()
    }
}

impl From<LoggerConfig> for ConfigFile {
    fn from(config: LoggerConfig) -> Self {
        let bytes = config.rotation_size_bytes;
        let (mib, exact) = if bytes % BYTES_PER_MIB == 0 {
            (Some(bytes / BYTES_PER_MIB), None)
        } else {
            (None, Some(bytes))
        };

        Self {
            file_prefix: config.file_prefix,
            minimum_level: config.minimum_level,
            rotation_size_mib: mib,
            rotation_size_bytes: exact,
            sync_to_disk: config.sync_to_disk,
        }
    }
}

impl From<ConfigFile> for LoggerConfig {
    fn from(file: ConfigFile) -> Self {
        let rotation_size_bytes = match (file.rotation_size_bytes, file.rotation_size_mib) {
            (Some(bytes), _) => bytes,
            (None, Some(mib)) => mib.saturating_mul(BYTES_PER_MIB),
            (None, None) => DEFAULT_ROTATION_MIB * BYTES_PER_MIB,
        };

        Self {
            file_prefix: file.file_prefix,
            minimum_level: file.minimum_level,
            rotation_size_bytes,
            sync_to_disk: file.sync_to_disk,
        }
    }
}
