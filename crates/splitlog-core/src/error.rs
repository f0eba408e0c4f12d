//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a logger or loading its configuration
///
/// Nothing on the logging path returns these; failures on the flush thread
/// are reported through [`crate::DiagnosticSink`] instead.
#[derive(Error, Debug)]
pub enum LogError {
    /// Configuration rejected by validation
    #[error("Invalid logger configuration: {0}")]
    InvalidConfig(String),

    /// Parent directory of the prefix could not be created
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stream file could not be opened for append
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The flush thread could not be started
    #[error("Failed to spawn flush thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LogError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;
