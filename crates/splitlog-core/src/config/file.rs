//! Loading configuration from YAML/JSON files and the environment

use std::fs;
use std::path::Path;

use super::settings::LoggerConfig;
use crate::error::LogResult;

/// Environment variable overriding the file prefix
pub const ENV_PREFIX: &str = "SPLITLOG_PREFIX";
/// Environment variable overriding the minimum level
pub const ENV_LEVEL: &str = "SPLITLOG_LEVEL";
/// Environment variable overriding the rotation size in MiB
pub const ENV_ROTATE_MIB: &str = "SPLITLOG_ROTATE_MIB";
/// Environment variable selecting the flush thread's diagnostics sink
pub const ENV_DIAGNOSTICS: &str = "SPLITLOG_DIAGNOSTICS";

impl LoggerConfig {
    /// Load a config file
    ///
    /// `.json` files are parsed as JSON, everything else as YAML. Missing
    /// fields fall back to the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: LoggerConfig = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Write the config to a file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> LogResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `SPLITLOG_*` environment overrides
    ///
    /// Unset or unparseable variables leave the field unchanged.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(prefix) = lookup(ENV_PREFIX).filter(|p| !p.trim().is_empty()) {
            self = self.with_file_prefix(prefix);
        }
        if let Some(level) = lookup(ENV_LEVEL).and_then(|v| v.parse().ok()) {
            self = self.with_minimum_level(level);
        }
        if let Some(mib) = lookup(ENV_ROTATE_MIB).and_then(|v| v.trim().parse::<u64>().ok()) {
            self = self.with_rotation_size_bytes(mib.saturating_mul(1024 * 1024));
        }
        self
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
