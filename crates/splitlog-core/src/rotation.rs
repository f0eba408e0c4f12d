//! When a stream must be archived before a write

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Why a stream was rotated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationReason {
    /// The incoming record belongs to a different date bucket
    DateRollover,
    /// The file on disk grew past the size limit
    SizeExceeded,
}

impl RotationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationReason::DateRollover => "date rollover",
            RotationReason::SizeExceeded => "size limit exceeded",
        }
    }
}

/// Rotation thresholds for one stream
///
/// Both checks run on the flush thread, date first, then size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    size_limit_bytes: u64,
}

impl RotationPolicy {
    pub fn new(size_limit_bytes: u64) -> Self {
        Self { size_limit_bytes }
    }

    /// True when the record's bucket differs from the stream's
    ///
    /// Any difference counts, including a record stamped before the current
    /// bucket under backlog.
    pub fn date_rollover(&self, current_bucket: &str, incoming_bucket: &str) -> bool {
        current_bucket != incoming_bucket
    }

    /// True when the on-disk size is strictly above the limit
    pub fn size_exceeded(&self, on_disk_bytes: u64) -> bool {
        on_disk_bytes > self.size_limit_bytes
    }
}

/// `<path>.<date_bucket><epoch_seconds>`
///
/// Two rotations of the same stream in the same second and bucket produce the
/// same name; the later rename replaces the earlier archive.
pub fn archive_path(path: &Path, date_bucket: &str, epoch_seconds: i64) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}{}", date_bucket, epoch_seconds));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_rollover() {
        let policy = RotationPolicy::new(100);
        assert!(!policy.date_rollover("20240101", "20240101"));
        assert!(policy.date_rollover("20240101", "20240102"));
        assert!(policy.date_rollover("20240102", "20240101"));
    }

    #[test]
    fn test_size_exceeded_is_strict() {
        let policy = RotationPolicy::new(100);
        assert!(!policy.size_exceeded(0));
        assert!(!policy.size_exceeded(100));
        assert!(policy.size_exceeded(101));
    }

    #[test]
    fn test_archive_path() {
        let path = Path::new("/var/log/app.log.wf");
        assert_eq!(
            archive_path(path, "20240131", 1706700000),
            PathBuf::from("/var/log/app.log.wf.202401311706700000")
        );
    }
}
