//! One rotating output file

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::diagnostics::{DiagnosticSink, FlushFailure};
use crate::error::{LogError, LogResult};
use crate::rotation::{archive_path, RotationPolicy, RotationReason};
use crate::timestamp::epoch_seconds;

/// Open an existing or new file for append
pub(crate) fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// File handle and rotation state of one stream
///
/// Owned by the flush thread; never shared.
#[derive(Debug)]
pub struct StreamState {
    file: File,
    path: PathBuf,
    current_date_bucket: String,
    policy: RotationPolicy,
}

impl StreamState {
    /// Open `path` for append
    pub fn open(path: impl Into<PathBuf>, date_bucket: impl Into<String>, policy: RotationPolicy) -> LogResult<Self> {
        let path = path.into();
        let file = open_append(&path).map_err(|e| LogError::open(&path, e))?;

        Ok(Self {
            file,
            path,
            current_date_bucket: date_bucket.into(),
            policy,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_date_bucket(&self) -> &str {
        &self.current_date_bucket
    }

    /// Run the rotation checks for a record stamped `date_bucket`
    ///
    /// Returns the rotations performed, in order.
    pub fn prepare(&mut self, date_bucket: &str, sink: &dyn DiagnosticSink) -> Vec<RotationReason> {
        let mut rotated = Vec::new();

        if self.policy.date_rollover(&self.current_date_bucket, date_bucket) {
            let old_bucket = std::mem::replace(&mut self.current_date_bucket, date_bucket.to_string());
            if self.rotate(&old_bucket, RotationReason::DateRollover, sink) {
                rotated.push(RotationReason::DateRollover);
            }
        }

        // A missing file counts as empty.
        let on_disk = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if self.policy.size_exceeded(on_disk) {
            let bucket = self.current_date_bucket.clone();
            if self.rotate(&bucket, RotationReason::SizeExceeded, sink) {
                rotated.push(RotationReason::SizeExceeded);
            }
        }

        rotated
    }

    /// Append one complete line and flush it
    pub fn append(&mut self, line: &[u8], sync_to_disk: bool) -> io::Result<()> {
        self.file.write_all(line)?;
        self.file.flush()?;
        if sync_to_disk {
            self.file.sync_data()?;
        }
        Ok(())
    }

    /// Archive the current file under `bucket` and reopen the canonical path
    ///
    /// On failure the existing handle is kept.
    fn rotate(&mut self, bucket: &str, reason: RotationReason, sink: &dyn DiagnosticSink) -> bool {
        let _ = self.file.flush();
        let archive = archive_path(&self.path, bucket, epoch_seconds());

        if let Err(e) = fs::rename(&self.path, &archive) {
            sink.io_failed(FlushFailure::Rename, &self.path, &e);
            return false;
        }

        match open_append(&self.path) {
            Ok(file) => {
                self.file = file;
                sink.rotated(&self.path, &archive, reason);
                true
            }
            Err(e) => {
                // Still writing to the renamed handle, now at `archive`.
                sink.io_failed(FlushFailure::Reopen, &self.path, &e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEvent, MemorySink, NoOpSink};
    use tempfile::tempdir;

    fn archives(dir: &Path, stem: &str) -> Vec<PathBuf> {
        let mut found: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                let name = p.file_name().unwrap().to_string_lossy().to_string();
                name.starts_with(&format!("{}.", stem))
            })
            .collect();
        found.sort();
        found
    }

    #[test]
    fn test_append_writes_and_flushes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.log");
        let mut stream = StreamState::open(&path, "20240101", RotationPolicy::new(1024)).unwrap();

        stream.append(b"one\n", false).unwrap();
        stream.append(b"two\n", true).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_reopen_appends_to_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.log");
        fs::write(&path, "kept\n").unwrap();

        let mut stream = StreamState::open(&path, "20240101", RotationPolicy::new(1024)).unwrap();
        stream.append(b"added\n", false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\nadded\n");
    }

    #[test]
    fn test_date_rollover_archives_under_old_bucket() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.log");
        let sink = MemorySink::new();
        let mut stream = StreamState::open(&path, "20240101", RotationPolicy::new(1024)).unwrap();
        stream.append(b"yesterday\n", false).unwrap();

        let rotated = stream.prepare("20240102", &sink);
        assert_eq!(rotated, vec![RotationReason::DateRollover]);
        assert_eq!(stream.current_date_bucket(), "20240102");
        stream.append(b"today\n", false).unwrap();

        let archived = archives(dir.path(), "s.log");
        assert_eq!(archived.len(), 1);
        let name = archived[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("s.log.20240101"), "{}", name);
        assert_eq!(fs::read_to_string(&archived[0]).unwrap(), "yesterday\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "today\n");
        match sink.events().as_slice() {
            [DiagnosticEvent::Rotated { path: rotated_path, archive, reason }] => {
                assert_eq!(rotated_path, &path);
                assert_eq!(archive, &archived[0]);
                assert_eq!(*reason, RotationReason::DateRollover);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_size_rollover() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.log");
        let mut stream = StreamState::open(&path, "20240101", RotationPolicy::new(8)).unwrap();

        stream.append(b"0123456789\n", false).unwrap();
        let rotated = stream.prepare("20240101", &NoOpSink);
        assert_eq!(rotated, vec![RotationReason::SizeExceeded]);
        stream.append(b"fresh\n", false).unwrap();

        let archived = archives(dir.path(), "s.log");
        assert_eq!(archived.len(), 1);
        assert_eq!(fs::read_to_string(&archived[0]).unwrap(), "0123456789\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_size_at_limit_does_not_rotate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.log");
        let mut stream = StreamState::open(&path, "20240101", RotationPolicy::new(4)).unwrap();

        stream.append(b"abc\n", false).unwrap();
        assert!(stream.prepare("20240101", &NoOpSink).is_empty());
        assert!(archives(dir.path(), "s.log").is_empty());
    }

    #[test]
    fn test_date_rollover_leaves_fresh_file_under_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.log");
        let mut stream = StreamState::open(&path, "20240101", RotationPolicy::new(4)).unwrap();

        stream.append(b"way past the limit\n", false).unwrap();
        let rotated = stream.prepare("20240102", &NoOpSink);
        assert_eq!(rotated, vec![RotationReason::DateRollover]);
    }

    #[test]
    fn test_rename_failure_keeps_handle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.log");
        let sink = MemorySink::new();
        let mut stream = StreamState::open(&path, "20240101", RotationPolicy::new(1024)).unwrap();

        // Source path gone: rename fails, the bucket still advances.
        fs::remove_file(&path).unwrap();
        assert!(stream.prepare("20240102", &sink).is_empty());
        assert_eq!(stream.current_date_bucket(), "20240102");
        assert_eq!(sink.failures(), vec![FlushFailure::Rename]);
        assert!(sink.rotations().is_empty());
        assert!(stream.append(b"still writable\n", false).is_ok());
    }
}
