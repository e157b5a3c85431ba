//! Ownership of exported files.
//!
//! Every file produced by an export is wrapped in [`ExportedFile`] the moment
//! it exists, so whichever stage holds it last decides its fate: transfer the
//! guard onward, take the path out for the byte transfer, or drop it and the
//! file is reclaimed. There is no exit path on which the file leaks.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::ticket::UploadTicket;

/// Delete-on-drop guard for a file produced by an export.
#[derive(Debug)]
pub struct ExportedFile {
    path: PathBuf,
    armed: bool,
}

impl ExportedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take over the file. The guard is disarmed and the caller becomes
    /// responsible for the path.
    pub fn into_path(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for ExportedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "released exported file"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), "failed to release exported file: {err}")
            }
        }
    }
}

/// Output of a successful export: the guarded file and its final size.
#[derive(Debug)]
pub struct ExportResult {
    file: ExportedFile,
    size_bytes: u64,
}

impl ExportResult {
    pub fn new(file: ExportedFile, size_bytes: u64) -> Self {
        Self { file, size_bytes }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn into_file(self) -> ExportedFile {
        self.file
    }
}

/// Terminal artifact of a successful pipeline: the upload ticket plus the
/// exported file the subsequent byte transfer should send. The file stays
/// guarded; dropping a `PreparedUpload` reclaims it.
#[derive(Debug)]
pub struct PreparedUpload {
    pub ticket: UploadTicket,
    pub file: ExportedFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"media").expect("write test file");
        path
    }

    #[test]
    fn test_drop_removes_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = touch(&dir, "export.mp4");

        let guard = ExportedFile::new(&path);
        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn test_into_path_disarms_the_guard() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = touch(&dir, "export.mp4");

        let guard = ExportedFile::new(&path);
        let taken = guard.into_path();
        assert_eq!(taken, path);
        assert!(path.exists());
    }

    #[test]
    fn test_dropping_export_result_releases_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = touch(&dir, "export.mp4");

        let result = ExportResult::new(ExportedFile::new(&path), 5);
        assert_eq!(result.size_bytes(), 5);
        drop(result);
        assert!(!path.exists());
    }

    #[test]
    fn test_dropping_a_missing_file_is_quiet() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("never-written.mp4");

        let guard = ExportedFile::new(&path);
        drop(guard);
    }
}
