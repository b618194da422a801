//! Atomic file replacement.
//!
//! 1. Write to `<name>.tmp` beside the target
//! 2. Rename over the target (atomic on Unix/macOS)
//!
//! The parent directory is created first, so a fresh data root works.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("store"), ToOwned::to_owned);
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Replace `path` with `contents`, blocking the current thread.
pub fn write_atomic_blocking(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error(path))?;
    }
    let temp = temp_path(path);
    fs::write(&temp, contents).map_err(write_error(path))?;
    fs::rename(&temp, path).map_err(write_error(path))
}

/// Replace `path` with `contents` on the tokio blocking-io pool.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(write_error(path))?;
    }
    let temp = temp_path(path);
    tokio::fs::write(&temp, contents)
        .await
        .map_err(write_error(path))?;
    tokio::fs::rename(&temp, path)
        .await
        .map_err(write_error(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_path_sits_beside_target() {
        let temp = temp_path(Path::new("/data/gulp/history.json"));
        assert_eq!(temp, PathBuf::from("/data/gulp/history.json.tmp"));
    }

    #[test]
    fn test_blocking_write_creates_parent_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("file.json");
        write_atomic_blocking(&path, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_async_write_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.json");
        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let result = write_atomic_blocking(&blocker.join("file.json"), b"{}");
        assert!(matches!(result, Err(StoreError::Write { .. })));
    }
}
