//! Directory creation utilities.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::error::PathError;

/// Ensure the provided directory exists, creating it and its parents if missing.
///
/// Fails if the path exists but is not a directory.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }

    debug!(path = %path.display(), "Creating directory");
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_nested_directories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a").join("b").join("c");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_existing_directory_is_ok() {
        let temp = tempdir().unwrap();
        assert!(ensure_directory(temp.path()).is_ok());
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            ensure_directory(&file),
            Err(PathError::NotADirectory(_))
        ));
    }
}
