//! Locating the gallery-dl executable.

use std::path::{Path, PathBuf};

use gulp_core::RunnerError;
use tracing::debug;

/// Environment variable naming a gallery-dl binary to use instead of the
/// built-in candidate list.
pub const GALLERY_DL_ENV: &str = "GULP_GALLERY_DL";

const SYSTEM_CANDIDATES: &[&str] = &[
    "/opt/homebrew/bin/gallery-dl",
    "/usr/local/bin/gallery-dl",
];

const FALLBACK_CANDIDATE: &str = "/usr/bin/gallery-dl";

/// Ordered locations probed for gallery-dl.
///
/// Homebrew, then `/usr/local`, then the pipx location `~/.local/bin`, then
/// `/usr/bin`. When [`GALLERY_DL_ENV`] is set and non-empty it is the only
/// candidate.
pub fn default_candidates() -> Vec<PathBuf> {
    if let Some(custom) = std::env::var_os(GALLERY_DL_ENV).filter(|v| !v.is_empty()) {
        return vec![PathBuf::from(custom)];
    }

    let mut candidates: Vec<PathBuf> = SYSTEM_CANDIDATES.iter().map(PathBuf::from).collect();
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("bin").join("gallery-dl"));
    }
    candidates.push(PathBuf::from(FALLBACK_CANDIDATE));
    candidates
}

/// Whether `path` is a regular file the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

/// First executable candidate, in order.
pub fn resolve_binary(candidates: &[PathBuf]) -> Result<PathBuf, RunnerError> {
    candidates
        .iter()
        .find(|candidate| is_executable(candidate))
        .inspect(|found| debug!(path = %found.display(), "Resolved gallery-dl binary"))
        .cloned()
        .ok_or_else(|| RunnerError::NotInstalled {
            searched: candidates.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn make_script(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_default_candidates_end_with_system_fallback() {
        let candidates = default_candidates();
        assert!(!candidates.is_empty());
        if std::env::var_os(GALLERY_DL_ENV).is_none() {
            assert_eq!(candidates[0], PathBuf::from("/opt/homebrew/bin/gallery-dl"));
            assert_eq!(candidates.last(), Some(&PathBuf::from(FALLBACK_CANDIDATE)));
        }
    }

    #[test]
    fn test_missing_candidates_are_not_installed() {
        let dir = tempdir().unwrap();
        let candidates = vec![dir.path().join("a"), dir.path().join("b")];
        match resolve_binary(&candidates) {
            Err(RunnerError::NotInstalled { searched }) => assert_eq!(searched, candidates),
            other => panic!("expected NotInstalled, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_is_not_executable() {
        let dir = tempdir().unwrap();
        assert!(!is_executable(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_first_executable_wins() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain");
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        make_script(&plain, 0o644);
        make_script(&first, 0o755);
        make_script(&second, 0o755);

        let resolved = resolve_binary(&[plain, first.clone(), second]).unwrap();
        assert_eq!(resolved, first);
    }
}
