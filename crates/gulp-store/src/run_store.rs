//! JSON-file implementation of the `RunHistoryPort` trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use gulp_core::{Run, RunHistoryPort, RunId};

use crate::atomic::{write_atomic, write_atomic_blocking};
use crate::error::StoreError;
use crate::schema::{DecodedHistory, HISTORY_FORMAT_VERSION, HistoryFileRef, decode};

/// Number of runs kept; the oldest are evicted beyond this.
pub const MAX_RETAINED_RUNS: usize = 100;

fn read_history(path: &Path) -> Result<Option<DecodedHistory>, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    decode(&bytes).map(Some).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn encode(path: &Path, runs: &[Run]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(&HistoryFileRef::current(runs)).map_err(|source| {
        StoreError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Load runs from a history file, newest first.
///
/// A missing file yields no runs. An unreadable or undecodable file is
/// logged and also yields no runs. A legacy bare-array file is rewritten in
/// the versioned format straight away. A file from a newer version is
/// accepted as long as its runs decode.
pub fn load_runs(path: &Path) -> Vec<Run> {
    match read_history(path) {
        Ok(None) => Vec::new(),
        Ok(Some(DecodedHistory::Legacy(runs))) => {
            info!(
                path = %path.display(),
                runs = runs.len(),
                "Migrating legacy run history to versioned format"
            );
            save_runs(path, &runs);
            runs
        }
        Ok(Some(DecodedHistory::Versioned { version, runs })) => {
            if version != HISTORY_FORMAT_VERSION {
                warn!(
                    path = %path.display(),
                    version,
                    expected = HISTORY_FORMAT_VERSION,
                    "Run history has an unexpected format version; loading anyway"
                );
            }
            runs
        }
        Err(e) => {
            warn!(error = %e, "Discarding unreadable run history");
            Vec::new()
        }
    }
}

/// Write runs to a history file in the current format.
///
/// Failures are logged, never returned.
pub fn save_runs(path: &Path, runs: &[Run]) {
    let result = encode(path, runs).and_then(|bytes| write_atomic_blocking(path, &bytes));
    if let Err(e) = result {
        warn!(error = %e, "Failed to save run history");
    }
}

/// Run history persisted to a single JSON file.
///
/// The whole list is rewritten after every mutation. The lock is held across
/// the write so saves land in the order mutations happened.
pub struct JsonRunStore {
    path: PathBuf,
    capacity: usize,
    runs: Mutex<Vec<Run>>,
}

impl JsonRunStore {
    /// Open the store at `path`, loading whatever is already there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, MAX_RETAINED_RUNS)
    }

    /// Open the store with a custom retention bound (at least one run).
    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let path = path.into();
        let capacity = capacity.max(1);
        let mut runs = load_runs(&path);
        runs.truncate(capacity);
        debug!(path = %path.display(), runs = runs.len(), "Opened run history");
        Self {
            path,
            capacity,
            runs: Mutex::new(runs),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, runs: &[Run]) {
        let result = match encode(&self.path, runs) {
            Ok(bytes) => write_atomic(&self.path, &bytes).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to save run history");
        }
    }
}

#[async_trait]
impl RunHistoryPort for JsonRunStore {
    async fn add_run(&self, run: Run) {
        let mut runs = self.runs.lock().await;
        runs.insert(0, run);
        runs.truncate(self.capacity);
        self.persist(&runs).await;
    }

    async fn update_run(&self, run: Run) {
        let mut runs = self.runs.lock().await;
        let Some(slot) = runs.iter_mut().find(|r| r.id == run.id) else {
            debug!(run_id = %run.id, "Ignoring update for unknown run");
            return;
        };
        *slot = run;
        self.persist(&runs).await;
    }

    async fn delete_run(&self, id: RunId) {
        let mut runs = self.runs.lock().await;
        let before = runs.len();
        runs.retain(|r| r.id != id);
        if runs.len() != before {
            self.persist(&runs).await;
        }
    }

    async fn clear(&self) {
        let mut runs = self.runs.lock().await;
        runs.clear();
        self.persist(&runs).await;
    }

    async fn runs(&self) -> Vec<Run> {
        self.runs.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        assert!(load_runs(&dir.path().join("history.json")).is_empty());
        assert!(!dir.path().join("history.json").exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let runs = vec![
            Run::new("https://example.com/b", "/out"),
            Run::new("https://example.com/a", "/out"),
        ];
        save_runs(&path, &runs);
        assert_eq!(load_runs(&path), runs);
    }

    #[tokio::test]
    async fn test_capacity_floor_is_one() {
        let dir = tempdir().unwrap();
        let store = JsonRunStore::with_capacity(dir.path().join("history.json"), 0);
        store.add_run(Run::new("https://example.com/a", "/out")).await;
        assert_eq!(store.runs().await.len(), 1);
    }
}
