//! JSON-file persistence for [`Settings`].

use std::path::{Path, PathBuf};

use tracing::warn;

use gulp_core::Settings;

use crate::atomic::write_atomic_blocking;
use crate::error::StoreError;

/// Settings stored as a single JSON object.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults.
    ///
    /// A missing file is not an error. A broken one is logged and ignored.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::with_defaults(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable settings; using defaults");
                Settings::with_defaults()
            }
        }
    }

    fn try_load(&self) -> Result<Option<Settings>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    /// Persist settings atomically.
    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(settings).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        write_atomic_blocking(&self.path, &bytes)
    }
}
