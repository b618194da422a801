//! Tool configuration file port.
//!
//! The orchestrator only needs the location of the download tool's config
//! file. Creating, editing or validating it is somebody else's job.

use std::path::PathBuf;

use crate::paths::PathError;

/// Port that yields the absolute path of an existing tool config file.
pub trait ToolConfigPort: Send + Sync {
    fn config_path(&self) -> Result<PathBuf, PathError>;
}

/// A config location known up front.
#[derive(Debug, Clone)]
pub struct FixedToolConfig {
    path: PathBuf,
}

impl FixedToolConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ToolConfigPort for FixedToolConfig {
    fn config_path(&self) -> Result<PathBuf, PathError> {
        Ok(self.path.clone())
    }
}
