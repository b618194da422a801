//! Default gallery-dl configuration file.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::info;

use gulp_core::{PathError, ToolConfigPort, ensure_directory, tool_config_path};

/// Configuration written when no gallery-dl config exists yet.
pub fn default_tool_config() -> Value {
    json!({
        "extractor": {
            "base-directory": "~/Downloads/Gallery-DL"
        },
        "output": {
            "mode": "auto"
        },
        "downloader": {
            "rate": "1M",
            "retries": 3
        }
    })
}

/// A gallery-dl config file that is created with defaults on first use.
///
/// An existing file is never rewritten, so user edits survive.
#[derive(Debug, Clone)]
pub struct DefaultToolConfig {
    path: PathBuf,
}

impl DefaultToolConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The config file inside the gulp data root.
    pub fn at_data_root() -> Result<Self, PathError> {
        Ok(Self::new(tool_config_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the default config if the file does not exist.
    pub fn ensure(&self) -> Result<&Path, PathError> {
        if self.path.is_file() {
            return Ok(&self.path);
        }
        if let Some(parent) = self.path.parent() {
            ensure_directory(parent)?;
        }

        let write_failed = |reason: String| PathError::WriteFailed {
            path: self.path.clone(),
            reason,
        };
        let body = serde_json::to_string_pretty(&default_tool_config())
            .map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(&self.path, body).map_err(|e| write_failed(e.to_string()))?;

        info!(path = %self.path.display(), "Created default gallery-dl config");
        Ok(&self.path)
    }
}

impl ToolConfigPort for DefaultToolConfig {
    fn config_path(&self) -> Result<PathBuf, PathError> {
        self.ensure().map(Path::to_path_buf)
    }
}
