//! Download run request and result types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::RunId;

/// Caller-selected behaviour for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// Skip files already recorded in the destination's download archive.
    pub skip_existing: bool,
    /// Write metadata sidecar files next to each download.
    pub save_metadata: bool,
    /// Invoke the completion notifier after a successful run.
    pub notify_on_completion: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            skip_existing: true,
            save_metadata: false,
            notify_on_completion: true,
        }
    }
}

/// A request to run the download tool once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// URL handed to the tool as its final argument.
    pub url: String,
    /// Destination directory; created if missing.
    pub output_directory: PathBuf,
    pub options: DownloadOptions,
}

impl RunRequest {
    /// Create a request with default options.
    pub fn new(url: impl Into<String>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output_directory: output_directory.into(),
            options: DownloadOptions::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub const fn with_options(mut self, options: DownloadOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub file_count: u32,
}
