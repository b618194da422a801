//! Download run error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for a download run.
///
/// `Cancelled` is an outcome rather than a failure; callers usually check
/// [`RunnerError::is_cancelled`] and show nothing.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The request was rejected before anything happened.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No candidate binary of the download tool is executable.
    #[error(
        "gallery-dl is not installed (searched: {}). Install it with `pipx install gallery-dl` or `brew install gallery-dl`",
        format_searched(.searched)
    )]
    NotInstalled {
        /// Candidate locations that were probed, in order.
        searched: Vec<PathBuf>,
    },

    /// The tool config file could not be provided.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The process could not be started.
    #[error("Failed to start download: {0}")]
    Spawn(String),

    /// The process exited with a failure code.
    #[error("{0}")]
    Process(String),

    /// The process was terminated on request.
    #[error("Download was cancelled")]
    Cancelled,
}

impl RunnerError {
    /// Check if this error is a user-requested cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
