//! CLI-specific error types and mappings.
//!
//! Maps download, path and storage errors to exit codes and user-facing
//! messages.

use gulp_core::{PathError, RunnerError, SettingsError};
use gulp_store::StoreError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or lookup error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (history or settings could not be read or written).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// gallery-dl is missing.
    #[error("{0}")]
    Unavailable(String),

    /// The download ran and failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// The download was interrupted.
    #[error("Download cancelled")]
    Cancelled,
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    /// - 130: Interrupted by Ctrl-C
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Download(_) => 1,
            Self::Arguments(_) => 2,   // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,         // EX_IOERR
            Self::Config(_) => 78,     // EX_CONFIG
            Self::Cancelled => 130,
        }
    }

    /// Line to print on stderr, if any.
    ///
    /// A cancelled download is an expected outcome and is not reported as
    /// an error; only the exit code tells it apart.
    pub fn report(&self) -> Option<String> {
        match self {
            Self::Cancelled => None,
            other => Some(format!("Error: {other}")),
        }
    }
}

impl From<RunnerError> for CliError {
    fn from(err: RunnerError) -> Self {
        match err {
            RunnerError::InvalidRequest(msg) => Self::Arguments(msg),
            RunnerError::NotInstalled { .. } => Self::Unavailable(err.to_string()),
            RunnerError::Config(msg) => Self::Config(msg),
            RunnerError::Spawn(_) | RunnerError::Process(_) => Self::Download(err.to_string()),
            RunnerError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::Io(err.to_string())
    }
}
