//! Process launcher port.
//!
//! The orchestrator never touches `std::process` directly. A launcher starts
//! the download tool and hands back three things: the merged output as
//! ordered lines, a receiver for the exit code, and a terminator that can
//! request a stop while the process is running.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Exit code reported when a process was stopped by a signal.
///
/// Signal terminations report the signal number, so SIGKILL is 9 and
/// SIGTERM is 15.
pub const SIGKILL_EXIT_CODE: i32 = 9;
/// See [`SIGKILL_EXIT_CODE`].
pub const SIGTERM_EXIT_CODE: i32 = 15;

/// What to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Arguments as lossy strings, for logging and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

/// Requests termination of a running process.
pub trait ProcessTerminator: Send + Sync {
    /// Ask the process to stop. Must not block; repeated calls are harmless.
    fn terminate(&self);
}

/// A process that has been started.
pub struct LaunchedProcess {
    /// OS process id, when known.
    pub pid: Option<u32>,
    /// Stdout and stderr lines in emission order. Closes at end of output.
    pub lines: mpsc::Receiver<String>,
    /// Resolves once with the exit code (signal number for signal exits).
    pub exit: oneshot::Receiver<io::Result<i32>>,
    /// Stop handle usable while `exit` is pending.
    pub terminator: Arc<dyn ProcessTerminator>,
}

impl std::fmt::Debug for LaunchedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchedProcess")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

/// Errors raised while starting a process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The OS refused to start the program.
    #[error("failed to spawn {program}: {reason}")]
    Spawn { program: PathBuf, reason: String },

    /// The program started but its output could not be captured.
    #[error("failed to capture output: {0}")]
    Pipe(String),
}

/// Port for starting the download tool.
///
/// Implementations must be called from within a tokio runtime.
pub trait ProcessLauncherPort: Send + Sync {
    fn launch(&self, spec: &LaunchSpec) -> Result<LaunchedProcess, LaunchError>;
}
