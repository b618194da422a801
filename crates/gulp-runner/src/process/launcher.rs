//! Spawning and supervising gallery-dl.

#[cfg(unix)]
use std::os::fd::OwnedFd;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use gulp_core::{LaunchError, LaunchSpec, LaunchedProcess, ProcessLauncherPort, ProcessTerminator};

#[cfg(unix)]
use super::stream::spawn_line_reader;
#[cfg(not(unix))]
use super::stream::spawn_blocking_line_reader;
use super::terminate::{exit_code, request_stop};

const DEFAULT_LINE_BUFFER: usize = 256;

/// Launches processes with `tokio::process`.
///
/// Stdout and stderr share the write end of one pipe, so the reader sees
/// lines in the order the child wrote them. A supervisor task owns the
/// child, waits for it, and turns a termination request into SIGTERM.
#[derive(Debug, Clone)]
pub struct TokioProcessLauncher {
    line_buffer: usize,
}

impl TokioProcessLauncher {
    pub const fn new() -> Self {
        Self {
            line_buffer: DEFAULT_LINE_BUFFER,
        }
    }

    /// Capacity of the merged line channel. Readers wait when it is full.
    #[must_use]
    pub const fn with_line_buffer(mut self, capacity: usize) -> Self {
        self.line_buffer = if capacity == 0 { 1 } else { capacity };
        self
    }
}

impl Default for TokioProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

struct TokenTerminator(CancellationToken);

impl ProcessTerminator for TokenTerminator {
    fn terminate(&self) {
        self.0.cancel();
    }
}

impl ProcessLauncherPort for TokioProcessLauncher {
    fn launch(&self, spec: &LaunchSpec) -> Result<LaunchedProcess, LaunchError> {
        let (reader, writer) = std::io::pipe().map_err(|e| LaunchError::Pipe(e.to_string()))?;
        let stderr_writer = writer
            .try_clone()
            .map_err(|e| LaunchError::Pipe(e.to_string()))?;

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .kill_on_drop(true);
        let spawned = command.spawn();
        // The command keeps its copies of the write end until dropped; EOF
        // only arrives once the child holds the last ones.
        drop(command);

        let child = spawned.map_err(|e| LaunchError::Spawn {
            program: spec.program.clone(),
            reason: e.to_string(),
        })?;

        let pid = child.id();
        info!(pid, program = %spec.program.display(), "Spawned download process");

        let (line_tx, line_rx) = mpsc::channel(self.line_buffer);
        #[cfg(unix)]
        {
            let output = tokio::net::unix::pipe::Receiver::from_owned_fd(OwnedFd::from(reader))
                .map_err(|e| LaunchError::Pipe(e.to_string()))?;
            spawn_line_reader(output, "output", line_tx);
        }
        #[cfg(not(unix))]
        spawn_blocking_line_reader(reader, "output", line_tx);

        let cancel = CancellationToken::new();
        let (exit_tx, exit_rx) = oneshot::channel();
        tokio::spawn(supervise(child, cancel.clone(), exit_tx));

        Ok(LaunchedProcess {
            pid,
            lines: line_rx,
            exit: exit_rx,
            terminator: Arc::new(TokenTerminator(cancel)),
        })
    }
}

async fn supervise(
    mut child: Child,
    cancel: CancellationToken,
    exit_tx: oneshot::Sender<std::io::Result<i32>>,
) {
    let finished = tokio::select! {
        status = child.wait() => Some(status),
        () = cancel.cancelled() => None,
    };

    let status = match finished {
        Some(status) => status,
        None => {
            request_stop(&mut child);
            child.wait().await
        }
    };

    let result = status.map(exit_code);
    debug!(?result, "Download process exited");
    // Receiver gone means nobody is waiting for the outcome
    let _ = exit_tx.send(result);
}
