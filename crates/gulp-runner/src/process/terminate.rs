//! Termination requests for a running child.

use tokio::process::Child;
use tracing::{debug, warn};

#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Ask the child to stop.
///
/// # Platform behavior
/// - Unix: sends SIGTERM and lets gallery-dl clean up; no escalation
/// - Windows: no SIGTERM equivalent, the child is killed outright
pub fn request_stop(child: &mut Child) {
    #[cfg(unix)]
    {
        let Some(raw) = child.id() else {
            debug!("child already reaped; nothing to terminate");
            return;
        };
        let Ok(pid) = i32::try_from(raw) else {
            warn!(pid = raw, "pid out of range; cannot signal child");
            return;
        };
        match signal::kill(Pid::from_raw(pid), Signal::SIGTERM) {
            Ok(()) => debug!(pid, "sent SIGTERM"),
            // Process may have already exited
            Err(nix::errno::Errno::ESRCH) => debug!(pid, "child exited before SIGTERM"),
            Err(e) => warn!(pid, error = %e, "failed to send SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = child.start_kill() {
            warn!(error = %e, "failed to kill child");
        }
    }
}

/// Exit code as the orchestrator sees it: the code for a normal exit, the
/// signal number for a signal exit.
pub fn exit_code(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return signal;
        }
    }
    status.code().unwrap_or(-1)
}
