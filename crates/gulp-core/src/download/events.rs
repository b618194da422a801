//! Run lifecycle events.
//!
//! Emitted through [`crate::ports::RunEventEmitterPort`] so adapters can
//! render logs as they arrive without polling the history store.

use serde::{Deserialize, Serialize};

use crate::domain::{LogEntry, RunId, RunStatus};

/// Events emitted while a run is supervised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// The run was recorded and the process is about to launch.
    RunStarted { run_id: RunId, url: String },

    /// A log entry was appended to the run.
    LogAppended { run_id: RunId, entry: LogEntry },

    /// The run reached a terminal status.
    RunFinished {
        run_id: RunId,
        status: RunStatus,
        file_count: u32,
    },
}

impl RunEvent {
    /// The run this event belongs to.
    #[must_use]
    pub const fn run_id(&self) -> RunId {
        match self {
            Self::RunStarted { run_id, .. }
            | Self::LogAppended { run_id, .. }
            | Self::RunFinished { run_id, .. } => *run_id,
        }
    }
}
