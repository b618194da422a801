//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the download orchestrator expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `std::process` types in any signature
//! - History methods never fail; persistence is best-effort
//! - Notification and event delivery never block the caller

pub mod event_emitter;
pub mod notifier;
pub mod process_launcher;
pub mod run_history;
pub mod tool_config;

pub use event_emitter::{NoopRunEmitter, RunEventEmitterPort};
pub use notifier::{CompletionNotifierPort, NoopNotifier, completion_message};
pub use process_launcher::{
    LaunchError, LaunchSpec, LaunchedProcess, ProcessLauncherPort, ProcessTerminator,
    SIGKILL_EXIT_CODE, SIGTERM_EXIT_CODE,
};
pub use run_history::RunHistoryPort;
pub use tool_config::{FixedToolConfig, ToolConfigPort};
