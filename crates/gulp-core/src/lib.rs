//! Core domain types, output parsing and port definitions for gulp.
//!
//! - `domain` - runs, log entries, progress state, recency grouping
//! - `parser` - classification of raw download-tool output lines
//! - `download` - run requests, outcomes, errors and events
//! - `ports` - traits the orchestrator expects from infrastructure
//! - `paths` - data root and file locations
//! - `settings` - persisted user preferences

pub mod domain;
pub mod download;
pub mod parser;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    LogEntry, LogKind, ProgressState, RecencyBucket, Run, RunId, RunStatus, group_by_recency,
};
pub use download::{DownloadOptions, RunEvent, RunRequest, RunSummary, RunnerError};
pub use parser::{LineSignal, parse_line};
pub use ports::{
    CompletionNotifierPort, FixedToolConfig, LaunchError, LaunchSpec, LaunchedProcess,
    NoopNotifier, NoopRunEmitter, ProcessLauncherPort, ProcessTerminator, RunEventEmitterPort,
    RunHistoryPort, ToolConfigPort,
};
pub use settings::{Settings, SettingsError, SettingsUpdate, validate_settings};

// Re-export path utilities
pub use paths::{
    PathError, data_root, default_output_dir, ensure_directory, history_path,
    normalize_user_path, settings_path, tool_config_path,
};
