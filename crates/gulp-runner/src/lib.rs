//! gallery-dl process supervision for gulp.
//!
//! - `binary` - locating an executable gallery-dl
//! - `invocation` - building its argument list
//! - `process` - the tokio-backed process launcher
//! - `tool_config` - the default gallery-dl config file
//! - `orchestrator` - the run lifecycle from request to terminal status

pub mod binary;
pub mod invocation;
pub mod orchestrator;
pub mod process;
pub mod tool_config;

pub use binary::{GALLERY_DL_ENV, default_candidates, is_executable, resolve_binary};
pub use invocation::{ARCHIVE_FILE_NAME, build_invocation};
pub use orchestrator::DownloadOrchestrator;
pub use process::TokioProcessLauncher;
pub use tool_config::{DefaultToolConfig, default_tool_config};
