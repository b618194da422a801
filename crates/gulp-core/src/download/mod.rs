//! Download run requests, outcomes and events.

mod errors;
mod events;
mod request;

pub use errors::RunnerError;
pub use events::RunEvent;
pub use request::{DownloadOptions, RunRequest, RunSummary};
