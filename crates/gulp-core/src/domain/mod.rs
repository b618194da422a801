//! Domain types for download runs and their history.
//!
//! These types are pure data with lifecycle rules; no I/O happens here.

mod progress;
mod recency;
mod run;

pub use progress::ProgressState;
pub use recency::{RecencyBucket, group_by_recency};
pub use run::{LogEntry, LogKind, Run, RunId, RunStatus};
