//! Terminal presentation helpers.

pub mod progress;
pub mod tables;
pub mod terminal;

pub use progress::DownloadProgress;
pub use tables::{format_local_time, print_separator, short_id, truncate_string};
pub use terminal::{TerminalLogEmitter, TerminalNotifier, log_prefix};
