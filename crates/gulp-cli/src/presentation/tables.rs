//! Table formatting utilities for CLI output.

use chrono::{DateTime, Local, Utc};

use gulp_core::RunId;

/// Characters of a run id shown in tables.
pub const SHORT_ID_LEN: usize = 8;

/// Truncates a string to a maximum number of characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use gulp_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Leading characters of a run id, enough to address it on the command line.
pub fn short_id(id: &RunId) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

/// Timestamp in local time, minute precision.
pub fn format_local_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
