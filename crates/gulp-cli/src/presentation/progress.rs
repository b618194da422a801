//! Download progress rendering.
//!
//! A progress bar over file counts on a terminal, nothing but plain log lines
//! elsewhere. Shared between the progress watcher and the log emitter, so
//! every method takes `&self`.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use gulp_core::ProgressState;

const MAX_LABEL: usize = 40;

/// Progress display for one download.
pub struct DownloadProgress {
    bar: Option<ProgressBar>,
}

impl DownloadProgress {
    /// Create a display, auto-detecting terminal capability.
    pub fn new() -> Self {
        if io::stdout().is_terminal() {
            Self::fancy()
        } else {
            Self::plain()
        }
    }

    /// A display that only prints lines.
    pub const fn plain() -> Self {
        Self { bar: None }
    }

    fn fancy() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        bar.set_style(spinner_style());
        bar.set_message("Starting gallery-dl");
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar: Some(bar) }
    }

    /// Reflect a progress snapshot.
    pub fn update(&self, state: &ProgressState) {
        let Some(bar) = &self.bar else {
            return;
        };

        let label = if state.current_file.is_empty() {
            format!("{} files", state.downloaded_count)
        } else {
            format_label(&state.current_file)
        };
        bar.set_message(label);

        if state.total_count == 0 {
            return;
        }
        let total = u64::from(state.total_count);
        if bar.length() != Some(total) {
            bar.set_style(bar_style());
            bar.set_length(total);
        }
        bar.set_position(u64::from(state.downloaded_count).min(total));
    }

    /// Print a line above the bar (or plainly without one).
    pub fn println(&self, line: impl AsRef<str>) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{}", line.as_ref()),
        }
    }

    /// Remove the bar.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Default for DownloadProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{bar:28.cyan/blue} {pos:>4}/{len:4} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn format_label(raw: &str) -> String {
    if raw.chars().count() <= MAX_LABEL {
        return raw.to_string();
    }
    let mut buf: String = raw.chars().take(MAX_LABEL - 1).collect();
    buf.push('…');
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_labels_are_shortened() {
        let label = format_label(&"x".repeat(80));
        assert_eq!(label.chars().count(), MAX_LABEL);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn test_plain_display_ignores_updates() {
        let progress = DownloadProgress::plain();
        progress.update(&ProgressState {
            total_count: 4,
            downloaded_count: 2,
            ..ProgressState::default()
        });
        progress.finish();
    }
}
