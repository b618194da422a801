//! Terminal adapters for the notifier and event ports.

use std::sync::Arc;

use gulp_core::ports::completion_message;
use gulp_core::{CompletionNotifierPort, LogEntry, LogKind, RunEvent, RunEventEmitterPort};

use super::progress::DownloadProgress;

/// Marker printed before a log line of the given kind.
pub const fn log_prefix(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Info => "·",
        LogKind::Download => "↓",
        LogKind::Warning => "!",
        LogKind::Error => "✗",
    }
}

fn format_entry(entry: &LogEntry) -> String {
    format!("{} {}", log_prefix(entry.kind), entry.message)
}

/// Prints run logs as they are appended.
pub struct TerminalLogEmitter {
    progress: Arc<DownloadProgress>,
    quiet: bool,
}

impl TerminalLogEmitter {
    /// With `quiet`, only warnings and errors are printed.
    pub const fn new(progress: Arc<DownloadProgress>, quiet: bool) -> Self {
        Self { progress, quiet }
    }
}

impl RunEventEmitterPort for TerminalLogEmitter {
    fn emit(&self, event: RunEvent) {
        match event {
            RunEvent::RunStarted { url, .. } => {
                if !self.quiet {
                    self.progress.println(format!("→ {url}"));
                }
            }
            RunEvent::LogAppended { entry, .. } => {
                let important = matches!(entry.kind, LogKind::Warning | LogKind::Error);
                if important || !self.quiet {
                    self.progress.println(format_entry(&entry));
                }
            }
            RunEvent::RunFinished { .. } => {}
        }
    }
}

/// Prints a completion notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl CompletionNotifierPort for TerminalNotifier {
    fn notify_completion(&self, file_count: u32) {
        println!("✓ {}", completion_message(file_count));
    }
}
