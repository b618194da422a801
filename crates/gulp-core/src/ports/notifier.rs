//! Completion notification port.

/// Port for telling the user a run finished.
///
/// Called fire-and-forget after a successful run. Implementations must not
/// block and must swallow their own delivery failures.
pub trait CompletionNotifierPort: Send + Sync {
    fn notify_completion(&self, file_count: u32);
}

/// A notifier that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CompletionNotifierPort for NoopNotifier {
    fn notify_completion(&self, _file_count: u32) {
        // Intentionally do nothing
    }
}

/// Body text for a completion notification.
#[must_use]
pub fn completion_message(file_count: u32) -> String {
    match file_count {
        0 => "Download finished".to_string(),
        1 => "Downloaded 1 file".to_string(),
        n => format!("Downloaded {n} files"),
    }
}
