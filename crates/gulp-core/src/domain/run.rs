//! Run domain types.
//!
//! A [`Run`] records one invocation of the download tool: where it pointed,
//! where it wrote, how it ended and every line of output it produced.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a run or log entry.
pub type RunId = Uuid;

/// Lifecycle status of a run.
///
/// `InProgress` is the only non-terminal status. Once a run leaves it the
/// status never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    #[serde(alias = "in-progress")]
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl RunStatus {
    /// Whether this status absorbs all further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Convert status to string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification tag of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Download,
    Error,
    Warning,
}

impl LogKind {
    /// Convert kind to string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Download => "download",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single immutable line in a run's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
}

impl LogEntry {
    /// Create a log entry stamped with the current time.
    pub fn new(message: impl Into<String>, kind: LogKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            message: message.into(),
            kind,
        }
    }
}

/// One recorded invocation of the download tool.
///
/// Status and logs are private so the lifecycle rules hold: the status only
/// moves out of `InProgress` once, and nothing is appended afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: RunId,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub output_directory: PathBuf,
    status: RunStatus,
    #[serde(default)]
    file_count: u32,
    #[serde(default)]
    logs: Vec<LogEntry>,
}

impl Run {
    /// Create a new in-progress run stamped with the current time.
    pub fn new(url: impl Into<String>, output_directory: impl Into<PathBuf>) -> Self {
        Self::with_timestamp(url, output_directory, Utc::now())
    }

    /// Create a new in-progress run with an explicit creation time.
    pub fn with_timestamp(
        url: impl Into<String>,
        output_directory: impl Into<PathBuf>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            timestamp,
            output_directory: output_directory.into(),
            status: RunStatus::InProgress,
            file_count: 0,
            logs: Vec::new(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    #[must_use]
    pub const fn file_count(&self) -> u32 {
        self.file_count
    }

    #[must_use]
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Append a log entry.
    ///
    /// Returns the appended entry, or `None` when the run is already terminal.
    pub fn add_log(&mut self, message: impl Into<String>, kind: LogKind) -> Option<&LogEntry> {
        if self.is_terminal() {
            return None;
        }
        self.logs.push(LogEntry::new(message, kind));
        self.logs.last()
    }

    /// Record the number of downloaded files.
    ///
    /// The count never decreases and is frozen once the run is terminal.
    pub fn record_file_count(&mut self, count: u32) {
        if !self.is_terminal() {
            self.file_count = self.file_count.max(count);
        }
    }

    /// Move the run into a terminal status.
    ///
    /// Returns `false` (and changes nothing) if the run is already terminal or
    /// `status` is not a terminal status.
    pub fn finish(&mut self, status: RunStatus) -> bool {
        if self.is_terminal() || !status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }

    /// Short label for the run: the URL host without a leading `www.`.
    ///
    /// Falls back to the raw URL when it has no host.
    pub fn display_name(&self) -> String {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
            .map_or_else(
                || self.url.clone(),
                |host| host.strip_prefix("www.").unwrap_or(&host).to_string(),
            )
    }

    /// Deepest directory shared by every download path in the log.
    ///
    /// Falls back to the requested output directory when the log has no
    /// download paths. Derived on demand; never stored.
    pub fn actual_download_directory(&self) -> PathBuf {
        let mut directories = self
            .logs
            .iter()
            .filter(|entry| entry.kind == LogKind::Download && entry.message.contains('/'))
            .filter_map(|entry| Path::new(entry.message.trim()).parent());

        let Some(first) = directories.next() else {
            return self.output_directory.clone();
        };

        let mut common = first.to_path_buf();
        for dir in directories {
            while !dir.starts_with(&common) {
                if !common.pop() {
                    break;
                }
            }
        }

        if common.as_os_str().is_empty() {
            self.output_directory.clone()
        } else {
            common
        }
    }
}
