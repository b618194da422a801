//! Output line classification.
//!
//! Turns one line of raw download-tool output into zero or more
//! [`LineSignal`]s. Each call looks at the line alone; counters and other
//! cross-line state belong to whoever applies the signals.
//!
//! # Rules
//!
//! Evaluated in order, the first match decides the log classification:
//!
//! 1. Blank line: no signals at all.
//! 2. Contains `error` or `warning` (any case): an `error`/`warning` log.
//!    Error lines also carry an [`LineSignal::ErrorMessage`].
//! 3. Contains `/` and does not start with `#`: a `download` log plus a
//!    [`LineSignal::FileCompleted`] for the text after the last `/`.
//! 4. Anything else: an `info` log.
//!
//! A bracketed fraction such as `[3/10]` is looked for on every line and
//! yields a [`LineSignal::Count`].

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::LogKind;

/// Separator the download tool uses in the paths it prints.
pub const PATH_SEPARATOR: char = '/';

/// Prefix the download tool uses for skipped or informational paths.
pub const COMMENT_MARKER: char = '#';

static COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]+)/([0-9]+)\]").expect("count pattern is valid"));

/// A structured signal derived from one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSignal {
    /// The line itself, classified. Message is the trimmed line.
    Log { kind: LogKind, message: String },
    /// The line reports an error; becomes the run's last error message.
    ErrorMessage(String),
    /// A file finished downloading; bumps the downloaded count by one.
    FileCompleted { filename: String },
    /// Authoritative position reported by the tool, e.g. `[3/10]`.
    Count { current: u32, total: u32 },
}

/// Classify a single line of output.
///
/// Never fails: anything unrecognised is an `info` log.
pub fn parse_line(line: &str) -> Vec<LineSignal> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut signals = Vec::with_capacity(2);
    let lowered = trimmed.to_lowercase();

    if lowered.contains("error") {
        signals.push(log(LogKind::Error, trimmed));
        signals.push(LineSignal::ErrorMessage(trimmed.to_string()));
    } else if lowered.contains("warning") {
        signals.push(log(LogKind::Warning, trimmed));
    } else if trimmed.contains(PATH_SEPARATOR) && !trimmed.starts_with(COMMENT_MARKER) {
        signals.push(log(LogKind::Download, trimmed));
        if let Some(filename) = extract_filename(trimmed) {
            signals.push(LineSignal::FileCompleted { filename });
        }
    } else {
        signals.push(log(LogKind::Info, trimmed));
    }

    if let Some((current, total)) = extract_count(trimmed) {
        signals.push(LineSignal::Count { current, total });
    }

    signals
}

/// Text after the last path separator, trimmed. `None` if that is empty.
pub fn extract_filename(line: &str) -> Option<String> {
    let (_, tail) = line.rsplit_once(PATH_SEPARATOR)?;
    let name = tail.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// First `[current/total]` fraction in the line, if well-formed with `total > 0`.
pub fn extract_count(line: &str) -> Option<(u32, u32)> {
    let caps = COUNT_PATTERN.captures(line)?;
    let current = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let total = caps.get(2)?.as_str().parse::<u32>().ok()?;
    (total > 0).then_some((current, total))
}

fn log(kind: LogKind, message: &str) -> LineSignal {
    LineSignal::Log {
        kind,
        message: message.to_string(),
    }
}
