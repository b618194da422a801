//! Grouping of run history by how recently each run started.

use chrono::{DateTime, Duration, Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::run::Run;

/// Recency bucket, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecencyBucket {
    Today,
    Yesterday,
    ThisWeek,
    Older,
}

impl RecencyBucket {
    /// All buckets in display order.
    pub const ALL: [Self; 4] = [Self::Today, Self::Yesterday, Self::ThisWeek, Self::Older];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::ThisWeek => "This Week",
            Self::Older => "Older",
        }
    }

    /// Bucket a timestamp relative to `now`, using `now`'s calendar days.
    pub fn classify<Tz: TimeZone>(timestamp: &DateTime<Tz>, now: &DateTime<Tz>) -> Self {
        let day = timestamp.date_naive();
        let today = now.date_naive();

        if day == today {
            Self::Today
        } else if today.pred_opt() == Some(day) {
            Self::Yesterday
        } else if *timestamp > now.clone() - Duration::days(7) {
            Self::ThisWeek
        } else {
            Self::Older
        }
    }
}

impl std::fmt::Display for RecencyBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Partition runs into recency buckets relative to `now`.
///
/// Empty buckets are omitted; run order within a bucket follows the input.
pub fn group_by_recency(runs: &[Run], now: DateTime<Local>) -> Vec<(RecencyBucket, Vec<Run>)> {
    let mut groups: Vec<(RecencyBucket, Vec<Run>)> = RecencyBucket::ALL
        .iter()
        .map(|bucket| (*bucket, Vec::new()))
        .collect();

    for run in runs {
        let local = run.timestamp.with_timezone(&Local);
        let bucket = RecencyBucket::classify(&local, &now);
        groups[bucket as usize].1.push(run.clone());
    }

    groups.retain(|(_, members)| !members.is_empty());
    groups
}
