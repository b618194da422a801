//! Run history port.
//!
//! Persistence is best-effort: none of these methods return errors. An
//! implementation that fails to write must log it and keep serving its
//! in-memory view, so a broken disk never fails a download.

use async_trait::async_trait;
use chrono::Local;

use crate::domain::{RecencyBucket, Run, RunId, group_by_recency};

/// Newest-first, bounded collection of runs with write-through persistence.
#[async_trait]
pub trait RunHistoryPort: Send + Sync {
    /// Insert a run at the front, evicting the oldest beyond the bound.
    async fn add_run(&self, run: Run);

    /// Replace the run with the same id. No-op if it is not present.
    async fn update_run(&self, run: Run);

    /// Remove one run.
    async fn delete_run(&self, id: RunId);

    /// Remove every run.
    async fn clear(&self);

    /// Snapshot of all runs, newest first.
    async fn runs(&self) -> Vec<Run>;

    /// Look up a single run.
    async fn get_run(&self, id: RunId) -> Option<Run> {
        self.runs().await.into_iter().find(|run| run.id == id)
    }

    /// Runs grouped into recency buckets against the current local time.
    async fn grouped_by_recency(&self) -> Vec<(RecencyBucket, Vec<Run>)> {
        group_by_recency(&self.runs().await, Local::now())
    }
}
