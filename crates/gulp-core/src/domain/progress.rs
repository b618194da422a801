//! Live progress of the active run.

use serde::{Deserialize, Serialize};

use super::run::RunId;
use crate::parser::LineSignal;

/// Transient progress mirror of the run currently being downloaded.
///
/// Written only by the download orchestrator; everyone else reads snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// True between launch and exit of the download process.
    pub is_downloading: bool,
    /// Run the progress belongs to.
    pub run_id: Option<RunId>,
    /// Name of the most recently reported file (may be empty).
    pub current_file: String,
    /// Files downloaded so far.
    pub downloaded_count: u32,
    /// Files expected in total; 0 means unknown.
    pub total_count: u32,
    /// Most recent error line reported by the tool.
    pub last_error: Option<String>,
}

impl ProgressState {
    /// Fresh state for a run that is about to start.
    #[must_use]
    pub fn started(run_id: RunId) -> Self {
        Self {
            is_downloading: true,
            run_id: Some(run_id),
            ..Self::default()
        }
    }

    /// Fraction complete in `0.0..=1.0`, or `None` while the total is unknown.
    #[must_use]
    pub fn fraction(&self) -> Option<f64> {
        if self.total_count == 0 {
            return None;
        }
        let ratio = f64::from(self.downloaded_count) / f64::from(self.total_count);
        Some(ratio.min(1.0))
    }

    /// Apply one parser signal.
    ///
    /// A `Count` signal overrides whatever the file increments produced.
    pub fn apply(&mut self, signal: &LineSignal) {
        match signal {
            LineSignal::Log { .. } => {}
            LineSignal::ErrorMessage(message) => {
                self.last_error = Some(message.clone());
            }
            LineSignal::FileCompleted { filename } => {
                self.current_file.clone_from(filename);
                self.downloaded_count = self.downloaded_count.saturating_add(1);
            }
            LineSignal::Count { current, total } => {
                self.downloaded_count = *current;
                self.total_count = *total;
            }
        }
    }
}
