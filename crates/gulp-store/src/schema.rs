//! On-disk layout of `history.json`.
//!
//! Current format is a versioned envelope:
//! ```json
//! { "version": 1, "runs": [ ... ] }
//! ```
//! Files written before versioning hold a bare array of runs.

use gulp_core::Run;
use serde::{Deserialize, Serialize};

/// Version written into every saved history file.
pub const HISTORY_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
pub struct HistoryFileRef<'a> {
    pub version: u32,
    pub runs: &'a [Run],
}

impl<'a> HistoryFileRef<'a> {
    pub const fn current(runs: &'a [Run]) -> Self {
        Self {
            version: HISTORY_FORMAT_VERSION,
            runs,
        }
    }
}

#[derive(Deserialize)]
struct HistoryFile {
    version: u32,
    runs: Vec<Run>,
}

/// Result of decoding a history file.
#[derive(Debug)]
pub enum DecodedHistory {
    /// A versioned envelope. The version may be newer than ours.
    Versioned { version: u32, runs: Vec<Run> },
    /// A bare array from before versioning; should be rewritten.
    Legacy(Vec<Run>),
}

/// Decode either format. On failure the envelope error is returned.
pub fn decode(bytes: &[u8]) -> Result<DecodedHistory, serde_json::Error> {
    match serde_json::from_slice::<HistoryFile>(bytes) {
        Ok(file) => Ok(DecodedHistory::Versioned {
            version: file.version,
            runs: file.runs,
        }),
        Err(envelope_err) => serde_json::from_slice::<Vec<Run>>(bytes)
            .map(DecodedHistory::Legacy)
            .map_err(|_| envelope_err),
    }
}
