//! Fatal error taxonomy for the search drivers.

use std::path::PathBuf;

use pattern_scan::ScanError;
use power_stream::StreamError;
use thiserror::Error;

/// Everything that aborts a run.
///
/// Parameter and checkpoint-load problems are fatal before any sample is
/// processed.  Mid-run, only the final checkpoint write can fail the run;
/// periodic writes are logged and skipped instead.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Neither a fixed stop nor a safety margin: refuse to start rather
    /// than run without a stopping rule.
    #[error("no stopping rule: give either a fixed stop or a safety margin")]
    MissingStopRule,

    #[error("checkpoint {}: {reason}", .path.display())]
    CheckpointCorrupt { path: PathBuf, reason: String },

    #[error("checkpoint write to {} failed", .path.display())]
    CheckpointWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("summary write to {} failed", .path.display())]
    SummaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
