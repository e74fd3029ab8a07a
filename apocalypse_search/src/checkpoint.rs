//! Checkpoint persistence: JSON snapshots of a power run's state.
//!
//! A checkpoint describes a completed half-open exponent range
//! `[start, stop)`: `results[i]` is the cumulative non-match count of
//! pattern `i` over that range, and `stop` is the first exponent not yet
//! processed.  Resuming starts a new run at `stop` with `results` as its
//! counts and re-bases the absence marker to `stop`; the true marker is
//! not persisted, so a resumed safety-margin run can overrun by up to one
//! margin before stopping.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, warn};
use pattern_scan::PatternUniverse;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

// ════════════════════════════════════════════════════════════════════════════
// Checkpoint — the persisted state
// ════════════════════════════════════════════════════════════════════════════

/// Self-describing restart point for a power run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Power p whose samples were scanned.
    pub power:   u64,
    /// Rendering base B.
    pub base:    u8,
    /// Pattern length L.
    pub seq_len: u32,
    /// First exponent covered by `results`.
    pub start:   u64,
    /// First exponent *not* covered; resume begins here.
    pub stop:    u64,
    /// Cumulative non-match counts in canonical pattern order.
    pub results: Vec<u64>,
}

impl Checkpoint {
    /// Consistency check against a universe recomputed from `base` and
    /// `seq_len`; the universe size is never trusted from the file.
    fn validate(&self) -> Result<(), String> {
        if self.power < 2 {
            return Err(format!("power {} is below 2", self.power));
        }
        let universe = PatternUniverse::new(self.base, self.seq_len).map_err(|e| e.to_string())?;
        if self.results.len() != universe.len() {
            return Err(format!(
                "results hold {} counts but {}^{} = {} patterns",
                self.results.len(),
                self.base,
                self.seq_len,
                universe.len(),
            ));
        }
        if self.stop < self.start {
            return Err(format!("stop {} is before start {}", self.stop, self.start));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CheckpointStore — one file, load and save
// ════════════════════════════════════════════════════════════════════════════

/// Reads and writes one checkpoint file.
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CheckpointStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `checkpoint` as pretty JSON, replacing any previous file.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<(), SearchError> {
        let json = serde_json::to_string_pretty(checkpoint).map_err(|e| {
            SearchError::CheckpointWrite { path: self.path.clone(), source: e.into() }
        })?;
        fs::write(&self.path, json)
            .map_err(|e| SearchError::CheckpointWrite { path: self.path.clone(), source: e })
    }

    /// Load and validate a checkpoint.
    ///
    /// An unreadable, unparseable, or inconsistent file is corrupt and
    /// fatal; there are no retries and no partial recovery.
    pub fn load(&self) -> Result<Checkpoint, SearchError> {
        let corrupt =
            |reason: String| SearchError::CheckpointCorrupt { path: self.path.clone(), reason };
        let text =
            fs::read_to_string(&self.path).map_err(|e| corrupt(format!("read failed: {e}")))?;
        let checkpoint: Checkpoint =
            serde_json::from_str(&text).map_err(|e| corrupt(e.to_string()))?;
        checkpoint.validate().map_err(corrupt)?;
        Ok(checkpoint)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PeriodicCheckpoint — wall-clock interval saver
// ════════════════════════════════════════════════════════════════════════════

/// Saves through a [`CheckpointStore`] on a wall-clock interval.
///
/// Periodic saves are best-effort: a failed write is logged and the run
/// continues, and the timer resets either way so a sick disk is retried
/// at the next interval rather than on every sample.  The final save is
/// the durable one and fails the run on error.
pub struct PeriodicCheckpoint {
    store:     CheckpointStore,
    interval:  Option<Duration>,
    last_save: Instant,
}

impl PeriodicCheckpoint {
    /// `interval = None` disables periodic saves; the final save still
    /// happens.
    pub fn new(store: CheckpointStore, interval: Option<Duration>) -> Self {
        PeriodicCheckpoint { store, interval, last_save: Instant::now() }
    }

    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    /// True once the interval has elapsed since the last attempt.
    pub fn due(&self) -> bool {
        match self.interval {
            Some(interval) => self.last_save.elapsed() >= interval,
            None => false,
        }
    }

    /// Best-effort save; resets the timer whether or not it worked.
    pub fn save_now(&mut self, checkpoint: &Checkpoint) {
        match self.store.save(checkpoint) {
            Ok(()) => debug!(
                "checkpoint saved at n={} to {}",
                checkpoint.stop,
                self.store.path().display()
            ),
            Err(e) => warn!("periodic checkpoint skipped: {e}"),
        }
        self.last_save = Instant::now();
    }

    /// The end-of-run save; failure here is fatal.
    pub fn final_save(&self, checkpoint: &Checkpoint) -> Result<(), SearchError> {
        self.store.save(checkpoint)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
