//! # apocalypse_search
//!
//! Pattern-absence search: does every length-L digit pattern in base B
//! eventually appear in `p^n`?  The drivers walk a sample stream through
//! the `pattern_scan` matching core, accumulate per-pattern miss counts,
//! stop on a fixed bound or a safety margin, and checkpoint power runs
//! as JSON so they can resume.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use apocalypse_search::{
//!     CheckpointStore, NullProgress, PeriodicCheckpoint, PowerSearch, SearchParams,
//! };
//! use pattern_scan::StopRule;
//!
//! let params = SearchParams {
//!     power: 2,
//!     base: 10,
//!     seq_len: 3,
//!     start: 1,
//!     rule: StopRule::SafetyMargin { margin: 5_000 },
//! };
//! let saver = PeriodicCheckpoint::new(CheckpointStore::new("run.json"), None);
//! let outcome = PowerSearch::new(params, saver)
//!     .unwrap()
//!     .run(&mut NullProgress)
//!     .unwrap();
//! println!("{:?}", outcome.summary());
//! ```

pub mod checkpoint;
pub mod driver;
pub mod error;

pub use checkpoint::{Checkpoint, CheckpointStore, PeriodicCheckpoint};
pub use driver::{
    LogProgress, NullProgress, PowerSearch, ProgressSink, RandomSearch, SearchOutcome,
    SearchParams,
};
pub use error::SearchError;
