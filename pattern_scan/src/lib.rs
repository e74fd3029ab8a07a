//! # pattern_scan
//!
//! The matching core for pattern-absence searches: given a base `B` and a
//! pattern length `L`, every one of the `B^L` digit strings of length `L`
//! is a pattern, and each sampled integer is scanned once for all of them
//! simultaneously.
//!
//! * [`PatternUniverse`] — the full pattern set, in ascending numeric order
//! * [`SlidingWindowMatcher`] — one-pass scan of a digit string against the
//!   whole universe, `O(D + B^L)` per sample with no per-sample allocation
//! * [`NonMatchTracker`] — cumulative per-pattern non-match counts plus the
//!   index of the last sample that missed any pattern
//! * [`StopRule`] — fixed stop or safety margin
//! * [`Summary`] — mean, spread, and outliers over the final counts
//!
//! ## Quick start
//!
//! ```rust
//! use pattern_scan::{PatternUniverse, SlidingWindowMatcher};
//!
//! let universe = PatternUniverse::new(10, 2).unwrap();
//! let mut matcher = SlidingWindowMatcher::new(&universe);
//!
//! // 1024 contains "10", "02", "24" and misses the other 97 patterns.
//! let absent = matcher.scan(&[1, 0, 2, 4]);
//! assert_eq!(absent.len(), 97);
//! assert!(!absent.contains(&24));
//! ```

pub mod matcher;
pub mod stop;
pub mod summary;
pub mod tracker;
pub mod universe;

pub use matcher::SlidingWindowMatcher;
pub use stop::StopRule;
pub use summary::{Outlier, Summary};
pub use tracker::NonMatchTracker;
pub use universe::{PatternUniverse, ScanError, MAX_PATTERNS};
