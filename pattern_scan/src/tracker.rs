//! Cumulative non-match bookkeeping across a run.

/// Per-pattern non-match counts plus the index of the last sample that
/// missed *any* pattern.
///
/// The marker is global, not per-pattern: one `u64` records the most
/// recent sample whose absent set was non-empty, and the safety-margin
/// stop rule measures its distance from the current sample.  Counts only
/// ever grow over a run.
pub struct NonMatchTracker {
    counts:          Vec<u64>,
    last_any_absent: u64,
}

impl NonMatchTracker {
    /// Fresh tracker for a universe of `universe_len` patterns.
    ///
    /// `start` is the first sample index the run will process; until a
    /// sample misses a pattern, the marker reports it.
    pub fn new(universe_len: usize, start: u64) -> Self {
        NonMatchTracker {
            counts: vec![0; universe_len],
            last_any_absent: start,
        }
    }

    /// Tracker restored from previously accumulated counts.
    pub fn from_counts(counts: Vec<u64>, last_any_absent: u64) -> Self {
        NonMatchTracker { counts, last_any_absent }
    }

    /// Fold one sample's absent set (from the matcher) into the totals.
    pub fn record(&mut self, absent: &[u32], sample_index: u64) {
        for &pattern in absent {
            self.counts[pattern as usize] += 1;
        }
        if !absent.is_empty() {
            self.last_any_absent = sample_index;
        }
    }

    /// Cumulative non-match counts, in canonical pattern order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Index of the last sample that missed any pattern.
    pub fn last_any_absent(&self) -> u64 {
        self.last_any_absent
    }

    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_absences() {
        let mut t = NonMatchTracker::new(4, 1);
        t.record(&[0, 2], 1);
        assert_eq!(t.counts(), [1, 0, 1, 0]);
        assert_eq!(t.last_any_absent(), 1);
    }

    #[test]
    fn empty_absent_set_leaves_marker() {
        let mut t = NonMatchTracker::new(4, 1);
        t.record(&[3], 5);
        t.record(&[], 6);
        assert_eq!(t.last_any_absent(), 5);
        assert_eq!(t.counts(), [0, 0, 0, 1]);
    }

    #[test]
    fn counts_accumulate_monotonically() {
        let mut t = NonMatchTracker::new(3, 1);
        let mut previous = t.counts().to_vec();
        for (i, absent) in [&[0u32, 1][..], &[1], &[], &[0, 1, 2]].iter().enumerate() {
            t.record(absent, i as u64 + 1);
            let now = t.counts().to_vec();
            assert!(now.iter().zip(&previous).all(|(n, p)| n >= p));
            previous = now;
        }
        assert_eq!(t.counts(), [2, 3, 1]);
    }

    #[test]
    fn marker_starts_at_run_start() {
        let t = NonMatchTracker::new(2, 17);
        assert_eq!(t.last_any_absent(), 17);
    }

    #[test]
    fn restored_tracker_keeps_totals() {
        let t = NonMatchTracker::from_counts(vec![4, 0, 9], 12);
        assert_eq!(t.counts(), [4, 0, 9]);
        assert_eq!(t.last_any_absent(), 12);
        assert_eq!(t.into_counts(), vec![4, 0, 9]);
    }
}
