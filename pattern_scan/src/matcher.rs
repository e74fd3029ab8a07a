//! One-pass scanning of a digit string against the whole universe.
//!
//! A length-L window over the digits is itself an L-digit base-B value,
//! so each window position identifies its pattern index directly and one
//! dense table covers every pattern at once.

use crate::universe::PatternUniverse;

/// Scans digit strings against all `B^L` patterns simultaneously.
///
/// The matcher owns two reusable tables sized to the universe: a dense
/// occurrence-count table indexed by pattern value, and a scratch vector
/// for the absent indices of the current sample.  Neither is reallocated
/// between samples; a scan runs in `O(D + B^L)` for a D-digit sample and
/// allocates nothing.
pub struct SlidingWindowMatcher {
    base:    u64,
    seq_len: usize,
    /// `base^(seq_len-1)`; reducing the window modulo this drops its
    /// oldest digit before the next one shifts in.
    high:    u64,
    counts:  Vec<u32>,
    absent:  Vec<u32>,
}

impl SlidingWindowMatcher {
    /// Matcher with tables sized for `universe`.
    pub fn new(universe: &PatternUniverse) -> Self {
        let base = universe.base() as u64;
        let len = universe.len();
        SlidingWindowMatcher {
            base,
            seq_len: universe.seq_len() as usize,
            high: base.pow(universe.seq_len() - 1),
            counts: vec![0; len],
            absent: Vec::with_capacity(len),
        }
    }

    /// Scan one sample and return the indices of the patterns it does
    /// *not* contain, in ascending order.
    ///
    /// The slice borrows the matcher's scratch table and is valid until
    /// the next `scan` call.  A sample shorter than the pattern length
    /// contains no window at all, so every pattern is absent.  Every
    /// digit must be below the universe's base; `DigitSource`
    /// implementations guarantee that.
    pub fn scan(&mut self, digits: &[u8]) -> &[u32] {
        self.absent.clear();
        if digits.len() < self.seq_len {
            self.absent.extend(0..self.counts.len() as u32);
            return &self.absent;
        }

        // First pass: roll the window across the digits, counting each
        // complete window under its pattern index.
        let mut window = 0u64;
        for (i, &d) in digits.iter().enumerate() {
            debug_assert!((d as u64) < self.base, "digit {d} out of range for base {}", self.base);
            window = (window % self.high) * self.base + d as u64;
            if i + 1 >= self.seq_len {
                self.counts[window as usize] += 1;
            }
        }

        // Second pass: zero counters are this sample's absent patterns;
        // nonzero counters are reset in place so the table is clean for
        // the next sample without a full clear.
        for (index, count) in self.counts.iter_mut().enumerate() {
            if *count == 0 {
                self.absent.push(index as u32);
            } else {
                *count = 0;
            }
        }
        &self.absent
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
