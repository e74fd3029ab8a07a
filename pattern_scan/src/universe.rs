//! The pattern universe: every length-L digit string over base B.
//!
//! Patterns are identified by their numeric value read as an L-digit
//! base-B numeral, so the universe is implicit: index `i` *is* pattern
//! `i`, and ascending index order is ascending numeric order.  Strings
//! (zero-padded, `0-9a-z` numerals) are rendered on demand.

use power_stream::digit_char;
use thiserror::Error;

/// Largest universe the dense per-pattern tables will be sized for.
///
/// `2^26` entries; the matcher and tracker tables together cost twelve
/// bytes per pattern, so this caps them below a gigabyte.
pub const MAX_PATTERNS: u64 = 1 << 26;

/// Parameter errors raised before a search starts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("base must be between 2 and 36, got {0}")]
    BaseOutOfRange(u8),
    #[error("sequence length must be at least 1")]
    ZeroSeqLen,
    #[error("universe {base}^{seq_len} exceeds the dense-table ceiling")]
    UniverseTooLarge { base: u8, seq_len: u32 },
}

/// The `B^L` patterns of a run, in canonical (ascending numeric) order.
///
/// Construction validates the parameters once; everything downstream
/// trusts `len()` to be exact.  Construction never truncates: a universe
/// over [`MAX_PATTERNS`] is an error, not a smaller universe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternUniverse {
    base:    u8,
    seq_len: u32,
    len:     usize,
}

impl PatternUniverse {
    /// Universe of all `base^seq_len` patterns.
    pub fn new(base: u8, seq_len: u32) -> Result<Self, ScanError> {
        if !(power_stream::MIN_BASE..=power_stream::MAX_BASE).contains(&base) {
            return Err(ScanError::BaseOutOfRange(base));
        }
        if seq_len == 0 {
            return Err(ScanError::ZeroSeqLen);
        }
        let len = (base as u64)
            .checked_pow(seq_len)
            .filter(|&n| n <= MAX_PATTERNS)
            .ok_or(ScanError::UniverseTooLarge { base, seq_len })?;
        Ok(PatternUniverse { base, seq_len, len: len as usize })
    }

    pub fn base(&self) -> u8 {
        self.base
    }

    pub fn seq_len(&self) -> u32 {
        self.seq_len
    }

    /// Number of patterns, `base^seq_len`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Render pattern `index` as a zero-padded numeral string.
    ///
    /// `index` must be below [`len`](Self::len).
    pub fn pattern(&self, index: usize) -> String {
        assert!(index < self.len, "pattern index {index} out of range");
        let mut digits = vec![0u8; self.seq_len as usize];
        let mut v = index;
        for slot in digits.iter_mut().rev() {
            *slot = (v % self.base as usize) as u8;
            v /= self.base as usize;
        }
        digits.into_iter().map(digit_char).collect()
    }

    /// All pattern strings in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len).map(move |i| self.pattern(i))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    // ── sizing ───────────────────────────────────────────────────────────
    #[test]
    fn decimal_triples() {
        let u = PatternUniverse::new(10, 3).unwrap();
        assert_eq!(u.len(), 1000);
        assert_eq!((u.base(), u.seq_len()), (10, 3));
    }

    #[test]
    fn binary_quintuples() {
        assert_eq!(PatternUniverse::new(2, 5).unwrap().len(), 32);
    }

    // ── rendering ────────────────────────────────────────────────────────
    #[test]
    fn zero_padded_strings() {
        let u = PatternUniverse::new(10, 3).unwrap();
        assert_eq!(u.pattern(0), "000");
        assert_eq!(u.pattern(7), "007");
        assert_eq!(u.pattern(666), "666");
        assert_eq!(u.pattern(999), "999");
    }

    #[test]
    fn extended_numerals() {
        let u = PatternUniverse::new(16, 2).unwrap();
        assert_eq!(u.pattern(255), "ff");
        assert_eq!(u.pattern(10), "0a");
    }

    #[test]
    fn binary_strings() {
        let u = PatternUniverse::new(2, 3).unwrap();
        let all: Vec<String> = u.iter().collect();
        assert_eq!(all, ["000", "001", "010", "011", "100", "101", "110", "111"]);
    }

    #[test]
    fn iter_is_sorted_and_distinct() {
        let u = PatternUniverse::new(16, 2).unwrap();
        let all: Vec<String> = u.iter().collect();
        assert_eq!(all.len(), 256);
        // Zero padding makes numeric order and string order agree.
        let mut sorted = all.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(all, sorted);
    }

    // ── validation ───────────────────────────────────────────────────────
    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(PatternUniverse::new(1, 3).unwrap_err(), ScanError::BaseOutOfRange(1));
        assert_eq!(PatternUniverse::new(37, 3).unwrap_err(), ScanError::BaseOutOfRange(37));
        assert_eq!(PatternUniverse::new(10, 0).unwrap_err(), ScanError::ZeroSeqLen);
    }

    #[test]
    fn ceiling_is_inclusive() {
        // 2^26 sits exactly on the ceiling; one more doubles past it.
        assert!(PatternUniverse::new(2, 26).is_ok());
        assert_eq!(
            PatternUniverse::new(2, 27).unwrap_err(),
            ScanError::UniverseTooLarge { base: 2, seq_len: 27 }
        );
    }

    #[test]
    fn ceiling_rejects_wide_universes() {
        assert!(matches!(
            PatternUniverse::new(10, 9).unwrap_err(),
            ScanError::UniverseTooLarge { .. }
        ));
        // Overflowing u64 entirely is also "too large", not a panic.
        assert!(matches!(
            PatternUniverse::new(36, 100).unwrap_err(),
            ScanError::UniverseTooLarge { .. }
        ));
    }
}
