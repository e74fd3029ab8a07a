//! # power_stream
//!
//! Lazy sample streams over arbitrary-precision integers, rendered as
//! digit strings in a configurable base (2–36):
//!
//! * [`PowerStream`] — consecutive powers `p^n`, maintained incrementally
//!   with a single big-integer multiply per step
//! * [`RandomSampleStream`] — a fixed budget of uniform draws from a
//!   caller-seeded generator, with a fixed digit length
//!
//! Both yield [`Sample`]s through the [`DigitSource`] trait, so consumers
//! can drive either without knowing which one they hold.
//!
//! ## Quick start
//!
//! ```rust
//! use power_stream::{DigitSource, PowerStream};
//!
//! let mut powers = PowerStream::new(2, 10, 1).unwrap();
//! let s = powers.next_sample().unwrap();
//! assert_eq!(s.index, 1);
//! assert_eq!(s.digits, [2]);
//!
//! let s = powers.next_sample().unwrap();
//! assert_eq!((s.index, s.render().as_str()), (2, "4"));
//! ```

use num_bigint::BigUint;
use num_traits::Pow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Construction errors for the stream types.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    /// Powers of 0 and 1 are constant; there is nothing to stream.
    #[error("power must be at least 2, got {0}")]
    PowerTooSmall(u64),
    #[error("base must be between 2 and 36, got {0}")]
    BaseOutOfRange(u8),
    #[error("digit length must be at least 1")]
    ZeroDigitLen,
}

// ════════════════════════════════════════════════════════════════════════════
// Digit rendering
// ════════════════════════════════════════════════════════════════════════════

/// Smallest supported rendering base.
pub const MIN_BASE: u8 = 2;
/// Largest supported rendering base (numerals `0-9` then `a-z`).
pub const MAX_BASE: u8 = 36;

/// Numeral character for a digit value: `0-9` then `a-z`.
pub fn digit_char(d: u8) -> char {
    match d {
        0..=9   => (b'0' + d) as char,
        10..=35 => (b'a' + d - 10) as char,
        _       => '?',
    }
}

/// Render a most-significant-first digit slice as a numeral string.
pub fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| digit_char(d)).collect()
}

/// Drop leading zero digits in place, keeping at least one digit.
///
/// `[0,0,7] → [7]`, `[0,0,0] → [0]`, `[1,0] → [1,0]`.
pub fn strip_leading_zeros(digits: &mut Vec<u8>) {
    let first = digits
        .iter()
        .position(|&d| d != 0)
        .unwrap_or_else(|| digits.len().saturating_sub(1));
    digits.drain(..first);
}

fn check_base(base: u8) -> Result<(), StreamError> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(StreamError::BaseOutOfRange(base))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sample and the DigitSource seam
// ════════════════════════════════════════════════════════════════════════════

/// One sampled integer, rendered as digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Position in the stream: the exponent `n` for powers, the 1-based
    /// draw number for random samples.
    pub index:  u64,
    /// Digits in the rendering base, most significant first.
    pub digits: Vec<u8>,
}

impl Sample {
    /// The digits as a numeral string.
    pub fn render(&self) -> String {
        digits_to_string(&self.digits)
    }
}

/// A sequential source of digit samples.
pub trait DigitSource {
    /// Produce the next sample, or `None` once the stream is exhausted.
    fn next_sample(&mut self) -> Option<Sample>;

    /// Rendering base shared by every sample from this source.
    fn base(&self) -> u8;
}

// ════════════════════════════════════════════════════════════════════════════
// PowerStream — consecutive powers p^n
// ════════════════════════════════════════════════════════════════════════════

/// Streams `p^start, p^(start+1), p^(start+2), …` without bound.
///
/// The accumulator is seeded once with `p^start` (binary exponentiation)
/// and then advanced with exactly one big-integer multiply per sample, so
/// no step ever recomputes a power from scratch.  Values are arbitrary
/// precision throughout; the magnitude is limited only by memory.
#[derive(Debug)]
pub struct PowerStream {
    power:      u64,
    base:       u8,
    next_index: u64,
    value:      BigUint,
}

impl PowerStream {
    /// Stream of `power^n` for `n = start, start+1, …`, rendered in `base`.
    pub fn new(power: u64, base: u8, start: u64) -> Result<Self, StreamError> {
        if power < 2 {
            return Err(StreamError::PowerTooSmall(power));
        }
        check_base(base)?;
        Ok(PowerStream {
            power,
            base,
            next_index: start,
            value: Pow::pow(&BigUint::from(power), start),
        })
    }

    /// Exponent of the next sample.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }
}

impl DigitSource for PowerStream {
    fn next_sample(&mut self) -> Option<Sample> {
        let sample = Sample {
            index:  self.next_index,
            digits: self.value.to_radix_be(self.base as u32),
        };
        self.value *= self.power;
        self.next_index += 1;
        Some(sample)
    }

    fn base(&self) -> u8 {
        self.base
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RandomSampleStream — seeded uniform draws
// ════════════════════════════════════════════════════════════════════════════

/// Streams a fixed budget of uniform draws from `[0, base^digit_len − 1]`.
///
/// Each draw takes `digit_len` digits most significant first, each uniform
/// in `0..base`, then strips leading zeros so the digits are the minimal
/// rendering of the drawn value (the value zero keeps a single `0` digit).
/// Two streams built with the same seed produce identical samples.
#[derive(Debug)]
pub struct RandomSampleStream {
    base:       u8,
    digit_len:  u32,
    remaining:  u64,
    next_index: u64,
    rng:        StdRng,
}

impl RandomSampleStream {
    /// Stream of `count` draws seeded from `seed`.
    pub fn new(base: u8, digit_len: u32, count: u64, seed: u64) -> Result<Self, StreamError> {
        Self::with_rng(base, digit_len, count, StdRng::seed_from_u64(seed))
    }

    /// Stream of `count` draws from a caller-prepared generator.
    pub fn with_rng(base: u8, digit_len: u32, count: u64, rng: StdRng) -> Result<Self, StreamError> {
        check_base(base)?;
        if digit_len == 0 {
            return Err(StreamError::ZeroDigitLen);
        }
        Ok(RandomSampleStream {
            base,
            digit_len,
            remaining: count,
            next_index: 1,
            rng,
        })
    }

    /// Draws not yet produced.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl DigitSource for RandomSampleStream {
    fn next_sample(&mut self) -> Option<Sample> {
        if self.remaining == 0 {
            return None;
        }
        let mut digits: Vec<u8> = (0..self.digit_len)
            .map(|_| self.rng.gen_range(0..self.base))
            .collect();
        strip_leading_zeros(&mut digits);
        self.remaining -= 1;
        let sample = Sample { index: self.next_index, digits };
        self.next_index += 1;
        Some(sample)
    }

    fn base(&self) -> u8 {
        self.base
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn take(source: &mut impl DigitSource, n: usize) -> Vec<Sample> {
        (0..n).map_while(|_| source.next_sample()).collect()
    }

    // ── digit rendering ──────────────────────────────────────────────────
    #[test]
    fn digit_char_decimal() {
        assert_eq!(digit_char(0), '0');
        assert_eq!(digit_char(9), '9');
    }

    #[test]
    fn digit_char_extended() {
        assert_eq!(digit_char(10), 'a');
        assert_eq!(digit_char(15), 'f');
        assert_eq!(digit_char(35), 'z');
    }

    #[test]
    fn digits_to_string_hex() {
        assert_eq!(digits_to_string(&[10, 15]), "af");
        assert_eq!(digits_to_string(&[1, 0, 2, 4]), "1024");
    }

    #[test]
    fn strip_drops_leading_zeros() {
        let mut d = vec![0, 0, 7];
        strip_leading_zeros(&mut d);
        assert_eq!(d, [7]);
    }

    #[test]
    fn strip_keeps_zero_value() {
        let mut d = vec![0, 0, 0];
        strip_leading_zeros(&mut d);
        assert_eq!(d, [0]);
    }

    #[test]
    fn strip_keeps_interior_zeros() {
        let mut d = vec![1, 0, 2];
        strip_leading_zeros(&mut d);
        assert_eq!(d, [1, 0, 2]);
    }

    // ── PowerStream ──────────────────────────────────────────────────────
    #[test]
    fn powers_of_two_base_ten() {
        let mut ps = PowerStream::new(2, 10, 1).unwrap();
        let samples = take(&mut ps, 5);
        let rendered: Vec<String> = samples.iter().map(|s| s.render()).collect();
        assert_eq!(rendered, ["2", "4", "8", "16", "32"]);
        let indices: Vec<u64> = samples.iter().map(|s| s.index).collect();
        assert_eq!(indices, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn seeded_start_skips_ahead() {
        // 2^10 = 1024; the accumulator is seeded, not advanced one-by-one.
        let mut ps = PowerStream::new(2, 10, 10).unwrap();
        let s = ps.next_sample().unwrap();
        assert_eq!(s.index, 10);
        assert_eq!(s.digits, [1, 0, 2, 4]);
    }

    #[test]
    fn start_zero_yields_one() {
        let mut ps = PowerStream::new(3, 10, 0).unwrap();
        let s = ps.next_sample().unwrap();
        assert_eq!((s.index, s.digits.as_slice()), (0, &[1u8][..]));
    }

    #[test]
    fn binary_rendering() {
        // 2^4 in base 2 is 10000.
        let mut ps = PowerStream::new(2, 2, 4).unwrap();
        assert_eq!(ps.next_sample().unwrap().render(), "10000");
    }

    #[test]
    fn hex_rendering() {
        // 2^8 = 256 = 0x100.
        let mut ps = PowerStream::new(2, 16, 8).unwrap();
        assert_eq!(ps.next_sample().unwrap().render(), "100");
    }

    #[test]
    fn power_of_ten() {
        let mut ps = PowerStream::new(10, 10, 2).unwrap();
        assert_eq!(ps.next_sample().unwrap().digits, [1, 0, 0]);
    }

    #[test]
    fn next_index_tracks_position() {
        let mut ps = PowerStream::new(2, 10, 7).unwrap();
        assert_eq!(ps.next_index(), 7);
        ps.next_sample();
        assert_eq!(ps.next_index(), 8);
    }

    #[test]
    fn rejects_small_powers() {
        assert_eq!(PowerStream::new(0, 10, 1).unwrap_err(), StreamError::PowerTooSmall(0));
        assert_eq!(PowerStream::new(1, 10, 1).unwrap_err(), StreamError::PowerTooSmall(1));
    }

    #[test]
    fn rejects_bad_bases() {
        assert_eq!(PowerStream::new(2, 1, 1).unwrap_err(), StreamError::BaseOutOfRange(1));
        assert_eq!(PowerStream::new(2, 37, 1).unwrap_err(), StreamError::BaseOutOfRange(37));
    }

    // ── RandomSampleStream ───────────────────────────────────────────────
    #[test]
    fn same_seed_same_samples() {
        let mut a = RandomSampleStream::new(10, 8, 20, 42).unwrap();
        let mut b = RandomSampleStream::new(10, 8, 20, 42).unwrap();
        assert_eq!(take(&mut a, 20), take(&mut b, 20));
    }

    #[test]
    fn different_seed_differs() {
        let mut a = RandomSampleStream::new(10, 8, 20, 1).unwrap();
        let mut b = RandomSampleStream::new(10, 8, 20, 2).unwrap();
        assert_ne!(take(&mut a, 20), take(&mut b, 20));
    }

    #[test]
    fn digits_stay_below_base() {
        let mut rs = RandomSampleStream::new(5, 6, 50, 7).unwrap();
        for s in take(&mut rs, 50) {
            assert!(s.digits.iter().all(|&d| d < 5), "bad digits {:?}", s.digits);
        }
    }

    #[test]
    fn minimal_rendering() {
        let mut rs = RandomSampleStream::new(2, 4, 200, 3).unwrap();
        for s in take(&mut rs, 200) {
            assert!(!s.digits.is_empty() && s.digits.len() <= 4);
            if s.digits.len() > 1 {
                assert_ne!(s.digits[0], 0, "leading zero in {:?}", s.digits);
            }
        }
    }

    #[test]
    fn budget_and_indices() {
        let mut rs = RandomSampleStream::new(10, 3, 5, 0).unwrap();
        let samples = take(&mut rs, 10);
        assert_eq!(samples.len(), 5);
        let indices: Vec<u64> = samples.iter().map(|s| s.index).collect();
        assert_eq!(indices, [1, 2, 3, 4, 5]);
        assert!(rs.next_sample().is_none());
        assert_eq!(rs.remaining(), 0);
    }

    #[test]
    fn rejects_zero_digit_len() {
        assert_eq!(
            RandomSampleStream::new(10, 0, 5, 0).unwrap_err(),
            StreamError::ZeroDigitLen
        );
    }

    #[test]
    fn with_rng_matches_new() {
        let mut a = RandomSampleStream::new(10, 4, 8, 99).unwrap();
        let rng = StdRng::seed_from_u64(99);
        let mut b = RandomSampleStream::with_rng(10, 4, 8, rng).unwrap();
        assert_eq!(take(&mut a, 8), take(&mut b, 8));
    }
}
