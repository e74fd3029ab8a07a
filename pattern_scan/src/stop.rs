//! Stopping rules for a search run.

use log::warn;

/// When a run ends.  Exactly one rule is authoritative per run.
///
/// * [`FixedStop`](StopRule::FixedStop) bounds the sample range half-open:
///   indices `start <= n < stop` are processed.
/// * [`SafetyMargin`](StopRule::SafetyMargin) is the unbounded heuristic:
///   keep sampling until `margin` samples have passed since the last one
///   that missed any pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopRule {
    FixedStop { stop: u64 },
    SafetyMargin { margin: u64 },
}

impl StopRule {
    /// Resolve possibly-conflicting choices into one authoritative rule.
    ///
    /// Both given: the safety margin wins, with a warning; this is not an
    /// error.  Neither given: `None`, which callers must treat as fatal
    /// before starting the search.
    pub fn resolve(stop: Option<u64>, safety: Option<u64>) -> Option<StopRule> {
        match (stop, safety) {
            (Some(stop), Some(margin)) => {
                warn!("both a fixed stop ({stop}) and a safety margin ({margin}) were given; using the safety margin");
                Some(StopRule::SafetyMargin { margin })
            }
            (Some(stop), None) => Some(StopRule::FixedStop { stop }),
            (None, Some(margin)) => Some(StopRule::SafetyMargin { margin }),
            (None, None) => None,
        }
    }

    /// May the sample with this index be processed?
    pub fn admits(&self, index: u64) -> bool {
        match *self {
            StopRule::FixedStop { stop } => index < stop,
            StopRule::SafetyMargin { .. } => true,
        }
    }

    /// Is the rule met after processing `index`?
    ///
    /// `last_any_absent` is the tracker's global marker; it never exceeds
    /// `index`.
    pub fn satisfied(&self, index: u64, last_any_absent: u64) -> bool {
        match *self {
            StopRule::FixedStop { .. } => false,
            StopRule::SafetyMargin { margin } => index - last_any_absent >= margin,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
