//! Sequential search drivers: stream → matcher → tracker → stop rule.
//!
//! One loop, one sample at a time.  The matcher's tables and the stream's
//! accumulator are owned here and reused in place, so memory stays flat
//! regardless of run length; checkpoint writes are the only pauses.

use log::{info, trace};
use pattern_scan::{NonMatchTracker, PatternUniverse, SlidingWindowMatcher, StopRule, Summary};
use power_stream::{DigitSource, PowerStream, RandomSampleStream, Sample};

use crate::checkpoint::{Checkpoint, PeriodicCheckpoint};
use crate::error::SearchError;

// ════════════════════════════════════════════════════════════════════════════
// Parameters and progress
// ════════════════════════════════════════════════════════════════════════════

/// Parameters of a power run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Power p to raise.
    pub power:   u64,
    /// Rendering base B.
    pub base:    u8,
    /// Pattern length L.
    pub seq_len: u32,
    /// First exponent to process.
    pub start:   u64,
    pub rule:    StopRule,
}

/// Per-sample observer, called exactly once per processed sample.
///
/// The driver never writes to the console itself; anything user-facing
/// goes through a sink.
pub trait ProgressSink {
    fn on_sample(&mut self, sample: &Sample, absent: &[u32]);
}

/// Sink that ignores everything.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_sample(&mut self, _sample: &Sample, _absent: &[u32]) {}
}

/// Sink that logs one line every `every` samples, plus the full value at
/// trace level.
pub struct LogProgress {
    every: u64,
}

impl LogProgress {
    pub fn new(every: u64) -> Self {
        LogProgress { every: every.max(1) }
    }
}

impl ProgressSink for LogProgress {
    fn on_sample(&mut self, sample: &Sample, absent: &[u32]) {
        if sample.index % self.every == 0 {
            info!(
                "n={}: {} digits, {} patterns absent",
                sample.index,
                sample.digits.len(),
                absent.len()
            );
        }
        trace!("n={} value={}", sample.index, sample.render());
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Outcome
// ════════════════════════════════════════════════════════════════════════════

/// What a finished run hands back.
pub struct SearchOutcome {
    pub universe: PatternUniverse,
    /// Cumulative non-match counts in canonical pattern order.
    pub counts:   Vec<u64>,
    /// First sample index covered by `counts`.
    pub start:    u64,
    /// First sample index not covered.
    pub stop:     u64,
}

impl SearchOutcome {
    /// Samples covered by the counts.
    pub fn samples(&self) -> u64 {
        self.stop - self.start
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.universe, &self.counts, self.samples())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PowerSearch — consecutive powers with checkpoint/resume
// ════════════════════════════════════════════════════════════════════════════

/// Driver for consecutive powers `p^n`.
pub struct PowerSearch {
    params:      SearchParams,
    /// First exponent the counts cover; differs from `params.start` on a
    /// resumed run and is what checkpoints record as `start`.
    origin:      u64,
    universe:    PatternUniverse,
    stream:      PowerStream,
    tracker:     NonMatchTracker,
    checkpoints: PeriodicCheckpoint,
}

impl PowerSearch {
    /// Fresh run from `params`.
    pub fn new(params: SearchParams, checkpoints: PeriodicCheckpoint) -> Result<Self, SearchError> {
        let universe = PatternUniverse::new(params.base, params.seq_len)?;
        let stream = PowerStream::new(params.power, params.base, params.start)?;
        let tracker = NonMatchTracker::new(universe.len(), params.start);
        Ok(PowerSearch { origin: params.start, params, universe, stream, tracker, checkpoints })
    }

    /// Continuation of a checkpointed run: starts at `checkpoint.stop`
    /// with the accumulated counts, under a freshly chosen `rule`.
    ///
    /// The absence marker is re-based to the resume point.  That can only
    /// delay a safety-margin stop, never drop counts.
    pub fn resume(
        checkpoint: Checkpoint,
        rule: StopRule,
        checkpoints: PeriodicCheckpoint,
    ) -> Result<Self, SearchError> {
        let params = SearchParams {
            power:   checkpoint.power,
            base:    checkpoint.base,
            seq_len: checkpoint.seq_len,
            start:   checkpoint.stop,
            rule,
        };
        let universe = PatternUniverse::new(params.base, params.seq_len)?;
        assert_eq!(
            checkpoint.results.len(),
            universe.len(),
            "checkpoint counts do not match {}^{}",
            params.base,
            params.seq_len
        );
        let stream = PowerStream::new(params.power, params.base, params.start)?;
        let tracker = NonMatchTracker::from_counts(checkpoint.results, checkpoint.stop);
        Ok(PowerSearch {
            origin: checkpoint.start,
            params,
            universe,
            stream,
            tracker,
            checkpoints,
        })
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    fn checkpoint_at(&self, stop: u64) -> Checkpoint {
        Checkpoint {
            power:   self.params.power,
            base:    self.params.base,
            seq_len: self.params.seq_len,
            start:   self.origin,
            stop,
            results: self.tracker.counts().to_vec(),
        }
    }

    /// Run to completion.
    ///
    /// A final checkpoint is always written, even for an empty range; its
    /// failure is the one mid-run error that aborts the run.
    pub fn run(mut self, sink: &mut dyn ProgressSink) -> Result<SearchOutcome, SearchError> {
        let mut matcher = SlidingWindowMatcher::new(&self.universe);
        let mut next = self.params.start;
        loop {
            if !self.params.rule.admits(next) {
                break;
            }
            let Some(sample) = self.stream.next_sample() else { break };
            let absent = matcher.scan(&sample.digits);
            self.tracker.record(absent, sample.index);
            sink.on_sample(&sample, absent);
            next = sample.index + 1;
            if self.checkpoints.due() {
                let checkpoint = self.checkpoint_at(next);
                self.checkpoints.save_now(&checkpoint);
            }
            if self.params.rule.satisfied(sample.index, self.tracker.last_any_absent()) {
                break;
            }
        }
        self.checkpoints.final_save(&self.checkpoint_at(next))?;
        Ok(SearchOutcome {
            universe: self.universe,
            counts:   self.tracker.into_counts(),
            start:    self.origin,
            stop:     next,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RandomSearch — a fixed budget of seeded draws
// ════════════════════════════════════════════════════════════════════════════

/// Driver for a fixed budget of seeded uniform draws.
///
/// Random runs have no checkpoint: the budget is the stop rule, and the
/// whole sequence is reproducible from the seed alone.
pub struct RandomSearch {
    universe: PatternUniverse,
    stream:   RandomSampleStream,
    tracker:  NonMatchTracker,
}

impl RandomSearch {
    pub fn new(
        base: u8,
        seq_len: u32,
        digit_len: u32,
        count: u64,
        seed: u64,
    ) -> Result<Self, SearchError> {
        let universe = PatternUniverse::new(base, seq_len)?;
        let stream = RandomSampleStream::new(base, digit_len, count, seed)?;
        let tracker = NonMatchTracker::new(universe.len(), 1);
        Ok(RandomSearch { universe, stream, tracker })
    }

    /// Run the whole budget.
    pub fn run(mut self, sink: &mut dyn ProgressSink) -> Result<SearchOutcome, SearchError> {
        let mut matcher = SlidingWindowMatcher::new(&self.universe);
        let mut next = 1;
        while let Some(sample) = self.stream.next_sample() {
            let absent = matcher.scan(&sample.digits);
            self.tracker.record(absent, sample.index);
            sink.on_sample(&sample, absent);
            next = sample.index + 1;
        }
        Ok(SearchOutcome {
            universe: self.universe,
            counts:   self.tracker.into_counts(),
            start:    1,
            stop:     next,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
