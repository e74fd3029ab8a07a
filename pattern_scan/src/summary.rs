//! Run summaries: mean, spread, and outliers over the final counts.

use serde::Serialize;

use crate::universe::PatternUniverse;

/// A pattern whose count sits more than three standard deviations from
/// the mean.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outlier {
    /// Canonical pattern index.
    pub index:   u32,
    /// Rendered pattern string.
    pub pattern: String,
    /// Final non-match count.
    pub count:   u64,
    /// Signed deviation from the mean, in standard deviations.
    pub sigma:   f64,
}

/// Statistics over the per-pattern counts of a finished run.
///
/// The standard deviation is the population deviation over the whole
/// universe.  When it is zero (every pattern has the same count) there
/// are no outliers by definition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Samples processed by the run.
    pub total_samples: u64,
    pub mean:          f64,
    pub std_dev:       f64,
    /// Patterns beyond three standard deviations, in canonical order.
    pub outliers:      Vec<Outlier>,
}

impl Summary {
    /// Summarize `counts`, which must be in the universe's canonical order.
    pub fn compute(universe: &PatternUniverse, counts: &[u64], total_samples: u64) -> Summary {
        debug_assert_eq!(counts.len(), universe.len());
        let n = counts.len() as f64;
        let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;
        let variance = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        let mut outliers = Vec::new();
        if std_dev > 0.0 {
            for (index, &count) in counts.iter().enumerate() {
                let sigma = (count as f64 - mean) / std_dev;
                if sigma.abs() > 3.0 {
                    outliers.push(Outlier {
                        index: index as u32,
                        pattern: universe.pattern(index),
                        count,
                        sigma,
                    });
                }
            }
        }

        Summary { total_samples, mean, std_dev, outliers }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mean_and_deviation() {
        let u = PatternUniverse::new(2, 2).unwrap();
        let s = Summary::compute(&u, &[1, 2, 3, 4], 10);
        assert_eq!(s.total_samples, 10);
        assert!(close(s.mean, 2.5));
        assert!(close(s.std_dev, 1.25_f64.sqrt()));
    }

    #[test]
    fn uniform_counts_have_no_outliers() {
        let u = PatternUniverse::new(10, 1).unwrap();
        let s = Summary::compute(&u, &[7; 10], 7);
        assert!(close(s.std_dev, 0.0));
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn high_outlier_is_flagged() {
        let u = PatternUniverse::new(10, 2).unwrap();
        let mut counts = vec![10u64; 100];
        counts[42] = 1000;
        let s = Summary::compute(&u, &counts, 1000);
        assert!(close(s.mean, 19.9));
        assert!(close(s.std_dev, 9702.99_f64.sqrt()));
        assert_eq!(s.outliers.len(), 1);
        let o = &s.outliers[0];
        assert_eq!((o.index, o.pattern.as_str(), o.count), (42, "42", 1000));
        assert!(o.sigma > 3.0);
    }

    #[test]
    fn low_outlier_is_flagged_with_negative_sigma() {
        let u = PatternUniverse::new(10, 2).unwrap();
        let mut counts = vec![1000u64; 100];
        counts[7] = 10;
        let s = Summary::compute(&u, &counts, 1000);
        assert_eq!(s.outliers.len(), 1);
        assert_eq!(s.outliers[0].pattern, "07");
        assert!(s.outliers[0].sigma < -3.0);
    }
}
