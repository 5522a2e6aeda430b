//! Core trait definition for score combiners.

use ndarray::Array1;
use ronda_traits::{Direction, Metric, Result};

/// One weighted metric column to be combined.
///
/// `values` are the coerced metric values for the rows being compared; the
/// combiner decides how they are normalized before weighting.
#[derive(Debug, Clone)]
pub struct SignalScore {
    /// Metric the values belong to
    pub metric: Metric,

    /// Which end of the distribution is favourable
    pub direction: Direction,

    /// Weight applied to the normalized values
    pub weight: f64,

    /// Values for each row in the comparison subset
    pub values: Array1<f64>,
}

impl SignalScore {
    /// A score for `metric`, using the metric's own direction.
    #[must_use]
    pub const fn new(metric: Metric, weight: f64, values: Array1<f64>) -> Self {
        Self {
            metric,
            direction: metric.direction(),
            weight,
            values,
        }
    }
}

/// Combines several weighted metric columns into one composite score.
///
/// All implementations must be thread-safe (Send + Sync).
///
/// # Examples
///
/// ```rust,no_run
/// use ndarray::Array1;
/// use ronda_combine::{Combiner, SignalScore};
///
/// struct SumCombiner;
///
/// impl Combiner for SumCombiner {
///     fn combine(&self, signals: &[SignalScore]) -> ronda_traits::Result<Array1<f64>> {
///         let len = signals.first().map_or(0, |s| s.values.len());
///         Ok(signals
///             .iter()
///             .fold(Array1::zeros(len), |acc, s| acc + &s.values * s.weight))
///     }
///
///     fn name(&self) -> &str {
///         "sum"
///     }
/// }
/// ```
pub trait Combiner: Send + Sync {
    /// Combine weighted signals into a composite score per row.
    ///
    /// # Errors
    ///
    /// Returns an error if no signals are given or their lengths differ.
    fn combine(&self, signals: &[SignalScore]) -> Result<Array1<f64>>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_score_takes_metric_direction() {
        let score = SignalScore::new(Metric::Pe, 25.0, Array1::from_vec(vec![10.0, 20.0]));
        assert_eq!(score.direction, Direction::LowerIsBetter);
        assert_eq!(score.values.len(), 2);

        let score = SignalScore::new(Metric::FcfYield, 30.0, Array1::zeros(1));
        assert_eq!(score.direction, Direction::HigherIsBetter);
    }
}
