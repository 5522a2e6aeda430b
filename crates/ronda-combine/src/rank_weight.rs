//! Percentile-rank weighted sum.

use ndarray::Array1;
use ronda_traits::Result;
use ronda_traits::stats::percentile_rank_array;
use serde::{Deserialize, Serialize};

use crate::combiner::{Combiner, SignalScore};

/// Configuration for the weighted rank combiner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankWeightConfig {
    /// Multiplier applied to every weight (default: 1.0).
    ///
    /// Weights on a 0-1 scale need a scale of 100 to produce 0-100 scores.
    pub weight_scale: f64,
}

impl Default for RankWeightConfig {
    fn default() -> Self {
        Self { weight_scale: 1.0 }
    }
}

/// Sums `weight * percentile_rank` over the given signals.
///
/// Each signal is ranked within the rows it is given, with ties averaged and
/// direction-aware so that the best value gets a percentile of `1.0`. A row
/// that is best on every signal scores the sum of the weights.
///
/// # Examples
///
/// ```rust,no_run
/// use ndarray::Array1;
/// use ronda_combine::{Combiner, SignalScore, WeightedRankCombiner};
/// use ronda_traits::Metric;
///
/// let combiner = WeightedRankCombiner::default();
/// let signals = vec![
///     SignalScore::new(Metric::FcfYield, 50.0, Array1::from_vec(vec![0.1, 0.3, 0.2])),
///     SignalScore::new(Metric::Pe, 50.0, Array1::from_vec(vec![30.0, 10.0, 20.0])),
/// ];
///
/// let scores = combiner.combine(&signals).unwrap();
/// assert_eq!(scores[1], 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightedRankCombiner {
    config: RankWeightConfig,
}

impl WeightedRankCombiner {
    /// Create a new combiner with the given configuration.
    pub const fn new(config: RankWeightConfig) -> Self {
        Self { config }
    }

    /// Multiplier applied to every weight.
    #[must_use]
    pub const fn weight_scale(&self) -> f64 {
        self.config.weight_scale
    }
}

impl Combiner for WeightedRankCombiner {
    fn combine(&self, signals: &[SignalScore]) -> Result<Array1<f64>> {
        let Some(first) = signals.first() else {
            return Err("Cannot combine zero signals".into());
        };
        let n_rows = first.values.len();

        for signal in signals {
            if signal.values.len() != n_rows {
                return Err(format!(
                    "Signal '{}' has {} rows, expected {}",
                    signal.metric,
                    signal.values.len(),
                    n_rows
                )
                .into());
            }
        }

        let mut composite = Array1::zeros(n_rows);
        for signal in signals {
            let ranks = percentile_rank_array(&signal.values, signal.direction);
            composite += &(ranks * (signal.weight * self.config.weight_scale));
        }
        Ok(composite)
    }

    fn name(&self) -> &str {
        "weighted_rank"
    }
}
