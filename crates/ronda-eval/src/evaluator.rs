//! Evaluation of composite scores against a labeled outcome column.

use ndarray::Array1;
use ronda_traits::stats::finite_mean;
use ronda_traits::{Result, RondaError, ScreenerBatch, TOTAL_SCORE};
use serde::{Deserialize, Serialize};

use crate::ic::calculate_ic;

/// Configuration for score evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Outcome column, e.g. a next-period return (default: `"Target"`)
    pub target: String,

    /// Number of best-scored rows in the top bucket (default: 20)
    pub top_n: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            target: "Target".to_string(),
            top_n: 20,
        }
    }
}

/// How well `Total_Score` ordered a labeled batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvaluation {
    /// Rows with a finite score and a finite outcome
    pub n: usize,
    /// Spearman correlation of score and outcome, `NaN` below two rows
    pub ic: f64,
    /// Rows actually in the top bucket
    pub top_n: usize,
    /// Mean outcome of the top bucket
    pub top_mean: f64,
    /// Mean outcome of all usable rows
    pub universe_mean: f64,
    /// `top_mean - universe_mean`
    pub spread: f64,
}

/// Evaluate a scored batch against `target` with a top bucket of `top_n`.
///
/// Only rows where both `Total_Score` and the outcome are finite are used.
/// The top bucket is the `top_n` highest-scored usable rows, ties kept in
/// batch order.
///
/// # Errors
///
/// Returns [`RondaError::MissingColumn`] if `Total_Score` or `target` is
/// absent.
pub fn evaluate_scores(batch: &ScreenerBatch, target: &str, top_n: usize) -> Result<ScoreEvaluation> {
    let scores = batch
        .float_column(TOTAL_SCORE)
        .ok_or_else(|| RondaError::MissingColumn(TOTAL_SCORE.to_string()))?;
    let outcomes = batch
        .float_column(target)
        .ok_or_else(|| RondaError::MissingColumn(target.to_string()))?;
    Ok(evaluate(&scores, &outcomes, top_n))
}

/// Evaluate a scored batch with an [`EvaluatorConfig`].
///
/// # Errors
///
/// Same as [`evaluate_scores`].
pub fn evaluate_with(batch: &ScreenerBatch, config: &EvaluatorConfig) -> Result<ScoreEvaluation> {
    evaluate_scores(batch, &config.target, config.top_n)
}

fn evaluate(scores: &Array1<f64>, outcomes: &Array1<f64>, top_n: usize) -> ScoreEvaluation {
    let mut usable: Vec<(f64, f64)> = scores
        .iter()
        .zip(outcomes.iter())
        .filter(|(s, o)| s.is_finite() && o.is_finite())
        .map(|(&s, &o)| (s, o))
        .collect();

    let ic = {
        let (s, o): (Vec<f64>, Vec<f64>) = usable.iter().copied().unzip();
        calculate_ic(&Array1::from_vec(s), &Array1::from_vec(o))
    };

    let universe: Vec<f64> = usable.iter().map(|&(_, o)| o).collect();
    let universe_mean = finite_mean(&universe);

    // stable, so tied scores keep batch order
    usable.sort_by(|a, b| b.0.total_cmp(&a.0));
    let top_n = top_n.min(usable.len());
    let top: Vec<f64> = usable[..top_n].iter().map(|&(_, o)| o).collect();
    let top_mean = finite_mean(&top);

    ScoreEvaluation {
        n: usable.len(),
        ic,
        top_n,
        top_mean,
        universe_mean,
        spread: top_mean - universe_mean,
    }
}
