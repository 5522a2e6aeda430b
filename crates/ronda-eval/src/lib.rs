//! Evaluation of Ronda composite scores.
//!
//! Given a scored batch with a realized outcome column (a labeled dataset),
//! this crate measures how well `Total_Score` ordered the rows:
//! - Information Coefficient (Spearman rank correlation)
//! - Mean outcome of the top-scored bucket against the universe
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_eval::evaluate_scores;
//!
//! let eval = evaluate_scores(&scored, "Next Month Return", 20)?;
//! println!("IC {:.3}, spread {:.2}", eval.ic, eval.spread);
//! ```

pub mod evaluator;
pub mod ic;

pub use evaluator::{EvaluatorConfig, ScoreEvaluation, evaluate_scores, evaluate_with};
pub use ic::calculate_ic;
