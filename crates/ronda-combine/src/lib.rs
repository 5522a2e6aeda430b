//! Weight policies and percentile-rank scoring for the Ronda engine.
//!
//! This crate turns an enriched screener batch into one composite score per
//! row. Each weighted metric is percentile-ranked among the row's peers,
//! direction-aware, and the weighted ranks are summed into `Total_Score`.
//! Weights come from the fixed per-sector tables or from a single custom
//! policy.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ronda_combine::{ScoringMode, WeightPolicy, score};
//! use ronda_traits::ScreenerBatch;
//!
//! # fn run(batch: ScreenerBatch) -> ronda_traits::Result<()> {
//! let policy = WeightPolicy::parse_entries(["P/E=40", "FCF_Yield=60"])?;
//! let ranked = score(&batch, &ScoringMode::Custom(policy))?;
//! # Ok(())
//! # }
//! ```

mod combiner;
pub mod policy;
mod rank_weight;
mod scorer;

pub use combiner::{Combiner, SignalScore};
pub use policy::{SectorPolicyTable, WeightPolicy, fallback_policy, sector_policy, select_policy};
pub use rank_weight::{RankWeightConfig, WeightedRankCombiner};
pub use scorer::{Scorer, ScoringMode, score};
