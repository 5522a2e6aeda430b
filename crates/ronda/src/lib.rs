#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! Sector-aware multi-factor scoring for stock screener snapshots.
//!
//! ronda is an umbrella crate that re-exports all ronda sub-crates for
//! convenience. It takes one screener snapshot (one row per stock), adds the
//! derived metrics, and ranks every row against its peers into a single
//! `Total_Score`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ronda::{ScoringMode, WeightPolicy, analyze};
//! use ronda::screener::{CsvViewSource, FetchConfig, ScreenFilter, load_batch};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = CsvViewSource::new("data/screener");
//! let Some(batch) = load_batch(&source, &FetchConfig::default(), &ScreenFilter::new()).await? else {
//!     return Ok(());
//! };
//!
//! // Per-sector weight tables
//! let ranked = analyze(&batch, &ScoringMode::SectorAuto)?;
//!
//! // One custom policy across the whole batch
//! let policy = WeightPolicy::parse_entries(["P/E=40", "FCF_Yield=60"])?;
//! let ranked = analyze(&batch, &ScoringMode::Custom(policy))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Batch, metric and sector types, coercion and rank statistics
//! - [`signals`] - The seventeen derived metrics
//! - [`combine`] - Weight policies and percentile-rank scoring
//! - [`eval`] - Score evaluation against labeled outcomes
//! - [`screener`] - Loading, merging and filtering screener views
//!
//! ## Scoring
//!
//! 1. **Enrichment** adds the derived metrics computed from raw columns
//! 2. **Policy selection** picks the sector table, the fallback composite or
//!    the custom policy for each row
//! 3. **Ranking** percentile-ranks each weighted metric among the row's peers
//!    and sums `rank * weight` into `Total_Score`

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod pipeline;

pub use pipeline::{analyze, analyze_with};

// ============================================================================
// Core Types
// ============================================================================

/// Core types shared by all ronda crates.
pub mod traits {
    pub use ronda_traits::*;
}

pub use ronda_traits::{
    Direction, Metric, MetricColumns, Result, RondaError, ScreenerBatch, Sector, TOTAL_SCORE,
};

// ============================================================================
// Derived Metrics
// ============================================================================

/// Derived metric implementations.
///
/// - **Momentum**: compounded and spread performance windows
/// - **Risk**: volatility-adjusted RSI and return, moving-average convergence
/// - **Value**: FCF yield, leverage-adjusted PEG, working capital value
/// - **Quality**: GP/A, growth proxy, margin quality, GPA score
/// - **Flow**: ownership transactions and short-squeeze pressure
pub mod signals {
    pub use ronda_signals::*;
}

// ============================================================================
// Scoring
// ============================================================================

/// Weight policies and scoring.
pub mod combine {
    pub use ronda_combine::*;
}

pub use ronda_combine::{ScoringMode, WeightPolicy, score};

// ============================================================================
// Evaluation
// ============================================================================

/// Score evaluation against a labeled outcome column.
///
/// The Information Coefficient is the Spearman correlation of
/// `Total_Score` with the outcome:
///
/// ```text
/// IC = corr(rank(score), rank(outcome))
/// ```
pub mod eval {
    pub use ronda_eval::*;
}

// ============================================================================
// Screener Views
// ============================================================================

/// Screener view loading.
pub mod screener {
    pub use ronda_screener::*;
}
