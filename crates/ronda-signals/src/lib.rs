//! Derived screener metrics for the Ronda scoring engine.
//!
//! This crate provides the seventeen derived metrics computed from raw
//! screener columns, grouped by what they measure:
//! - Momentum: compounded and spread momentum over the performance windows
//! - Risk: volatility-adjusted RSI and return, moving-average convergence
//! - Value: FCF yield, leverage-adjusted PEG, working capital against book
//! - Quality: GP/A, growth proxy, margin quality and the GPA score
//! - Flow: ownership transactions and short-squeeze pressure
//!
//! [`calculator::enrich`] computes all of them on a batch.
//!
//! # Example
//!
//! ```ignore
//! use ronda_signals::calculator::enrich;
//! use ronda_signals::registry::available_signals;
//!
//! let enriched = enrich(&batch)?;
//! let signals = available_signals();
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use ndarray::Array1;

pub mod calculator;
pub mod flow;
pub mod momentum;
pub mod quality;
pub mod registry;
pub mod risk;
pub mod value;

pub use calculator::{derived_signals, enrich};
pub use registry::{DerivedCategory, DerivedInfo};

/// Clamp every value into `[lo, hi]`. `NaN` stays `NaN`.
pub(crate) fn clip(values: Array1<f64>, lo: f64, hi: f64) -> Array1<f64> {
    values.mapv_into(|v| if v.is_nan() { v } else { v.clamp(lo, hi) })
}

/// Replace `NaN` with `fill`. Infinities are kept.
pub(crate) fn fill_nan(values: Array1<f64>, fill: f64) -> Array1<f64> {
    values.mapv_into(|v| if v.is_nan() { fill } else { v })
}
