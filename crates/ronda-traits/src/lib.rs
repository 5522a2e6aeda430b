#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the Ronda screener scoring engine.
//!
//! This crate holds the pieces every other Ronda crate shares: the screener
//! batch, the closed metric and sector catalogues, numeric coercion of
//! screener cells and the percentile-rank statistics.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod coerce;
pub mod columns;
pub mod error;
pub mod metric;
pub mod sector;
pub mod signal;
pub mod stats;
pub mod types;

pub use columns::MetricColumns;
pub use error::{Result, RondaError};
pub use metric::{Direction, Metric};
pub use sector::Sector;
pub use signal::DerivedSignal;
pub use types::{
    COMPANY, COUNTRY, INDUSTRY, MARKET_CAP, SECTOR, ScreenerBatch, TICKER, TOTAL_SCORE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
