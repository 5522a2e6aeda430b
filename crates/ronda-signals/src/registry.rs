//! Registry of derived metrics.
//!
//! This module provides metadata and discovery for every derived metric in
//! the ronda-signals library.

use ronda_traits::Metric;
use serde::Serialize;

/// Derived metric category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DerivedCategory {
    /// Price momentum signals
    Momentum,
    /// Volatility-adjusted and trend-shape signals
    Risk,
    /// Valuation signals
    Value,
    /// Profitability and growth quality signals
    Quality,
    /// Ownership flow and short interest signals
    Flow,
}

impl DerivedCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Momentum,
        Self::Risk,
        Self::Value,
        Self::Quality,
        Self::Flow,
    ];

    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Momentum => "Compounded and spread momentum over performance windows",
            Self::Risk => "Volatility-adjusted RSI and returns, moving-average convergence",
            Self::Value => "Cash flow yield, leverage-adjusted PEG and working capital value",
            Self::Quality => "Gross profitability, margin quality and forward growth",
            Self::Flow => "Institutional and insider flow, short squeeze pressure",
        }
    }
}

/// Metadata about a derived metric.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedInfo {
    /// The metric produced
    pub metric: Metric,

    /// Category classification
    pub category: DerivedCategory,

    /// Human-readable formula or description
    pub description: &'static str,

    /// Whether the value depends on the rest of the batch
    pub batch_relative: bool,
}

const fn info(metric: Metric, category: DerivedCategory, description: &'static str) -> DerivedInfo {
    DerivedInfo {
        metric,
        category,
        description,
        batch_relative: false,
    }
}

/// Get information about all derived metrics, in computation order.
#[must_use]
pub fn available_signals() -> Vec<DerivedInfo> {
    use DerivedCategory::*;

    vec![
        info(
            Metric::MomentumCustom,
            Momentum,
            "Yearly (or half-year) return net of the last month, compounded",
        ),
        info(Metric::Momentum12M1M, Momentum, "Perf Year - Perf Month"),
        info(Metric::Momentum6M1M, Momentum, "Perf Half - Perf Month"),
        info(Metric::ShortTermAccel, Momentum, "Perf Month - Perf Week"),
        info(Metric::RsiVolatilityAdj, Risk, "RSI / (Volatility Month + 0.1)"),
        info(
            Metric::MaConvergence,
            Risk,
            "SMA20 / (SMA50 + 0.001), clipped to [0.5, 2]",
        ),
        info(
            Metric::FcfYield,
            Value,
            "1 / (P/FCF + 0.1) if P/FCF > 0 else -0.5, clipped to [-0.5, 0.5]",
        ),
        info(Metric::GpaQuality, Quality, "Gross Margin * ROA"),
        info(
            Metric::PegDebtAdj,
            Value,
            "PEG (50 if not positive) * (Debt/Equity + 1), clipped to [0, 100]",
        ),
        info(
            Metric::NetWorkingCapitalValue,
            Value,
            "Current Ratio / (P/B + 0.1), clipped to [0, 50]",
        ),
        info(
            Metric::InstInsideBuy,
            Flow,
            "Institutional + insider transactions",
        ),
        info(
            Metric::ShortSqueezePotential,
            Flow,
            "Short Float * Relative Volume, clipped to [0, 500]",
        ),
        info(Metric::RiskAdjReturn, Risk, "Perf Year / (Volatility Month + 0.1)"),
        info(
            Metric::SalesGrowthProxy,
            Quality,
            "0.5 Sales 5Y + 0.3 EPS Next Y + 0.2 EPS This Y",
        ),
        info(
            Metric::MarginQuality,
            Quality,
            "0.5 + 0.3 Oper/Gross + 0.2 Profit/Oper",
        ),
        info(
            Metric::EstimatedFwdGp,
            Quality,
            "Gross Margin grown by the growth proxy, scaled by margin quality",
        ),
        DerivedInfo {
            batch_relative: true,
            ..info(
                Metric::GpaScoreInternal,
                Quality,
                "Percentile of GP/A, or of forward GP for growing loss-makers",
            )
        },
    ]
}

/// Get all derived metrics in a specific category.
#[must_use]
pub fn signals_by_category(category: &DerivedCategory) -> Vec<DerivedInfo> {
    available_signals()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a derived metric by column name.
#[must_use]
pub fn get_signal_info(name: &str) -> Option<DerivedInfo> {
    available_signals()
        .into_iter()
        .find(|info| info.metric.column_name() == name)
}
