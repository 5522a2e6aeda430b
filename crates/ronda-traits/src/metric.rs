//! The closed catalogue of metrics the engine knows about.
//!
//! Every column the engine reads or writes is named by a [`Metric`]. The
//! column name is the post-rename screener header (see the rename map in
//! `ronda-screener`), or the derived column name for engine-computed
//! metrics. Each metric carries its ranking [`Direction`].

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::RondaError;

/// Which end of a metric's distribution is favourable.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Larger values rank higher (momentum, margins, yields).
    HigherIsBetter,
    /// Smaller values rank higher (valuation multiples, volatility, leverage).
    LowerIsBetter,
}

/// A raw screener metric or an engine-derived metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Metric {
    // Performance
    /// `Performance (Week)`
    PerfWeek,
    /// `Performance (Month)`
    PerfMonth,
    /// `Performance (Quarter)`
    PerfQuarter,
    /// `Performance (Half Year)`
    PerfHalfYear,
    /// `Performance (Year)`
    PerfYear,
    /// `Performance (YTD)`
    PerfYtd,

    // Technicals
    /// `Relative Strength Index (14)`
    Rsi14,
    /// `Volatility (Week)`
    VolatilityWeek,
    /// `Volatility (Month)`
    VolatilityMonth,
    /// `Average True Range`
    AverageTrueRange,
    /// `Beta`
    Beta,
    /// `20-Day Simple Moving Average`
    Sma20,
    /// `50-Day Simple Moving Average`
    Sma50,
    /// `200-Day Simple Moving Average`
    Sma200,
    /// `Relative Volume`
    RelativeVolume,

    // Valuation
    /// `P/E`
    Pe,
    /// `Forward P/E`
    ForwardPe,
    /// `PEG`
    Peg,
    /// `P/S`
    Ps,
    /// `P/B`
    Pb,
    /// `P/Cash`
    PCash,
    /// `P/Free Cash Flow`
    PFreeCashFlow,
    /// `Dividend Yield`
    DividendYield,

    // Growth
    /// `EPS Growth This Year`
    EpsGrowthThisYear,
    /// `EPS Growth Next Year`
    EpsGrowthNextYear,
    /// `EPS Growth Next 5 Years`
    EpsGrowthNext5Years,
    /// `Sales Growth Past 5 Years`
    SalesGrowthPast5Years,

    // Profitability
    /// `Return on Assets`
    ReturnOnAssets,
    /// `Return on Equity`
    ReturnOnEquity,
    /// `Return on Invested Capital`
    ReturnOnInvestedCapital,
    /// `ROE`, the short screener header offered in custom strategies
    Roe,
    /// `ROA`, the short screener header offered in custom strategies
    Roa,
    /// `ROI`, the short screener header offered in custom strategies
    Roi,
    /// `Gross Margin`
    GrossMargin,
    /// `Oper Margin`
    OperMargin,
    /// `Operating Margin`
    OperatingMargin,
    /// `Profit Margin`
    ProfitMargin,

    // Balance sheet
    /// `Debt/Equity`
    DebtEquity,
    /// `Total Debt/Equity`
    TotalDebtEquity,
    /// `LT Debt/Equity`
    LtDebtEquity,
    /// `Current Ratio`
    CurrentRatio,

    // Ownership and short interest
    /// `Institutional Transactions`
    InstitutionalTransactions,
    /// `Insider Transactions`
    InsiderTransactions,
    /// `Short Float`
    ShortFloat,
    /// `Short Ratio`
    ShortRatio,

    // Derived
    /// `Momentum_Custom`
    MomentumCustom,
    /// `Momentum_12M_1M`
    Momentum12M1M,
    /// `Momentum_6M_1M`
    Momentum6M1M,
    /// `Short_Term_Accel`
    ShortTermAccel,
    /// `RSI_Volatility_Adj`
    RsiVolatilityAdj,
    /// `MA_Convergence`
    MaConvergence,
    /// `FCF_Yield`
    FcfYield,
    /// `GP_A_Quality`
    GpaQuality,
    /// `PEG_Debt_Adj`
    PegDebtAdj,
    /// `Net_Working_Capital_Value`
    NetWorkingCapitalValue,
    /// `Inst_Inside_Buy`
    InstInsideBuy,
    /// `Short_Squeeze_Potential`
    ShortSqueezePotential,
    /// `Risk_Adj_Return`
    RiskAdjReturn,
    /// `Sales_Growth_Proxy`
    SalesGrowthProxy,
    /// `Margin_Quality`
    MarginQuality,
    /// `Estimated_Fwd_GP`
    EstimatedFwdGp,
    /// `GPA_Score_Internal`
    GpaScoreInternal,
}

impl Metric {
    /// Every metric in the catalogue.
    pub const ALL: &'static [Self] = &[
        Self::PerfWeek,
        Self::PerfMonth,
        Self::PerfQuarter,
        Self::PerfHalfYear,
        Self::PerfYear,
        Self::PerfYtd,
        Self::Rsi14,
        Self::VolatilityWeek,
        Self::VolatilityMonth,
        Self::AverageTrueRange,
        Self::Beta,
        Self::Sma20,
        Self::Sma50,
        Self::Sma200,
        Self::RelativeVolume,
        Self::Pe,
        Self::ForwardPe,
        Self::Peg,
        Self::Ps,
        Self::Pb,
        Self::PCash,
        Self::PFreeCashFlow,
        Self::DividendYield,
        Self::EpsGrowthThisYear,
        Self::EpsGrowthNextYear,
        Self::EpsGrowthNext5Years,
        Self::SalesGrowthPast5Years,
        Self::ReturnOnAssets,
        Self::ReturnOnEquity,
        Self::ReturnOnInvestedCapital,
        Self::Roe,
        Self::Roa,
        Self::Roi,
        Self::GrossMargin,
        Self::OperMargin,
        Self::OperatingMargin,
        Self::ProfitMargin,
        Self::DebtEquity,
        Self::TotalDebtEquity,
        Self::LtDebtEquity,
        Self::CurrentRatio,
        Self::InstitutionalTransactions,
        Self::InsiderTransactions,
        Self::ShortFloat,
        Self::ShortRatio,
        Self::MomentumCustom,
        Self::Momentum12M1M,
        Self::Momentum6M1M,
        Self::ShortTermAccel,
        Self::RsiVolatilityAdj,
        Self::MaConvergence,
        Self::FcfYield,
        Self::GpaQuality,
        Self::PegDebtAdj,
        Self::NetWorkingCapitalValue,
        Self::InstInsideBuy,
        Self::ShortSqueezePotential,
        Self::RiskAdjReturn,
        Self::SalesGrowthProxy,
        Self::MarginQuality,
        Self::EstimatedFwdGp,
        Self::GpaScoreInternal,
    ];

    /// Screener metrics offered for custom strategies alongside the derived ones.
    const BASIC_STRATEGY: &'static [Self] = &[
        Self::Pe,
        Self::ForwardPe,
        Self::Peg,
        Self::Ps,
        Self::Pb,
        Self::PCash,
        Self::PFreeCashFlow,
        Self::DividendYield,
        Self::EpsGrowthNextYear,
        Self::Roe,
        Self::Roa,
        Self::Roi,
        Self::GrossMargin,
        Self::OperatingMargin,
        Self::ProfitMargin,
        Self::DebtEquity,
        Self::CurrentRatio,
        Self::Rsi14,
        Self::VolatilityMonth,
        Self::ShortFloat,
    ];

    /// Derived metrics offered for custom strategies.
    ///
    /// `Margin_Quality` and `Estimated_Fwd_GP` are intermediate columns and
    /// are not offered here, though a policy may still weight them.
    const ADVANCED_STRATEGY: &'static [Self] = &[
        Self::MomentumCustom,
        Self::Momentum12M1M,
        Self::Momentum6M1M,
        Self::RsiVolatilityAdj,
        Self::ShortTermAccel,
        Self::MaConvergence,
        Self::FcfYield,
        Self::GpaQuality,
        Self::GpaScoreInternal,
        Self::PegDebtAdj,
        Self::NetWorkingCapitalValue,
        Self::InstInsideBuy,
        Self::ShortSqueezePotential,
        Self::RiskAdjReturn,
        Self::SalesGrowthProxy,
    ];

    /// Column name of this metric in a batch.
    #[must_use]
    pub const fn column_name(&self) -> &'static str {
        match self {
            Self::PerfWeek => "Performance (Week)",
            Self::PerfMonth => "Performance (Month)",
            Self::PerfQuarter => "Performance (Quarter)",
            Self::PerfHalfYear => "Performance (Half Year)",
            Self::PerfYear => "Performance (Year)",
            Self::PerfYtd => "Performance (YTD)",
            Self::Rsi14 => "Relative Strength Index (14)",
            Self::VolatilityWeek => "Volatility (Week)",
            Self::VolatilityMonth => "Volatility (Month)",
            Self::AverageTrueRange => "Average True Range",
            Self::Beta => "Beta",
            Self::Sma20 => "20-Day Simple Moving Average",
            Self::Sma50 => "50-Day Simple Moving Average",
            Self::Sma200 => "200-Day Simple Moving Average",
            Self::RelativeVolume => "Relative Volume",
            Self::Pe => "P/E",
            Self::ForwardPe => "Forward P/E",
            Self::Peg => "PEG",
            Self::Ps => "P/S",
            Self::Pb => "P/B",
            Self::PCash => "P/Cash",
            Self::PFreeCashFlow => "P/Free Cash Flow",
            Self::DividendYield => "Dividend Yield",
            Self::EpsGrowthThisYear => "EPS Growth This Year",
            Self::EpsGrowthNextYear => "EPS Growth Next Year",
            Self::EpsGrowthNext5Years => "EPS Growth Next 5 Years",
            Self::SalesGrowthPast5Years => "Sales Growth Past 5 Years",
            Self::ReturnOnAssets => "Return on Assets",
            Self::ReturnOnEquity => "Return on Equity",
            Self::ReturnOnInvestedCapital => "Return on Invested Capital",
            Self::Roe => "ROE",
            Self::Roa => "ROA",
            Self::Roi => "ROI",
            Self::GrossMargin => "Gross Margin",
            Self::OperMargin => "Oper Margin",
            Self::OperatingMargin => "Operating Margin",
            Self::ProfitMargin => "Profit Margin",
            Self::DebtEquity => "Debt/Equity",
            Self::TotalDebtEquity => "Total Debt/Equity",
            Self::LtDebtEquity => "LT Debt/Equity",
            Self::CurrentRatio => "Current Ratio",
            Self::InstitutionalTransactions => "Institutional Transactions",
            Self::InsiderTransactions => "Insider Transactions",
            Self::ShortFloat => "Short Float",
            Self::ShortRatio => "Short Ratio",
            Self::MomentumCustom => "Momentum_Custom",
            Self::Momentum12M1M => "Momentum_12M_1M",
            Self::Momentum6M1M => "Momentum_6M_1M",
            Self::ShortTermAccel => "Short_Term_Accel",
            Self::RsiVolatilityAdj => "RSI_Volatility_Adj",
            Self::MaConvergence => "MA_Convergence",
            Self::FcfYield => "FCF_Yield",
            Self::GpaQuality => "GP_A_Quality",
            Self::PegDebtAdj => "PEG_Debt_Adj",
            Self::NetWorkingCapitalValue => "Net_Working_Capital_Value",
            Self::InstInsideBuy => "Inst_Inside_Buy",
            Self::ShortSqueezePotential => "Short_Squeeze_Potential",
            Self::RiskAdjReturn => "Risk_Adj_Return",
            Self::SalesGrowthProxy => "Sales_Growth_Proxy",
            Self::MarginQuality => "Margin_Quality",
            Self::EstimatedFwdGp => "Estimated_Fwd_GP",
            Self::GpaScoreInternal => "GPA_Score_Internal",
        }
    }

    /// Look up a metric by its column name. Matching is exact.
    #[must_use]
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.column_name() == name)
    }

    /// Ranking direction of this metric.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::Pe
            | Self::ForwardPe
            | Self::Peg
            | Self::Ps
            | Self::Pb
            | Self::PCash
            | Self::PFreeCashFlow
            | Self::LtDebtEquity
            | Self::TotalDebtEquity
            | Self::ShortFloat
            | Self::ShortRatio
            | Self::VolatilityMonth
            | Self::VolatilityWeek
            | Self::AverageTrueRange
            | Self::Beta
            | Self::Rsi14
            | Self::PegDebtAdj
            | Self::DebtEquity => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }

    /// Whether smaller values of this metric rank higher.
    #[must_use]
    pub const fn is_low_better(&self) -> bool {
        matches!(self.direction(), Direction::LowerIsBetter)
    }

    /// Whether this metric is computed by the engine rather than supplied.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(
            self,
            Self::MomentumCustom
                | Self::Momentum12M1M
                | Self::Momentum6M1M
                | Self::ShortTermAccel
                | Self::RsiVolatilityAdj
                | Self::MaConvergence
                | Self::FcfYield
                | Self::GpaQuality
                | Self::PegDebtAdj
                | Self::NetWorkingCapitalValue
                | Self::InstInsideBuy
                | Self::ShortSqueezePotential
                | Self::RiskAdjReturn
                | Self::SalesGrowthProxy
                | Self::MarginQuality
                | Self::EstimatedFwdGp
                | Self::GpaScoreInternal
        )
    }

    /// Metrics offered for custom strategies, sorted by column name.
    #[must_use]
    pub fn strategy_metrics() -> Vec<Self> {
        let mut metrics: Vec<Self> = Self::BASIC_STRATEGY
            .iter()
            .chain(Self::ADVANCED_STRATEGY)
            .copied()
            .collect();
        metrics.sort_by_key(|m| m.column_name());
        metrics
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Metric {
    type Err = RondaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_column_name(s.trim()).ok_or_else(|| RondaError::UnknownMetric(s.to_string()))
    }
}

impl TryFrom<String> for Metric {
    type Error = RondaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Metric> for &'static str {
    fn from(metric: Metric) -> Self {
        metric.column_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_column_names_unique() {
        let names: HashSet<_> = Metric::ALL.iter().map(|m| m.column_name()).collect();
        assert_eq!(names.len(), Metric::ALL.len());
    }

    #[test]
    fn test_round_trip_by_name() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_column_name(metric.column_name()), Some(*metric));
        }
        assert_eq!(Metric::from_column_name("p/e"), None);
    }

    #[test]
    fn test_low_better_set() {
        let low: Vec<_> = Metric::ALL.iter().filter(|m| m.is_low_better()).collect();
        assert_eq!(low.len(), 18);
        assert!(Metric::PegDebtAdj.is_low_better());
        assert!(Metric::Rsi14.is_low_better());
        assert!(!Metric::FcfYield.is_low_better());
        assert!(!Metric::DividendYield.is_low_better());
    }

    #[test]
    fn test_derived_count() {
        assert_eq!(Metric::ALL.iter().filter(|m| m.is_derived()).count(), 17);
    }

    #[test]
    fn test_strategy_metrics_sorted() {
        let metrics = Metric::strategy_metrics();
        assert_eq!(metrics.len(), 35);
        let names: Vec<_> = metrics.iter().map(|m| m.column_name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(!metrics.contains(&Metric::MarginQuality));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "Not A Metric".parse::<Metric>(),
            Err(RondaError::UnknownMetric(_))
        ));
        assert_eq!(" P/B ".parse::<Metric>().unwrap(), Metric::Pb);
    }

    #[test]
    fn test_display_and_into_str() {
        assert_eq!(Metric::FcfYield.to_string(), "FCF_Yield");
        let name: &'static str = Metric::TotalDebtEquity.into();
        assert_eq!(name, "Total Debt/Equity");
        assert_eq!(Direction::LowerIsBetter.to_string(), "LowerIsBetter");
    }
}
