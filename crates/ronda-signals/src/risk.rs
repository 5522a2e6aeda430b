//! Volatility-adjusted and trend-shape signals.

use ndarray::{Array1, Zip};
use ronda_traits::{DerivedSignal, Metric, MetricColumns};

use crate::{clip, fill_nan};

/// Offset added to monthly volatility before dividing by it.
pub const VOLATILITY_OFFSET: f64 = 0.1;

/// Offset added to the 50-day average before dividing by it.
pub const SMA_OFFSET: f64 = 0.001;

/// `RSI / (Volatility (Month) + 0.1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsiVolatilityAdj;

impl DerivedSignal for RsiVolatilityAdj {
    fn metric(&self) -> Metric {
        Metric::RsiVolatilityAdj
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::Rsi14, Metric::VolatilityMonth]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let rsi = raw.value_or_zero(Metric::Rsi14);
        let vol = raw.value_or_zero(Metric::VolatilityMonth);
        fill_nan(rsi / (vol + VOLATILITY_OFFSET), 0.0)
    }
}

/// `Perf Year / (Volatility (Month) + 0.1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAdjReturn;

impl DerivedSignal for RiskAdjReturn {
    fn metric(&self) -> Metric {
        Metric::RiskAdjReturn
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::PerfYear, Metric::VolatilityMonth]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let year = raw.value_or_zero(Metric::PerfYear);
        let vol = raw.value_or_zero(Metric::VolatilityMonth);
        fill_nan(year / (vol + VOLATILITY_OFFSET), 0.0)
    }
}

/// Ratio of the 20-day to the 50-day moving average, within `[0.5, 2.0]`.
///
/// A non-finite ratio reads as `1.0` (no convergence signal).
#[derive(Debug, Clone, Copy, Default)]
pub struct MaConvergence;

impl DerivedSignal for MaConvergence {
    fn metric(&self) -> Metric {
        Metric::MaConvergence
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::Sma20, Metric::Sma50]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let sma20 = raw.value_or_zero(Metric::Sma20);
        let sma50 = raw.value_or_zero(Metric::Sma50);
        let ratio = Zip::from(&sma20).and(&sma50).map_collect(|&short, &long| {
            let r = short / (long + SMA_OFFSET);
            if r.is_finite() { r } else { 1.0 }
        });
        clip(ratio, 0.5, 2.0)
    }
}
