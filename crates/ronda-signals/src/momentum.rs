//! Momentum signals built from the screener's performance windows.
//!
//! Performance inputs are percentages as quoted by the screener (`5.2`
//! means 5.2%).

use ndarray::{Array1, Zip};
use ronda_traits::{DerivedSignal, Metric, MetricColumns};

use crate::fill_nan;

/// Yearly return net of the last month, compounded.
///
/// `((1 + P_main/100) / (1 + P_month/100) - 1) * 100`, where `P_main` is
/// the yearly performance, or the half-year performance when the yearly
/// figure is zero. A zero yearly value is taken to mean "not available".
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumCustom;

impl DerivedSignal for MomentumCustom {
    fn metric(&self) -> Metric {
        Metric::MomentumCustom
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::PerfYear, Metric::PerfHalfYear, Metric::PerfMonth]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let year = raw.value_or_zero(Metric::PerfYear);
        let half = raw.value_or_zero(Metric::PerfHalfYear);
        let month = raw.value_or_zero(Metric::PerfMonth);

        let momentum = Zip::from(&year)
            .and(&half)
            .and(&month)
            .map_collect(|&y, &h, &m| {
                let main = main_performance(y, h);
                ((1.0 + main / 100.0) / (1.0 + m / 100.0) - 1.0) * 100.0
            });
        fill_nan(momentum, 0.0)
    }
}

/// Yearly performance, falling back to half-year, then to zero.
fn main_performance(year: f64, half: f64) -> f64 {
    if year != 0.0 && !year.is_nan() {
        year
    } else if half != 0.0 && !half.is_nan() {
        half
    } else {
        0.0
    }
}

/// `Perf Year - Perf Month`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Momentum12M1M;

impl DerivedSignal for Momentum12M1M {
    fn metric(&self) -> Metric {
        Metric::Momentum12M1M
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::PerfYear, Metric::PerfMonth]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        raw.value_or_zero(Metric::PerfYear) - raw.value_or_zero(Metric::PerfMonth)
    }
}

/// `Perf Half - Perf Month`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Momentum6M1M;

impl DerivedSignal for Momentum6M1M {
    fn metric(&self) -> Metric {
        Metric::Momentum6M1M
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::PerfHalfYear, Metric::PerfMonth]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        raw.value_or_zero(Metric::PerfHalfYear) - raw.value_or_zero(Metric::PerfMonth)
    }
}

/// `Perf Month - Perf Week`: whether the move is speeding up.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortTermAccel;

impl DerivedSignal for ShortTermAccel {
    fn metric(&self) -> Metric {
        Metric::ShortTermAccel
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::PerfMonth, Metric::PerfWeek]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        raw.value_or_zero(Metric::PerfMonth) - raw.value_or_zero(Metric::PerfWeek)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn perf(year: &[f64], half: &[f64], month: &[f64], week: &[f64]) -> MetricColumns {
        let mut raw = MetricColumns::new(year.len());
        raw.insert(Metric::PerfYear, Array1::from_vec(year.to_vec()));
        raw.insert(Metric::PerfHalfYear, Array1::from_vec(half.to_vec()));
        raw.insert(Metric::PerfMonth, Array1::from_vec(month.to_vec()));
        raw.insert(Metric::PerfWeek, Array1::from_vec(week.to_vec()));
        raw
    }

    #[test]
    fn test_momentum_custom_uses_year() {
        let raw = perf(&[21.0], &[8.0], &[10.0], &[0.0]);
        let m = MomentumCustom.compute(&raw);
        assert_relative_eq!(m[0], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_momentum_custom_zero_year_falls_back_to_half() {
        let raw = perf(&[0.0, 0.0], &[10.0, 0.0], &[0.0, 5.0], &[0.0, 0.0]);
        let m = MomentumCustom.compute(&raw);
        assert_relative_eq!(m[0], 10.0, epsilon = 1e-9);
        // both windows unavailable: main performance is zero
        assert_relative_eq!(m[1], (1.0 / 1.05 - 1.0) * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_momentum_custom_nan_is_zero() {
        let raw = perf(&[-100.0], &[0.0], &[-100.0], &[0.0]);
        assert_relative_eq!(MomentumCustom.compute(&raw)[0], 0.0);
    }

    #[test]
    fn test_momentum_custom_missing_inputs() {
        let raw = MetricColumns::new(3);
        assert_eq!(MomentumCustom.compute(&raw).to_vec(), vec![0.0; 3]);
    }

    #[test]
    fn test_spreads() {
        let raw = perf(&[30.0], &[12.0], &[4.0], &[1.5]);
        assert_relative_eq!(Momentum12M1M.compute(&raw)[0], 26.0);
        assert_relative_eq!(Momentum6M1M.compute(&raw)[0], 8.0);
        assert_relative_eq!(ShortTermAccel.compute(&raw)[0], 2.5);
    }
}
