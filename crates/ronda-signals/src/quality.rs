//! Profitability quality signals.
//!
//! `GPA_Score_Internal` is the one batch-level signal in this crate: it
//! ranks `GP_A_Quality` and `Estimated_Fwd_GP` across every row it is given,
//! so its value for a row depends on the rest of the batch.

use ndarray::{Array1, Zip};
use ronda_traits::stats::percentile_rank_array;
use ronda_traits::{DerivedSignal, Direction, Metric, MetricColumns};

use crate::value::FcfYield;

/// EPS growth next year (percent) above which a loss-maker is judged on
/// forward gross profit.
pub const FORWARD_EPS_GROWTH_THRESHOLD: f64 = 15.0;

/// FCF yield above which a loss-maker is judged on forward gross profit.
pub const FORWARD_FCF_YIELD_FLOOR: f64 = -0.15;

/// `Gross Margin * Return on Assets`, a gross-profit-over-assets proxy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpaQuality;

impl DerivedSignal for GpaQuality {
    fn metric(&self) -> Metric {
        Metric::GpaQuality
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::GrossMargin, Metric::ReturnOnAssets]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        raw.value_or_zero(Metric::GrossMargin) * raw.value_or_zero(Metric::ReturnOnAssets)
    }
}

/// Blend of historical sales growth and expected EPS growth.
///
/// `Sales5Y * 0.5 + EPSNextY * 0.3 + EPSThisY * 0.2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesGrowthProxy;

impl DerivedSignal for SalesGrowthProxy {
    fn metric(&self) -> Metric {
        Metric::SalesGrowthProxy
    }

    fn inputs(&self) -> &[Metric] {
        &[
            Metric::SalesGrowthPast5Years,
            Metric::EpsGrowthNextYear,
            Metric::EpsGrowthThisYear,
        ]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        raw.value_or_zero(Metric::SalesGrowthPast5Years) * 0.5
            + raw.value_or_zero(Metric::EpsGrowthNextYear) * 0.3
            + raw.value_or_zero(Metric::EpsGrowthThisYear) * 0.2
    }
}

/// How much of gross margin survives to operating and net profit.
///
/// `0.5 + 0.3 * Oper/(Gross + 0.01) + 0.2 * Profit/(Oper + 0.01)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarginQuality;

impl DerivedSignal for MarginQuality {
    fn metric(&self) -> Metric {
        Metric::MarginQuality
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::GrossMargin, Metric::OperMargin, Metric::ProfitMargin]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let gross = raw.value_or_zero(Metric::GrossMargin);
        let oper = raw.value_or_zero(Metric::OperMargin);
        let profit = raw.value_or_zero(Metric::ProfitMargin);
        Zip::from(&gross)
            .and(&oper)
            .and(&profit)
            .map_collect(|&g, &o, &p| 0.5 + 0.3 * (o / (g + 0.01)) + 0.2 * (p / (o + 0.01)))
    }
}

/// Gross margin grown by the growth proxy and scaled by margin quality.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedFwdGp;

impl DerivedSignal for EstimatedFwdGp {
    fn metric(&self) -> Metric {
        Metric::EstimatedFwdGp
    }

    fn inputs(&self) -> &[Metric] {
        &[
            Metric::GrossMargin,
            Metric::OperMargin,
            Metric::ProfitMargin,
            Metric::SalesGrowthPast5Years,
            Metric::EpsGrowthNextYear,
            Metric::EpsGrowthThisYear,
        ]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let gross = raw.value_or_zero(Metric::GrossMargin);
        let growth = SalesGrowthProxy.compute(raw);
        let margin = MarginQuality.compute(raw);
        Zip::from(&gross)
            .and(&growth)
            .and(&margin)
            .map_collect(|&g, &s, &m| g * (1.0 + s / 100.0) * m)
    }
}

/// Batch percentile of GP/A, switching to forward gross profit for
/// loss-makers with strong expected growth and tolerable cash burn.
///
/// A row uses the rank of `Estimated_Fwd_GP` iff `GP_A_Quality <= 0`,
/// `EPS Growth Next Year > 15` and `FCF_Yield > -0.15`; otherwise it uses
/// the rank of `GP_A_Quality`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpaScoreInternal;

impl DerivedSignal for GpaScoreInternal {
    fn metric(&self) -> Metric {
        Metric::GpaScoreInternal
    }

    fn inputs(&self) -> &[Metric] {
        &[
            Metric::GrossMargin,
            Metric::ReturnOnAssets,
            Metric::OperMargin,
            Metric::ProfitMargin,
            Metric::SalesGrowthPast5Years,
            Metric::EpsGrowthNextYear,
            Metric::EpsGrowthThisYear,
            Metric::PFreeCashFlow,
        ]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let gpa = GpaQuality.compute(raw);
        let forward = EstimatedFwdGp.compute(raw);
        let fcf = FcfYield.compute(raw);
        let eps_next = raw.value_or_zero(Metric::EpsGrowthNextYear);

        let ga_rank = percentile_rank_array(&gpa, Direction::HigherIsBetter);
        let fwd_rank = percentile_rank_array(&forward, Direction::HigherIsBetter);

        let mut score = ga_rank;
        Zip::from(&mut score)
            .and(&fwd_rank)
            .and(&gpa)
            .and(&eps_next)
            .and(&fcf)
            .for_each(|s, &fwd, &g, &eps, &fcf| {
                if uses_forward_rank(g, eps, fcf) {
                    *s = fwd;
                }
            });
        score
    }
}

/// Whether a row is scored on forward rather than historical quality.
#[must_use]
pub fn uses_forward_rank(gpa: f64, eps_next_year: f64, fcf_yield: f64) -> bool {
    gpa <= 0.0 && eps_next_year > FORWARD_EPS_GROWTH_THRESHOLD && fcf_yield > FORWARD_FCF_YIELD_FLOOR
}
