//! Valuation signals: cash flow yield, leverage-adjusted PEG and working
//! capital against book.

use ndarray::{Array1, Zip};
use ronda_traits::{DerivedSignal, Metric, MetricColumns};

use crate::clip;

/// Value assigned to FCF yield when price/FCF is not positive.
pub const NEGATIVE_FCF_YIELD: f64 = -0.5;

/// PEG used for companies with a non-positive PEG (loss-making).
pub const LOSS_MAKER_PEG: f64 = 50.0;

/// Inverse price to free cash flow, within `[-0.5, 0.5]`.
///
/// `1 / (P/FCF + 0.1)` when P/FCF is positive, otherwise `-0.5`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FcfYield;

impl DerivedSignal for FcfYield {
    fn metric(&self) -> Metric {
        Metric::FcfYield
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::PFreeCashFlow]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let yields = raw.value_or_zero(Metric::PFreeCashFlow).mapv(|p_fcf| {
            if p_fcf > 0.0 {
                1.0 / (p_fcf + 0.1)
            } else {
                NEGATIVE_FCF_YIELD
            }
        });
        clip(yields, -0.5, 0.5)
    }
}

/// PEG scaled by leverage, within `[0, 100]`. Lower is better.
///
/// `(PEG > 0 ? PEG : 50) * (Total Debt/Equity + 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PegDebtAdj;

impl DerivedSignal for PegDebtAdj {
    fn metric(&self) -> Metric {
        Metric::PegDebtAdj
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::Peg, Metric::TotalDebtEquity]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let peg = raw.value_or_zero(Metric::Peg);
        let debt = raw.value_or_zero(Metric::TotalDebtEquity);
        let adjusted = Zip::from(&peg).and(&debt).map_collect(|&peg, &debt| {
            let peg = if peg > 0.0 { peg } else { LOSS_MAKER_PEG };
            peg * (debt + 1.0)
        });
        clip(adjusted, 0.0, 100.0)
    }
}

/// `Current Ratio / (P/B + 0.1)`, within `[0, 50]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetWorkingCapitalValue;

impl DerivedSignal for NetWorkingCapitalValue {
    fn metric(&self) -> Metric {
        Metric::NetWorkingCapitalValue
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::CurrentRatio, Metric::Pb]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let current = raw.value_or_zero(Metric::CurrentRatio);
        let pb = raw.value_or_zero(Metric::Pb);
        clip(current / (pb + 0.1), 0.0, 50.0)
    }
}
