//! Ownership flow and short-interest signals.

use ndarray::Array1;
use ronda_traits::{DerivedSignal, Metric, MetricColumns};

use crate::clip;

/// Net institutional plus insider transactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstInsideBuy;

impl DerivedSignal for InstInsideBuy {
    fn metric(&self) -> Metric {
        Metric::InstInsideBuy
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::InstitutionalTransactions, Metric::InsiderTransactions]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        raw.value_or_zero(Metric::InstitutionalTransactions)
            + raw.value_or_zero(Metric::InsiderTransactions)
    }
}

/// `Short Float * Relative Volume`, within `[0, 500]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortSqueezePotential;

impl DerivedSignal for ShortSqueezePotential {
    fn metric(&self) -> Metric {
        Metric::ShortSqueezePotential
    }

    fn inputs(&self) -> &[Metric] {
        &[Metric::ShortFloat, Metric::RelativeVolume]
    }

    fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
        let pressure =
            raw.value_or_zero(Metric::ShortFloat) * raw.value_or_zero(Metric::RelativeVolume);
        clip(pressure, 0.0, 500.0)
    }
}
