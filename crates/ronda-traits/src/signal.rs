//! The derived-metric trait.

use ndarray::Array1;

use crate::{Metric, MetricColumns};

/// A metric computed from raw screener columns by a fixed formula.
///
/// Implementations read only the raw metrics they list in
/// [`DerivedSignal::inputs`], never other derived columns, so recomputing a
/// derived metric on an already enriched batch yields the same values.
/// Missing inputs read as zeros.
///
/// # Example
///
/// ```no_run
/// use ndarray::Array1;
/// use ronda_traits::{DerivedSignal, Metric, MetricColumns};
///
/// struct InstInsideBuy;
///
/// impl DerivedSignal for InstInsideBuy {
///     fn metric(&self) -> Metric {
///         Metric::InstInsideBuy
///     }
///
///     fn inputs(&self) -> &[Metric] {
///         &[Metric::InstitutionalTransactions, Metric::InsiderTransactions]
///     }
///
///     fn compute(&self, raw: &MetricColumns) -> Array1<f64> {
///         raw.value_or_zero(Metric::InstitutionalTransactions)
///             + raw.value_or_zero(Metric::InsiderTransactions)
///     }
/// }
/// ```
pub trait DerivedSignal: Send + Sync {
    /// The metric this signal produces.
    fn metric(&self) -> Metric;

    /// Column name of the produced metric.
    fn name(&self) -> &'static str {
        self.metric().column_name()
    }

    /// Raw metrics this signal reads.
    fn inputs(&self) -> &[Metric];

    /// Compute the metric for every row of `raw`.
    ///
    /// The result has exactly `raw.len()` values.
    fn compute(&self, raw: &MetricColumns) -> Array1<f64>;
}
