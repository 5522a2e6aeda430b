//! Typed access to a batch's metric columns.

use ndarray::Array1;
use std::collections::HashMap;

use crate::{Metric, ScreenerBatch};

/// Coerced metric columns keyed by [`Metric`], with explicit presence.
///
/// Columns are coerced once when the map is built. A metric that was not in
/// the batch is absent here; [`MetricColumns::value_or_zero`] reads it as an
/// all-zero column.
#[derive(Debug, Clone, Default)]
pub struct MetricColumns {
    len: usize,
    columns: HashMap<Metric, Array1<f64>>,
}

impl MetricColumns {
    /// An empty map for `len` rows.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            columns: HashMap::new(),
        }
    }

    /// Read every catalogue metric present in `batch`.
    #[must_use]
    pub fn from_batch(batch: &ScreenerBatch) -> Self {
        let columns = Metric::ALL
            .iter()
            .filter_map(|&m| batch.metric(m).map(|values| (m, values)))
            .collect();
        Self {
            len: batch.len(),
            columns,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `metric` was present.
    #[must_use]
    pub fn is_present(&self, metric: Metric) -> bool {
        self.columns.contains_key(&metric)
    }

    /// The column for `metric`, if present.
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<&Array1<f64>> {
        self.columns.get(&metric)
    }

    /// The column for `metric`, or zeros when absent.
    #[must_use]
    pub fn value_or_zero(&self, metric: Metric) -> Array1<f64> {
        self.columns
            .get(&metric)
            .cloned()
            .unwrap_or_else(|| Array1::zeros(self.len))
    }

    /// Insert or replace a column.
    pub fn insert(&mut self, metric: Metric, values: Array1<f64>) {
        self.columns.insert(metric, values);
    }

    /// Metrics present, in catalogue order.
    #[must_use]
    pub fn present(&self) -> Vec<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| self.columns.contains_key(m))
            .collect()
    }
}
