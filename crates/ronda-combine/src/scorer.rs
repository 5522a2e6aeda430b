//! Composite scoring of an enriched batch.
//!
//! Rows are scored against the peers they are compared with: the whole batch
//! in custom mode, or the rows of the same sector in sector-auto mode. Rows
//! whose sector has no weight table are pooled and scored on the fallback
//! composite among themselves.

use ndarray::Array1;
use polars::prelude::*;
use ronda_traits::{MetricColumns, Result, SECTOR, ScreenerBatch, Sector, TOTAL_SCORE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combiner::{Combiner, SignalScore};
use crate::policy::{WeightPolicy, select_policy};
use crate::rank_weight::WeightedRankCombiner;

/// Which weights apply, chosen once per scoring call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Per-sector tables, fallback composite for unmapped sectors.
    #[default]
    SectorAuto,
    /// One policy for every row, ranked across the whole batch.
    ///
    /// An empty policy scores the same as [`ScoringMode::SectorAuto`].
    Custom(WeightPolicy),
}

impl ScoringMode {
    /// The custom policy in effect, if any.
    #[must_use]
    pub fn custom_policy(&self) -> Option<&WeightPolicy> {
        match self {
            Self::Custom(policy) if !policy.is_empty() => Some(policy),
            _ => None,
        }
    }
}

/// Scores batches with a [`Combiner`] under a [`ScoringMode`].
#[derive(Debug, Clone, Default)]
pub struct Scorer<C = WeightedRankCombiner> {
    combiner: C,
}

impl<C: Combiner> Scorer<C> {
    /// Create a scorer using `combiner` for each comparison subset.
    pub const fn new(combiner: C) -> Self {
        Self { combiner }
    }

    /// Attach `Total_Score` to an enriched batch and sort it descending.
    ///
    /// The sort is stable, so tied rows keep their input order. An empty
    /// batch is returned unchanged. Weighted metrics missing from the batch
    /// contribute nothing.
    ///
    /// # Errors
    ///
    /// Fails if a non-empty batch lacks `Ticker` or `Sector`.
    pub fn score(&self, batch: &ScreenerBatch, mode: &ScoringMode) -> Result<ScreenerBatch> {
        if batch.is_empty() {
            return Ok(batch.clone());
        }
        batch.require_identity()?;

        let columns = MetricColumns::from_batch(batch);
        let mut total = Array1::<f64>::zeros(batch.len());

        if let Some(policy) = mode.custom_policy() {
            let rows: Vec<usize> = (0..batch.len()).collect();
            self.score_subset(&columns, &rows, policy, &mut total)?;
            debug!(rows = rows.len(), metrics = policy.len(), "scored custom strategy");
        } else {
            let sectors = batch.text_column(SECTOR)?;
            let parsed: Vec<Option<Sector>> =
                sectors.iter().map(|cell| Sector::from_name(cell)).collect();

            // unmapped rows form one last group
            for group in Sector::ALL.into_iter().map(Some).chain([None]) {
                let rows = rows_where(&parsed, |s| s == group);
                let Some(&first) = rows.first() else {
                    continue;
                };
                let policy = select_policy(&sectors[first]);
                self.score_subset(&columns, &rows, &policy, &mut total)?;
                match group {
                    Some(sector) => debug!(%sector, rows = rows.len(), "scored sector"),
                    None => debug!(rows = rows.len(), "scored unmapped sectors"),
                }
            }
        }

        let scored = batch.with_columns([(TOTAL_SCORE, total)])?;
        let sorted = scored.data().sort(
            [TOTAL_SCORE],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )?;
        Ok(ScreenerBatch::new(sorted))
    }

    /// Add `policy`'s weighted ranks over `rows` into `total`.
    fn score_subset(
        &self,
        columns: &MetricColumns,
        rows: &[usize],
        policy: &WeightPolicy,
        total: &mut Array1<f64>,
    ) -> Result<()> {
        let signals: Vec<SignalScore> = policy
            .iter()
            .filter_map(|(metric, weight)| {
                columns.get(metric).map(|values| {
                    let subset: Array1<f64> = rows.iter().map(|&i| values[i]).collect();
                    SignalScore::new(metric, weight, subset)
                })
            })
            .collect();

        if signals.is_empty() {
            return Ok(());
        }

        let scores = self.combiner.combine(&signals)?;
        for (&row, score) in rows.iter().zip(scores) {
            total[row] += score;
        }
        Ok(())
    }
}

fn rows_where(parsed: &[Option<Sector>], pred: impl Fn(Option<Sector>) -> bool) -> Vec<usize> {
    parsed
        .iter()
        .enumerate()
        .filter(|&(_, &s)| pred(s))
        .map(|(i, _)| i)
        .collect()
}

/// Score `batch` under `mode` with the default weighted rank combiner.
///
/// # Errors
///
/// Fails if a non-empty batch lacks `Ticker` or `Sector`.
pub fn score(batch: &ScreenerBatch, mode: &ScoringMode) -> Result<ScreenerBatch> {
    Scorer::<WeightedRankCombiner>::default().score(batch, mode)
}
