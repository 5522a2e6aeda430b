//! The enrich-then-score entry point.

use ronda_combine::{Combiner, Scorer, ScoringMode, WeightedRankCombiner};
use ronda_traits::{Result, ScreenerBatch};
use tracing::debug;

/// Enrich a screener snapshot with the derived metrics and score it.
///
/// The result holds every input row plus the seventeen derived columns and
/// `Total_Score`, sorted by score descending. An empty batch is returned
/// unchanged, and the input is never modified.
///
/// # Errors
///
/// Returns [`ronda_traits::RondaError::MissingColumn`] if a non-empty batch
/// lacks `Ticker` or `Sector`.
pub fn analyze(batch: &ScreenerBatch, mode: &ScoringMode) -> Result<ScreenerBatch> {
    analyze_with(&Scorer::<WeightedRankCombiner>::default(), batch, mode)
}

/// [`analyze`] with a caller-supplied scorer.
///
/// # Errors
///
/// Same as [`analyze`].
pub fn analyze_with<C: Combiner>(
    scorer: &Scorer<C>,
    batch: &ScreenerBatch,
    mode: &ScoringMode,
) -> Result<ScreenerBatch> {
    if batch.is_empty() {
        return Ok(batch.clone());
    }
    batch.require_identity()?;

    let enriched = ronda_signals::enrich(batch)?;
    let scored = scorer.score(&enriched, mode)?;
    debug!(
        rows = scored.len(),
        custom = mode.custom_policy().is_some(),
        "analyzed screener batch"
    );
    Ok(scored)
}
