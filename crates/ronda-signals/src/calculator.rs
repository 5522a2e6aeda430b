//! Batch enrichment with every derived metric.

use ronda_traits::{DerivedSignal, MetricColumns, Result, ScreenerBatch};
use tracing::debug;

use crate::flow::{InstInsideBuy, ShortSqueezePotential};
use crate::momentum::{Momentum6M1M, Momentum12M1M, MomentumCustom, ShortTermAccel};
use crate::quality::{EstimatedFwdGp, GpaQuality, GpaScoreInternal, MarginQuality, SalesGrowthProxy};
use crate::risk::{MaConvergence, RiskAdjReturn, RsiVolatilityAdj};
use crate::value::{FcfYield, NetWorkingCapitalValue, PegDebtAdj};

/// Every derived signal, in the order their columns are written.
#[must_use]
pub fn derived_signals() -> Vec<Box<dyn DerivedSignal>> {
    vec![
        Box::new(MomentumCustom),
        Box::new(Momentum12M1M),
        Box::new(Momentum6M1M),
        Box::new(ShortTermAccel),
        Box::new(RsiVolatilityAdj),
        Box::new(MaConvergence),
        Box::new(FcfYield),
        Box::new(GpaQuality),
        Box::new(PegDebtAdj),
        Box::new(NetWorkingCapitalValue),
        Box::new(InstInsideBuy),
        Box::new(ShortSqueezePotential),
        Box::new(RiskAdjReturn),
        Box::new(SalesGrowthProxy),
        Box::new(MarginQuality),
        Box::new(EstimatedFwdGp),
        Box::new(GpaScoreInternal),
    ]
}

/// Compute all derived metrics on `batch`, returning a new batch.
///
/// Derived columns are read from raw inputs only and replace any existing
/// column of the same name, so enriching twice gives the same result. An
/// empty batch is returned unchanged.
pub fn enrich(batch: &ScreenerBatch) -> Result<ScreenerBatch> {
    if batch.is_empty() {
        return Ok(batch.clone());
    }

    let raw = MetricColumns::from_batch(batch);
    let signals = derived_signals();
    let columns: Vec<_> = signals
        .iter()
        .map(|signal| (signal.name(), signal.compute(&raw)))
        .collect();

    debug!(
        rows = batch.len(),
        derived = columns.len(),
        present = raw.present().len(),
        "enriched batch"
    );
    batch.with_columns(columns)
}
