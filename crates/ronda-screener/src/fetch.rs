//! Bounded, jittered fetching of screener views.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use polars::prelude::DataFrame;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::source::{ScreenerView, ViewSource};

/// Configuration for fetching views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum requests in flight (default: 2)
    pub max_workers: usize,

    /// Lower bound of the per-request delay in milliseconds (default: 500)
    pub min_delay_ms: u64,

    /// Upper bound of the per-request delay in milliseconds (default: 1500)
    pub max_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_workers: 2,
            min_delay_ms: 500,
            max_delay_ms: 1500,
        }
    }
}

impl FetchConfig {
    /// A configuration with no delay between requests.
    pub const fn immediate(max_workers: usize) -> Self {
        Self {
            max_workers,
            min_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    /// Draw one request delay, uniform in the configured range.
    pub fn jitter(&self) -> Duration {
        let low = self.min_delay_ms.min(self.max_delay_ms);
        let high = self.min_delay_ms.max(self.max_delay_ms);
        if high == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(low..=high))
    }
}

/// Fetch `views` from `source`, at most `max_workers` at a time.
///
/// Results arrive in completion order. A view that fails is logged and
/// contributes `None`, so one bad view never aborts the others.
pub async fn fetch_views<S>(
    source: &S,
    views: &[ScreenerView],
    config: &FetchConfig,
) -> Vec<Option<DataFrame>>
where
    S: ViewSource,
{
    let workers = config.max_workers.max(1);

    stream::iter(views.iter().copied())
        .map(|view| async move {
            let delay = config.jitter();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match source.fetch_view(view).await {
                Ok(df) => {
                    debug!(%view, rows = df.height(), "fetched screener view");
                    Some(df)
                }
                Err(e) => {
                    warn!(%view, error = %e, "failed to fetch screener view");
                    None
                }
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await
}
