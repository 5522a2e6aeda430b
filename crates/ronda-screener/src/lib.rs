//! Screener view loading for Ronda.
//!
//! A screener export is split into views (overview, valuation, financial,
//! ownership, performance, technical) that share a `Ticker` column. This
//! crate fetches the views with a small bounded worker pool, joins them
//! into one table, renames the raw headers to the names the engine reads
//! and applies sector, industry and country filters.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_screener::{CsvViewSource, FetchConfig, ScreenFilter, load_batch};
//! use ronda_traits::Sector;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = CsvViewSource::new("data/screener");
//!     let filter = ScreenFilter::new().with_sectors([Sector::Technology]);
//!
//!     if let Some(batch) = load_batch(&source, &FetchConfig::default(), &filter).await? {
//!         println!("{} rows", batch.len());
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod fetch;
mod filter;
mod merge;
mod sectors;
mod source;

pub use error::ScreenerError;
pub use fetch::{FetchConfig, fetch_views};
pub use filter::ScreenFilter;
pub use merge::{COLUMN_RENAMES, merge_views, rename_columns};
pub use sectors::{industries_for, sector_industries, sectors_of};
pub use source::{CsvViewSource, ScreenerView, ViewSource, read_text_csv};

use ronda_traits::ScreenerBatch;
use tracing::info;

/// Result type for screener operations.
pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Fetch every view, merge, rename and filter into one batch.
///
/// Returns `None` when no view produced rows.
///
/// # Errors
///
/// Propagates merge and filter failures. Individual view failures are
/// logged and skipped.
pub async fn load_batch<S>(
    source: &S,
    config: &FetchConfig,
    filter: &ScreenFilter,
) -> Result<Option<ScreenerBatch>>
where
    S: ViewSource,
{
    let frames = fetch_views(source, &ScreenerView::ALL, config).await;
    let fetched = frames.iter().filter(|f| f.is_some()).count();

    let Some(merged) = merge_views(frames)? else {
        info!(views = ScreenerView::ALL.len(), "no screener view returned data");
        return Ok(None);
    };

    let filtered = filter.apply(rename_columns(merged)?)?;
    info!(views = fetched, rows = filtered.height(), "loaded screener batch");
    Ok(Some(ScreenerBatch::new(filtered)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_traits::Sector;
    use std::fs;

    fn write_views(dir: &std::path::Path) {
        fs::write(
            dir.join("overview.csv"),
            "Ticker,Company,Sector,Industry,Country,Market Cap\n\
             AAA,Alpha,Technology,Semiconductors,USA,1200000000\n\
             BBB,Beta,Energy,Uranium,Canada,350000000\n\
             CCC,Gamma,Technology,Solar,China,98000000\n",
        )
        .unwrap();
        fs::write(
            dir.join("performance.csv"),
            "Ticker,Perf Year,Perf Half,Perf Month\nAAA,25%,10%,2%\nBBB,-,5%,1%\nCCC,-12%,-8%,-1%\n",
        )
        .unwrap();
        fs::write(dir.join("valuation.csv"), "Ticker,P/E,P/FCF\nAAA,30,25\nBBB,8,-\n").unwrap();
    }

    #[tokio::test]
    async fn test_load_batch_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        write_views(dir.path());
        let source = CsvViewSource::new(dir.path());
        let filter = ScreenFilter::new().excluding_countries(["China"]);

        let batch = load_batch(&source, &FetchConfig::immediate(2), &filter)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(batch.len(), 2);
        assert!(batch.has_column("Performance (Year)"));
        assert!(batch.has_column("P/Free Cash Flow"));
        assert!(!batch.has_column("Perf Year"));
        batch.require_identity().unwrap();
    }

    #[tokio::test]
    async fn test_load_batch_with_sector_filter() {
        let dir = tempfile::tempdir().unwrap();
        write_views(dir.path());
        let source = CsvViewSource::new(dir.path());
        let filter = ScreenFilter::new().with_sectors([Sector::Technology]);

        let batch = load_batch(&source, &FetchConfig::immediate(2), &filter)
            .await
            .unwrap()
            .unwrap();
        let mut tickers = batch.text_column("Ticker").unwrap();
        tickers.sort();
        assert_eq!(tickers, vec!["AAA", "CCC"]);
    }

    #[tokio::test]
    async fn test_load_batch_without_views() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvViewSource::new(dir.path());
        let loaded = load_batch(&source, &FetchConfig::immediate(2), &ScreenFilter::new())
            .await
            .unwrap();
        assert!(loaded.is_none());
    }
}
