//! Joining views on `Ticker` and normalizing their headers.

use polars::prelude::*;
use ronda_traits::TICKER;
use tracing::{debug, warn};

use crate::Result;

/// Raw screener headers and the names the engine reads them under.
///
/// Entries that map a header to itself are listed so the table documents
/// every column the engine expects from the export.
pub const COLUMN_RENAMES: [(&str, &str); 36] = [
    ("Perf Year", "Performance (Year)"),
    ("Perf Half", "Performance (Half Year)"),
    ("Perf Month", "Performance (Month)"),
    ("Perf Week", "Performance (Week)"),
    ("Gross M", "Gross Margin"),
    ("ROA", "Return on Assets"),
    ("ROE", "Return on Equity"),
    ("P/FCF", "P/Free Cash Flow"),
    ("Inst Trans", "Institutional Transactions"),
    ("Insider Trans", "Insider Transactions"),
    ("Short Float", "Short Float"),
    ("Rel Volume", "Relative Volume"),
    ("Fwd P/E", "Forward P/E"),
    ("P/B", "P/B"),
    ("P/S", "P/S"),
    ("EPS Next Y", "EPS Growth Next Year"),
    ("EPS This Y", "EPS Growth This Year"),
    ("SMA20", "20-Day Simple Moving Average"),
    ("SMA50", "50-Day Simple Moving Average"),
    ("SMA200", "200-Day Simple Moving Average"),
    ("RSI", "Relative Strength Index (14)"),
    ("Volatility M", "Volatility (Month)"),
    ("Volatility W", "Volatility (Week)"),
    ("Sales Past 5Y", "Sales Growth Past 5 Years"),
    ("Curr R", "Current Ratio"),
    ("Perf YTD", "Performance (YTD)"),
    ("Perf Quart", "Performance (Quarter)"),
    ("PEG", "PEG"),
    ("Oper M", "Oper Margin"),
    ("Profit M", "Profit Margin"),
    ("P/E", "P/E"),
    ("P/C", "P/Cash"),
    ("Dividend", "Dividend Yield"),
    ("Debt/Eq", "Total Debt/Equity"),
    ("52W High", "52W High"),
    ("52W Low", "52W Low"),
];

/// Full outer join of the usable frames on `Ticker`, in the order given.
///
/// `None`, empty frames and frames without a `Ticker` column are skipped.
/// When a column appears in more than one frame the earliest copy wins.
/// Returns `None` if no frame was usable.
///
/// # Errors
///
/// Propagates polars errors from the join.
pub fn merge_views<I>(frames: I) -> Result<Option<DataFrame>>
where
    I: IntoIterator<Item = Option<DataFrame>>,
{
    let mut combined: Option<DataFrame> = None;

    for frame in frames.into_iter().flatten() {
        if frame.height() == 0 {
            continue;
        }
        if frame.column(TICKER).is_err() {
            warn!(columns = frame.width(), "skipping screener view without a Ticker column");
            continue;
        }

        combined = Some(match combined {
            None => frame,
            Some(left) => join_new_columns(left, frame)?,
        });
    }

    if let Some(df) = &combined {
        debug!(rows = df.height(), columns = df.width(), "merged screener views");
    }
    Ok(combined)
}

fn join_new_columns(left: DataFrame, right: DataFrame) -> Result<DataFrame> {
    let keep: Vec<PlSmallStr> = right
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() == TICKER || left.column(name.as_str()).is_err())
        .cloned()
        .collect();
    let right = right.select(keep)?;

    let joined = left
        .lazy()
        .join(
            right.lazy(),
            [col(TICKER)],
            [col(TICKER)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .collect()?;
    Ok(joined)
}

/// Rename raw screener headers with [`COLUMN_RENAMES`].
///
/// A rename is skipped when its source is absent or its target already
/// exists, so an export that already uses the engine's names passes through.
///
/// # Errors
///
/// Propagates polars errors from the rename.
pub fn rename_columns(mut df: DataFrame) -> Result<DataFrame> {
    for (from, to) in COLUMN_RENAMES {
        if from == to || df.column(from).is_err() || df.column(to).is_ok() {
            continue;
        }
        df.rename(from, to.into())?;
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(df: &DataFrame, ticker: &str, column: &str) -> Option<String> {
        let tickers = df.column(TICKER).unwrap().as_materialized_series().str().unwrap().clone();
        let values = df.column(column).unwrap().as_materialized_series().str().unwrap().clone();
        tickers
            .into_iter()
            .zip(values.into_iter())
            .find(|(t, _)| *t == Some(ticker))
            .and_then(|(_, v)| v.map(str::to_string))
    }

    #[test]
    fn test_merge_outer_join_first_copy_wins() {
        let overview = df! {
            "Ticker" => &["AAA", "BBB"],
            "Sector" => &["Technology", "Energy"],
            "Price" => &["10", "20"],
        }
        .unwrap();
        let valuation = df! {
            "Ticker" => &["BBB", "CCC"],
            "Price" => &["99", "30"],
            "P/E" => &["12", "8"],
        }
        .unwrap();

        let merged = merge_views([Some(overview), None, Some(valuation)])
            .unwrap()
            .unwrap();

        assert_eq!(merged.height(), 3);
        assert_eq!(merged.width(), 4);
        assert_eq!(cell(&merged, "BBB", "Price").as_deref(), Some("20"));
        assert_eq!(cell(&merged, "CCC", "Price").as_deref(), Some("30"));
        assert_eq!(cell(&merged, "AAA", "P/E"), None);
        assert_eq!(cell(&merged, "CCC", "Sector"), None);
    }

    #[test]
    fn test_merge_skips_unusable_frames() {
        let empty = DataFrame::empty();
        let no_ticker = df! { "Price" => &["1"] }.unwrap();
        assert!(merge_views([None, Some(empty), Some(no_ticker)]).unwrap().is_none());
        assert!(merge_views(Vec::<Option<DataFrame>>::new()).unwrap().is_none());
    }

    #[test]
    fn test_rename_columns() {
        let df = df! {
            "Ticker" => &["AAA"],
            "Perf Year" => &["12%"],
            "Debt/Eq" => &["0.4"],
            "P/E" => &["15"],
        }
        .unwrap();

        let renamed = rename_columns(df).unwrap();
        assert!(renamed.column("Performance (Year)").is_ok());
        assert!(renamed.column("Total Debt/Equity").is_ok());
        assert!(renamed.column("P/E").is_ok());
        assert!(renamed.column("Perf Year").is_err());
    }

    #[test]
    fn test_rename_skips_existing_target() {
        let df = df! {
            "Gross M" => &["40%"],
            "Gross Margin" => &["41%"],
        }
        .unwrap();

        let renamed = rename_columns(df).unwrap();
        assert_eq!(renamed.width(), 2);
        assert!(renamed.column("Gross M").is_ok());
    }
}
