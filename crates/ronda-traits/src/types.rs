//! The screener batch: one materialized table of securities.

use ndarray::Array1;
use polars::prelude::*;

use crate::coerce::{coerce_column, parse_column};
use crate::{Metric, Result, RondaError};

/// Ticker symbol column.
pub const TICKER: &str = "Ticker";
/// Company name column.
pub const COMPANY: &str = "Company";
/// Sector column.
pub const SECTOR: &str = "Sector";
/// Industry column.
pub const INDUSTRY: &str = "Industry";
/// Country column.
pub const COUNTRY: &str = "Country";
/// Market capitalization column.
pub const MARKET_CAP: &str = "Market Cap";
/// Composite score column written by the scorer.
pub const TOTAL_SCORE: &str = "Total_Score";

/// A batch of screener rows, one per ticker.
///
/// `ScreenerBatch` wraps a Polars DataFrame. Identity columns (`Ticker`,
/// `Company`, `Sector`, `Industry`, `Country`) hold strings; metric columns
/// may be any dtype and are read through [`crate::coerce`].
///
/// Every transform takes `&self` and returns a new batch, so the caller's
/// batch is never modified.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::ScreenerBatch;
/// use polars::prelude::*;
///
/// let df = df! {
///     "Ticker" => &["AAPL", "XOM"],
///     "Sector" => &["Technology", "Energy"],
///     "P/E" => &["31.2", "12.4"],
/// }.unwrap();
///
/// let batch = ScreenerBatch::new(df);
/// assert_eq!(batch.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScreenerBatch {
    data: DataFrame,
}

impl ScreenerBatch {
    /// Wrap a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the batch has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Column names, in frame order.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Gets a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.data.column(name).ok()
    }

    /// Coerced values of a metric column, `None` if the column is absent.
    pub fn metric(&self, metric: Metric) -> Option<Array1<f64>> {
        self.column(metric.column_name()).map(coerce_column)
    }

    /// Numeric values of an arbitrary column, coerced.
    pub fn numeric_column(&self, name: &str) -> Option<Array1<f64>> {
        self.column(name).map(coerce_column)
    }

    /// Values of a column with gaps kept as `NaN`.
    pub fn float_column(&self, name: &str) -> Option<Array1<f64>> {
        self.column(name).map(parse_column)
    }

    /// Text values of a column, nulls as empty strings.
    ///
    /// Non-string columns are cast to text.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>> {
        let column = self
            .column(name)
            .ok_or_else(|| RondaError::MissingColumn(name.to_string()))?;
        let text = column.cast(&DataType::String)?;
        Ok(text
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|cell| cell.unwrap_or_default().to_string())
            .collect())
    }

    /// Fails with [`RondaError::MissingColumn`] if a non-empty batch lacks
    /// `Ticker` or `Sector`.
    pub fn require_identity(&self) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        for name in [TICKER, SECTOR] {
            if !self.has_column(name) {
                return Err(RondaError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    /// A new batch with the given `f64` columns added, replacing any column
    /// of the same name in place.
    pub fn with_columns<'a, I>(&self, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Array1<f64>)>,
    {
        let mut data = self.data.clone();
        for (name, values) in columns {
            if values.len() != data.height() {
                return Err(RondaError::InvalidData(format!(
                    "column {name} has {} values for {} rows",
                    values.len(),
                    data.height()
                )));
            }
            data.with_column(Series::new(name.into(), values.to_vec()))?;
        }
        Ok(Self::new(data))
    }
}

impl From<DataFrame> for ScreenerBatch {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for ScreenerBatch {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}
