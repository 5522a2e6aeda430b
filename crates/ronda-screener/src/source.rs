//! Screener views and the sources that produce them.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use derive_more::Display;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ScreenerError;

/// A column group of the screener export.
///
/// Every view carries `Ticker`; the other columns differ per view and are
/// joined on `Ticker` after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ScreenerView {
    /// Identity, sector, industry, country and market cap
    Overview,
    /// Price multiples
    Valuation,
    /// Returns, margins and leverage
    Financial,
    /// Institutional, insider and short interest
    Ownership,
    /// Trailing price performance
    Performance,
    /// Moving averages, RSI and volatility
    Technical,
}

impl ScreenerView {
    /// All views in the order they are requested.
    pub const ALL: [Self; 6] = [
        Self::Overview,
        Self::Valuation,
        Self::Financial,
        Self::Ownership,
        Self::Performance,
        Self::Technical,
    ];

    /// Lower-case stem used for the view's file name.
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Valuation => "valuation",
            Self::Financial => "financial",
            Self::Ownership => "ownership",
            Self::Performance => "performance",
            Self::Technical => "technical",
        }
    }
}

/// Something that can produce the rows of one screener view.
pub trait ViewSource: Send + Sync {
    /// Fetch one view as a DataFrame.
    fn fetch_view(
        &self,
        view: ScreenerView,
    ) -> impl Future<Output = Result<DataFrame, ScreenerError>> + Send;
}

/// Reads views from `<dir>/<view>.csv` files.
///
/// Every column is read as text; numeric coercion happens in the engine.
#[derive(Debug, Clone)]
pub struct CsvViewSource {
    dir: PathBuf,
}

impl CsvViewSource {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a source rooted at `dir`, checking that the directory exists.
    ///
    /// Individual view files may still be missing; those fail per view.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenerError::Io`] if `dir` cannot be read or is not a
    /// directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ScreenerError> {
        let dir = dir.into();
        if !std::fs::metadata(&dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            )
            .into());
        }
        Ok(Self { dir })
    }

    /// Directory the view files are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `view`.
    pub fn view_path(&self, view: ScreenerView) -> PathBuf {
        self.dir.join(format!("{}.csv", view.file_stem()))
    }
}

impl ViewSource for CsvViewSource {
    fn fetch_view(
        &self,
        view: ScreenerView,
    ) -> impl Future<Output = Result<DataFrame, ScreenerError>> + Send {
        let path = self.view_path(view);
        async move {
            if !path.exists() {
                return Err(ScreenerError::ViewNotFound(path.display().to_string()));
            }
            tokio::task::spawn_blocking(move || read_text_csv(&path)).await?
        }
    }
}

/// Read a CSV file with a header row, keeping every column as text.
pub fn read_text_csv(path: &Path) -> Result<DataFrame, ScreenerError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_view_paths() {
        let source = CsvViewSource::new("/data/screens");
        assert_eq!(
            source.view_path(ScreenerView::Overview),
            PathBuf::from("/data/screens/overview.csv")
        );
        assert_eq!(ScreenerView::Technical.file_stem(), "technical");
        assert_eq!(ScreenerView::ALL.len(), 6);
        assert_eq!(ScreenerView::Ownership.to_string(), "Ownership");
    }

    #[tokio::test]
    async fn test_csv_view_source_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("valuation.csv"),
            "Ticker,P/E,PEG\nAAA,15.2,1.1\nBBB,-,2.0\n",
        )
        .unwrap();

        let source = CsvViewSource::new(dir.path());
        let df = source.fetch_view(ScreenerView::Valuation).await.unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("P/E").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_open_checks_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CsvViewSource::open(dir.path()).is_ok());

        let missing = CsvViewSource::open(dir.path().join("absent"));
        assert!(matches!(missing, Err(ScreenerError::Io(e)) if e.kind() == io::ErrorKind::NotFound));

        let file = dir.path().join("overview.csv");
        fs::write(&file, "Ticker\nAAA\n").unwrap();
        assert!(matches!(CsvViewSource::open(&file), Err(ScreenerError::Io(_))));
    }

    #[tokio::test]
    async fn test_missing_view_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvViewSource::new(dir.path());
        let result = source.fetch_view(ScreenerView::Financial).await;
        assert!(matches!(result, Err(ScreenerError::ViewNotFound(_))));
    }
}
