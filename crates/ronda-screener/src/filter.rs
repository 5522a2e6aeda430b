//! Row filters applied to the merged screener table.

use polars::prelude::*;
use ronda_traits::{COUNTRY, INDUSTRY, SECTOR, Sector};
use serde::{Deserialize, Serialize};

use crate::{Result, ScreenerError};

/// Sector, industry and country restrictions on a merged table.
///
/// An empty list places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenFilter {
    /// Keep only rows in one of these sectors.
    pub sectors: Vec<Sector>,
    /// Keep only rows in one of these industries.
    pub industries: Vec<String>,
    /// Drop rows domiciled in one of these countries.
    pub excluded_countries: Vec<String>,
}

impl ScreenFilter {
    /// A filter that keeps every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given sectors.
    pub fn with_sectors(mut self, sectors: impl IntoIterator<Item = Sector>) -> Self {
        self.sectors = sectors.into_iter().collect();
        self
    }

    /// Restrict to the given industries.
    pub fn with_industries<S: Into<String>>(mut self, industries: impl IntoIterator<Item = S>) -> Self {
        self.industries = industries.into_iter().map(Into::into).collect();
        self
    }

    /// Exclude the given countries.
    pub fn excluding_countries<S: Into<String>>(
        mut self,
        countries: impl IntoIterator<Item = S>,
    ) -> Self {
        self.excluded_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the filter keeps every row.
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty() && self.industries.is_empty() && self.excluded_countries.is_empty()
    }

    /// Apply the sector, industry and country restrictions in that order.
    ///
    /// Rows with a null sector or industry fail a non-empty inclusion list;
    /// rows with a null country are never excluded.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenerError::MissingColumn`] if a restricted column is
    /// absent.
    pub fn apply(&self, mut df: DataFrame) -> Result<DataFrame> {
        if !self.sectors.is_empty() {
            let names: Vec<&str> = self.sectors.iter().map(Sector::name).collect();
            let mask = membership(&df, SECTOR, &names, true)?;
            df = df.filter(&mask)?;
        }
        if !self.industries.is_empty() {
            let names: Vec<&str> = self.industries.iter().map(String::as_str).collect();
            let mask = membership(&df, INDUSTRY, &names, true)?;
            df = df.filter(&mask)?;
        }
        if !self.excluded_countries.is_empty() {
            let names: Vec<&str> = self.excluded_countries.iter().map(String::as_str).collect();
            let mask = membership(&df, COUNTRY, &names, false)?;
            df = df.filter(&mask)?;
        }
        Ok(df)
    }
}

/// Mask of rows whose `column` value is (`keep_members`) or is not
/// (`!keep_members`) one of `values`.
fn membership(df: &DataFrame, column: &str, values: &[&str], keep_members: bool) -> Result<BooleanChunked> {
    let column = df
        .column(column)
        .map_err(|_| ScreenerError::MissingColumn(column.to_string()))?;
    let text = column.as_materialized_series().cast(&DataType::String)?;
    let mask = text
        .str()?
        .into_iter()
        .map(|cell| cell.is_some_and(|v| values.contains(&v)) == keep_members)
        .collect();
    Ok(mask)
}
