//! Numeric coercion of screener cells.
//!
//! Screener exports mix plain numbers with formatted text such as `"12.5%"`,
//! `"$1,204.50"` or a bare `"-"` for "not available". The `coerce_*`
//! functions are total: a cell that cannot be read as a number becomes
//! `0.0`. [`parse_column`] keeps such cells as `NaN` instead.

use ndarray::Array1;
use polars::prelude::*;

/// Characters removed from a cell before parsing.
const STRIPPED: [char; 3] = ['%', ',', '$'];

/// Coerce a single text cell.
///
/// `%`, `,` and `$` are removed and surrounding whitespace trimmed. The
/// literal `-`, empty text, unparseable text and `NaN` all map to `0.0`.
/// Parseable infinities are kept.
///
/// # Examples
///
/// ```
/// use ronda_traits::coerce::coerce_str;
///
/// assert_eq!(coerce_str("12.5%"), 12.5);
/// assert_eq!(coerce_str("$1,204.50"), 1204.5);
/// assert_eq!(coerce_str("-"), 0.0);
/// ```
#[must_use]
pub fn coerce_str(raw: &str) -> f64 {
    parse_str(raw).map_or(0.0, coerce_value)
}

/// Parse a text cell after stripping `%`, `,` and `$`.
///
/// Returns `None` for text that is not a number, including the bare `-`
/// placeholder.
#[must_use]
pub fn parse_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !STRIPPED.contains(c)).collect();
    cleaned.trim().parse::<f64>().ok()
}

/// Coerce an already-numeric cell: null and `NaN` become `0.0`.
#[must_use]
pub const fn coerce_value(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// Coerce an optional numeric cell (polars null is `None`).
#[must_use]
pub fn coerce_opt(value: Option<f64>) -> f64 {
    value.map_or(0.0, coerce_value)
}

/// Coerce a whole column to `f64`.
///
/// String columns are parsed cell by cell with [`coerce_str`]. Any other
/// dtype is cast to `Float64`; a column that cannot be cast is all zeros.
#[must_use]
pub fn coerce_column(column: &Column) -> Array1<f64> {
    let series = column.as_materialized_series();
    if let Ok(text) = series.str() {
        return text
            .into_iter()
            .map(|cell| cell.map_or(0.0, coerce_str))
            .collect();
    }

    match series.cast(&DataType::Float64) {
        Ok(cast) => match cast.f64() {
            Ok(values) => values.into_iter().map(coerce_opt).collect(),
            Err(_) => Array1::zeros(series.len()),
        },
        Err(_) => Array1::zeros(series.len()),
    }
}

/// Read a whole column as `f64` without filling gaps.
///
/// Unlike [`coerce_column`], nulls and unparseable cells become `NaN`, so
/// callers can tell a missing value from a zero.
#[must_use]
pub fn parse_column(column: &Column) -> Array1<f64> {
    let series = column.as_materialized_series();
    if let Ok(text) = series.str() {
        return text
            .into_iter()
            .map(|cell| cell.and_then(parse_str).unwrap_or(f64::NAN))
            .collect();
    }

    match series.cast(&DataType::Float64) {
        Ok(cast) => match cast.f64() {
            Ok(values) => values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
            Err(_) => Array1::from_elem(series.len(), f64::NAN),
        },
        Err(_) => Array1::from_elem(series.len(), f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("-", 0.0)]
    #[case("12.5%", 12.5)]
    #[case("-3.25%", -3.25)]
    #[case("$1,204.50", 1204.5)]
    #[case("  7 ", 7.0)]
    #[case("", 0.0)]
    #[case("n/a", 0.0)]
    #[case("NaN", 0.0)]
    #[case("-%", 0.0)]
    fn test_coerce_str(#[case] input: &str, #[case] expected: f64) {
        assert_relative_eq!(coerce_str(input), expected);
    }

    #[test]
    fn test_coerce_str_keeps_infinity() {
        assert!(coerce_str("inf").is_infinite());
    }

    #[test]
    fn test_coerce_string_column() {
        let column = Column::new("P/E".into(), &[Some("15.2"), None, Some("-"), Some("1,000")]);
        let values = coerce_column(&column);
        assert_eq!(values.to_vec(), vec![15.2, 0.0, 0.0, 1000.0]);
    }

    #[test]
    fn test_parse_column_keeps_gaps() {
        let column = Column::new("Return".into(), &[Some("1.5%"), None, Some("-"), Some("x")]);
        let values = parse_column(&column);
        assert_relative_eq!(values[0], 1.5);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_coerce_numeric_column() {
        let column = Column::new("RSI".into(), &[Some(55.0), None, Some(f64::NAN)]);
        let values = coerce_column(&column);
        assert_eq!(values.to_vec(), vec![55.0, 0.0, 0.0]);

        let ints = Column::new("Volume".into(), &[1_i64, 2, 3]);
        assert_eq!(coerce_column(&ints).to_vec(), vec![1.0, 2.0, 3.0]);
    }
}
