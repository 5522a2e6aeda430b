//! Error types for the Ronda engine.
//!
//! Scoring itself is total over well-typed input: missing metric columns and
//! unparseable cells never surface as errors. The variants here cover the
//! remaining contract violations (missing identity columns) and invalid
//! configuration (unknown metric names, bad weights).

use thiserror::Error;

/// The main error type for Ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// A mandatory column is missing from the batch.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A metric name that is not part of the metric catalogue.
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// A weight that is negative, non-finite or unparseable.
    #[error("Invalid weight for {metric}: {reason}")]
    InvalidWeight {
        /// Metric the weight was given for
        metric: String,
        /// Why the weight was rejected
        reason: String,
    },

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Ronda operations.
pub type Result<T> = std::result::Result<T, RondaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RondaError::MissingColumn("Sector".to_string());
        assert_eq!(err.to_string(), "Missing required column: Sector");

        let err = RondaError::InvalidWeight {
            metric: "P/E".to_string(),
            reason: "negative".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid weight for P/E: negative");
    }

    #[test]
    fn test_error_from_str() {
        let err: RondaError = "boom".into();
        assert!(matches!(err, RondaError::Other(_)));
    }
}
