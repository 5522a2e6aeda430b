//! Error types for screener view loading.

use thiserror::Error;

/// Errors that can occur while loading screener views.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// The data directory could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// DataFrame operation failed.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// A blocking read task panicked or was cancelled.
    #[error("View task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A view file was not found.
    #[error("View not found: {0}")]
    ViewNotFound(String),

    /// A column required for merging or filtering is absent.
    #[error("Missing column: {0}")]
    MissingColumn(String),
}
