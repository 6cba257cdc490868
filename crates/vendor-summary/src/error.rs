//! Error types for the vendor summary stage.

use thiserror::Error;

/// Errors that can occur while building or persisting the summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Query execution, row decoding, or COPY failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to serialize the write-back payload.
    #[error("failed to build summary payload: {message}")]
    Payload { message: String },

    /// Failure while recreating the summary table.
    #[error(transparent)]
    Ingest(#[from] vendor_ingest::IngestError),
}

/// Result type for summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;
