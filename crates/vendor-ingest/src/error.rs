//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading CSV files into the database.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read a source file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV records during schema sampling.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A filename could not be turned into a table name.
    #[error("cannot derive table name from {path}")]
    TableName { path: PathBuf },

    /// Statement execution or COPY stream rejected by the database.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::EmptyCsv {
            path: PathBuf::from("/data/sales.csv"),
        };
        assert_eq!(err.to_string(), "CSV file is empty: /data/sales.csv");
    }
}
