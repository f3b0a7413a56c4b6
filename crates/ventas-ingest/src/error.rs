//! Error types for raw sales file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the raw export.
///
/// Every variant is fatal to a cleaning run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
