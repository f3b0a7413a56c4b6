//! Error types for output sinks.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a single sink.
///
/// A sink error never aborts the other sinks of a run.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("nothing to write to the {sink} sink: the cleaned table is empty")]
    EmptyFrame { sink: &'static str },

    #[error("the {sink} sink is not available in this build (enable the `{feature}` feature)")]
    Unavailable {
        sink: &'static str,
        feature: &'static str,
    },

    #[error("invalid {kind} name '{name}': only letters, digits and '_' are allowed")]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("unsupported connection target '{target}'")]
    UnsupportedConnection { target: String },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write spreadsheet {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[cfg(feature = "sql")]
    #[error("SQL error writing table '{table}': {source}")]
    Sql {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[cfg(feature = "mongo")]
    #[error("MongoDB error writing '{namespace}': {source}")]
    Document {
        namespace: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

impl SinkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;
