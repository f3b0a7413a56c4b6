//! Error types for the cleaning pipeline.

use polars::prelude::PolarsError;
use thiserror::Error;
use ventas_model::StageKind;

/// Structural failures of the pipeline.
///
/// Bad values never end up here: they become nulls or dropped rows recorded
/// in the stage reports.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A stage could not rebuild the frame.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: StageKind,
        #[source]
        source: PolarsError,
    },

    /// The final ordering before handoff to the sinks failed.
    #[error("failed to sort cleaned table by '{column}': {source}")]
    Sort {
        column: String,
        #[source]
        source: PolarsError,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, TransformError>;
