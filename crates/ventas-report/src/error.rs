use polars::prelude::PolarsError;
use thiserror::Error;
use ventas_ingest::IngestError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to load cleaned data: {0}")]
    Ingest(#[from] IngestError),

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
