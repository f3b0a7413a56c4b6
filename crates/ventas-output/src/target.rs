//! Sink targets and their outcomes.

use std::fmt;
use std::path::PathBuf;

use ventas_model::{SinkStatus, SinkSummary};

use crate::error::SinkError;

/// Default flat-file name.
pub const DEFAULT_CSV_FILE: &str = "datos_limpios.csv";
/// Default spreadsheet file name.
pub const DEFAULT_EXCEL_FILE: &str = "datos_limpios.xlsx";
pub const DEFAULT_SHEET_NAME: &str = "Datos Limpios";
/// Default table and collection name.
pub const DEFAULT_TABLE: &str = "transacciones_limpias";
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_MONGO_DATABASE: &str = "mi_base_de_datos";

/// Where (and how) to write the cleaned table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// UTF-8 CSV with byte-order marker.
    Csv { path: PathBuf },
    /// Single-sheet formatted workbook.
    Excel { path: PathBuf, sheet_name: String },
    /// Relational table, replaced on every run.
    Sql { connection: String, table: String },
    /// Document collection, replaced on every run.
    Mongo {
        connection: String,
        database: String,
        collection: String,
    },
}

impl OutputTarget {
    /// Short sink identifier used in logs and summaries.
    pub fn sink_name(&self) -> &'static str {
        match self {
            Self::Csv { .. } => "csv",
            Self::Excel { .. } => "excel",
            Self::Sql { .. } => "sql",
            Self::Mongo { .. } => "mongo",
        }
    }

    /// File, table or collection the sink writes to.
    pub fn destination(&self) -> String {
        match self {
            Self::Csv { path } | Self::Excel { path, .. } => path.display().to_string(),
            Self::Sql { table, .. } => table.clone(),
            Self::Mongo {
                database,
                collection,
                ..
            } => format!("{database}.{collection}"),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.sink_name(), self.destination())
    }
}

/// A successful sink write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOutcome {
    pub sink: &'static str,
    pub destination: String,
    pub rows: usize,
}

/// Result of one sink in a multi-sink run.
#[derive(Debug)]
pub struct SinkResult {
    pub target: OutputTarget,
    pub result: Result<SinkOutcome, SinkError>,
}

impl SinkResult {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Report entry for this sink.
    pub fn summary(&self) -> SinkSummary {
        match &self.result {
            Ok(outcome) => SinkSummary {
                sink: outcome.sink.to_string(),
                destination: outcome.destination.clone(),
                status: SinkStatus::Written,
                rows: outcome.rows,
                message: None,
            },
            Err(error) => SinkSummary {
                sink: self.target.sink_name().to_string(),
                destination: self.target.destination(),
                status: SinkStatus::Failed,
                rows: 0,
                message: Some(error.to_string()),
            },
        }
    }
}
