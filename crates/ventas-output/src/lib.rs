//! Output sinks for the cleaned sales table.
//!
//! Each sink is independent: `write_outputs` runs them one after the other and
//! returns one result per target, so a failing database never prevents the
//! flat file from being written.

pub mod common;
pub mod document;
pub mod error;
pub mod flat_file;
pub mod relational;
pub mod spreadsheet;
pub mod target;

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{error, info, info_span};

pub use error::{Result, SinkError};
pub use flat_file::{write_csv, write_csv_rows};
pub use spreadsheet::write_excel;
pub use relational::write_sql;
pub use document::write_mongo;
pub use target::{
    DEFAULT_CSV_FILE, DEFAULT_EXCEL_FILE, DEFAULT_MONGO_DATABASE, DEFAULT_MONGO_URI,
    DEFAULT_SHEET_NAME, DEFAULT_TABLE, OutputTarget, SinkOutcome, SinkResult,
};

/// Writes the frame to a single target.
pub fn write_output(df: &DataFrame, target: &OutputTarget) -> Result<SinkOutcome> {
    let sink = target.sink_name();
    let span = info_span!("sink", sink, destination = %target.destination());
    let _guard = span.enter();
    let start = Instant::now();

    if df.height() == 0 {
        return Err(SinkError::EmptyFrame { sink });
    }

    let rows = match target {
        OutputTarget::Csv { path } => write_csv(df, path)?,
        OutputTarget::Excel { path, sheet_name } => write_excel(df, path, sheet_name)?,
        OutputTarget::Sql { connection, table } => write_sql(df, connection, table)?,
        OutputTarget::Mongo {
            connection,
            database,
            collection,
        } => write_mongo(df, connection, database, collection)?,
    };

    info!(
        rows,
        duration_ms = start.elapsed().as_millis(),
        "sink written"
    );
    Ok(SinkOutcome {
        sink,
        destination: target.destination(),
        rows,
    })
}

/// Writes the frame to every target in order, containing failures per target.
pub fn write_outputs(df: &DataFrame, targets: &[OutputTarget]) -> Vec<SinkResult> {
    targets
        .iter()
        .map(|target| {
            let result = write_output(df, target);
            if let Err(err) = &result {
                error!(sink = target.sink_name(), destination = %target.destination(), error = %err, "sink failed");
            }
            SinkResult {
                target: target.clone(),
                result,
            }
        })
        .collect()
}
