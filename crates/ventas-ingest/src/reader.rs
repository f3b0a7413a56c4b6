//! CSV file reading into an all-text DataFrame.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{Column, DataFrame, NamedFrom};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::header::{disambiguate_headers, strip_bom};

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn csv_error(path: &Path, err: csv::Error) -> IngestError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            message,
        },
    }
}

/// Reads a comma-delimited sales export with a header row.
///
/// Every cell becomes a `String` exactly as written in the file: no trimming,
/// no null inference. A byte-order marker on the first header is dropped and
/// repeated header names are made unique. Short rows are padded with empty
/// strings and long rows are cut to the header width.
pub fn read_sales_csv(path: &Path) -> Result<DataFrame> {
    let start = Instant::now();
    let file = open_file(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                strip_bom(name).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();
    if raw_headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let headers = disambiguate_headers(raw_headers);
    debug!(path = %path.display(), headers = ?headers, "read header row");

    let width = headers.len();
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); width];
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        for (idx, values) in columns.iter_mut().enumerate() {
            values.push(record.get(idx).unwrap_or_default().to_string());
        }
    }

    let df = DataFrame::new(
        headers
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name.as_str().into(), values))
            .collect(),
    )?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "loaded raw sales file"
    );
    Ok(df)
}
