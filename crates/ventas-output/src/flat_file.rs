//! Delimited text sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::DataFrame;
use ventas_common::any_to_string;

use crate::common::ensure_parent_dir;
use crate::error::{Result, SinkError};

/// UTF-8 byte-order marker written ahead of the header row.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the frame as CSV rows (no byte-order marker) to `writer`.
///
/// Dates render as `YYYY-MM-DD`, numbers without trailing zeros and nulls as
/// empty fields.
pub fn write_csv_rows<W: Write>(df: &DataFrame, writer: W) -> std::result::Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(df.get_column_names().iter().map(|name| name.as_str()))?;
    let columns = df.get_columns();
    for idx in 0..df.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| column.get(idx).map(any_to_string).unwrap_or_default())
            .collect();
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the frame to `path` as UTF-8 CSV with a byte-order marker.
///
/// Returns the number of data rows written.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<usize> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| SinkError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(UTF8_BOM)
        .map_err(|e| SinkError::io(path, e))?;
    write_csv_rows(df, &mut writer).map_err(|source| SinkError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| SinkError::io(path, e))?;
    Ok(df.height())
}
