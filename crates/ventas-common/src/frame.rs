//! Column-level accessors over a `DataFrame`.
//!
//! Stages read a column into owned values, rewrite them, and put the column
//! back by name. These helpers keep that round trip in one place.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::{
    BooleanChunked, DataFrame, DataType, NamedFrom, NewChunkedArray, PolarsResult, Series,
};

use crate::polars::{any_to_string, epoch_days};

/// Returns true when the frame has a column called `name`.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Returns true when `name` exists and holds text.
pub fn is_string_column(df: &DataFrame, name: &str) -> bool {
    df.column(name)
        .map(|column| column.dtype() == &DataType::String)
        .unwrap_or(false)
}

/// Reads a column as optional strings. Non-string columns are cast first.
///
/// Returns `None` when the column does not exist.
pub fn string_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    let cast = column.cast(&DataType::String).ok()?;
    let values = cast.str().ok()?;
    Some(
        values
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect(),
    )
}

/// String rendering of a single cell; empty for nulls and unknown columns.
pub fn column_value_string(df: &DataFrame, name: &str, idx: usize) -> String {
    df.column(name)
        .ok()
        .and_then(|column| column.get(idx).ok())
        .map(any_to_string)
        .unwrap_or_default()
}

/// Null count of every column, keyed by column name.
pub fn null_counts(df: &DataFrame) -> BTreeMap<String, usize> {
    df.get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column.null_count()))
        .collect()
}

/// Replaces (or appends) the column named like `series`, keeping its position.
pub fn replace_column(df: &mut DataFrame, series: Series) -> PolarsResult<()> {
    df.with_column(series)?;
    Ok(())
}

/// Keeps the rows whose mask entry is `true`.
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> PolarsResult<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    df.filter(&mask)
}

/// Builds a polars `Date` series from optional calendar dates.
pub fn date_series(name: &str, values: &[Option<NaiveDate>]) -> PolarsResult<Series> {
    let days: Vec<Option<i32>> = values.iter().map(|d| d.map(epoch_days)).collect();
    Series::new(name.into(), days).cast(&DataType::Date)
}
