//! Shared utilities for the sales ETL crates.
//!
//! This crate provides Polars helpers used across the workspace: `AnyValue`
//! conversions, epoch-day date conversion, column-level accessors and the
//! personal-data redaction switch used by log statements.

pub mod frame;
pub mod polars;
pub mod redact;

// Re-export commonly used functions at crate root for convenience
pub use frame::{
    column_value_string, date_series, filter_rows, has_column, is_string_column, null_counts,
    replace_column, string_values,
};
pub use polars::{
    any_to_date, any_to_f64, any_to_i64, any_to_string, any_to_string_non_empty, date_from_epoch_days,
    epoch_days, format_numeric, parse_f64, parse_i64,
};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
