//! The nine pipeline components, one unit struct per stage.

mod categorical;
mod coercion;
mod dedupe;
mod filter;
mod missing;
mod presentation;
mod schema;
mod text;
mod validate;

use polars::prelude::DataFrame;
use ventas_common::column_value_string;
use ventas_model::columns::{ID_TRANSACCION, NOMBRE_CLIENTE};

pub use categorical::CategoricalStandardizer;
pub use coercion::TypeCoercion;
pub use dedupe::Deduplicator;
pub use filter::CriticalFieldFilter;
pub use missing::MissingValueResolver;
pub use presentation::PresentationFormatter;
pub use schema::SchemaNormalizer;
pub use text::TextSanitizer;
pub use validate::Validator;

/// Transaction id of a row, if the row has one.
pub(crate) fn transaction_id(df: &DataFrame, idx: usize) -> Option<String> {
    let value = column_value_string(df, ID_TRANSACCION, idx);
    if value.is_empty() { None } else { Some(value) }
}

/// Customer name of a row for log output (redaction is up to the caller).
pub(crate) fn customer_name(df: &DataFrame, idx: usize) -> String {
    column_value_string(df, NOMBRE_CLIENTE, idx)
}
