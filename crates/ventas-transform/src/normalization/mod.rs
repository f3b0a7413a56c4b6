//! Value-level normalization used by the pipeline stages.
//!
//! - **names**: column-name canonicalization
//! - **text**: whitespace/case sanitizing and display casing
//! - **datetime**: ordered multi-format date parsing
//! - **numeric**: quantity and price parsing with pre-cleaning

pub mod datetime;
pub mod names;
pub mod numeric;
pub mod text;

pub use datetime::parse_date_with_formats;
pub use names::{normalize_column_name, normalize_column_names};
pub use numeric::{parse_price, parse_quantity};
pub use text::{sanitize_text, title_case};
