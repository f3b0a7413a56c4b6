//! Raw sales export ingestion.
//!
//! Loads the delimited export into a Polars `DataFrame` where every column is
//! text and every cell is kept verbatim. Sentinel handling, trimming and type
//! parsing belong to the cleaning pipeline, not to the reader.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ventas_ingest::read_sales_csv;
//!
//! let df = read_sales_csv(Path::new("ventas_sucias.csv"))?;
//! println!("{} rows x {} columns", df.height(), df.width());
//! ```

mod error;
mod header;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use header::{disambiguate_headers, strip_bom};
pub use reader::read_sales_csv;
