//! Dashboard aggregates over the cleaned sales table.
//!
//! Reads the flat-file sink output back, derives per-row revenue and computes
//! the headline metrics and breakdowns shown by `ventas report`.

mod error;
mod load;
mod summary;

pub use error::{ReportError, Result};
pub use load::{derive_revenue, load_cleaned};
pub use summary::{CategoryTotal, DashboardSummary, MonthlyRevenue, summarize};
