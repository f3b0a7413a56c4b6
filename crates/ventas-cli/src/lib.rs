//! CLI library components for the sales ETL.

pub mod logging;
pub mod run;
