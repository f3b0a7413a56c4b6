//! Data model for the sales ETL workspace.
//!
//! - **columns**: canonical column names of the sales transaction schema
//! - **rules**: dataset-specific cleaning rules, loadable from TOML
//! - **report**: per-stage and per-run diagnostics
//! - **error**: model-level errors (rules and report I/O)

pub mod columns;
pub mod error;
pub mod report;
pub mod rules;

pub use error::{ModelError, Result};
pub use report::{
    IssueReason, RowIssue, RunReport, SinkStatus, SinkSummary, StageKind, StageReport,
};
pub use rules::{
    CleaningRules, CoercionRules, DedupeRules, FilterRules, FinalizeRules, MissingValueRules,
    PresentationRules, TextRules,
};
