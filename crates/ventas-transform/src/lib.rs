//! Cleaning pipeline for the sales transaction dataset.
//!
//! This crate turns the raw all-text table into the cleaned, typed table:
//!
//! - **normalization**: value-level helpers (column names, text, dates, numbers)
//! - **stages**: the nine pipeline components, each a [`Stage`]
//! - **pipeline**: the explicit driver that runs them in order and sorts the result
//!
//! Stage order is part of the contract: schema normalizer, text sanitizer,
//! missing-value resolver, type coercion, critical-field filter, categorical
//! standardizer, deduplicator, validator, presentation formatter.

pub mod error;
pub mod normalization;
pub mod pipeline;
pub mod stage;
pub mod stages;

pub use error::{Result, TransformError};
pub use pipeline::{Pipeline, PipelineOutcome, clean, sort_by_column};
pub use stage::{Stage, StageOutput};
