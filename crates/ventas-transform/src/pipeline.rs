//! The explicit pipeline driver.
//!
//! The frame is moved through each stage in turn; every stage returns the
//! frame it produced and the driver records a [`StageReport`] for it. After
//! the last stage the table is sorted by the finalize column (`fecha`) so
//! sinks always receive it in date order.
//!
//! # Example
//!
//! ```ignore
//! use ventas_model::CleaningRules;
//! use ventas_transform::Pipeline;
//!
//! let rules = CleaningRules::default();
//! let outcome = Pipeline::standard().run(raw, &rules)?;
//! for report in &outcome.reports {
//!     println!("{}: {} -> {}", report.stage, report.rows_before, report.rows_after);
//! }
//! ```

use std::time::Instant;

use polars::prelude::{DataFrame, SortMultipleOptions};
use tracing::{debug, info, info_span};
use ventas_common::{has_column, null_counts};
use ventas_model::{CleaningRules, StageKind, StageReport};

use crate::error::{Result, TransformError};
use crate::stage::Stage;
use crate::stages::{
    CategoricalStandardizer, CriticalFieldFilter, Deduplicator, MissingValueResolver,
    PresentationFormatter, SchemaNormalizer, TextSanitizer, TypeCoercion, Validator,
};

/// Cleaned table plus one report per executed stage.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub frame: DataFrame,
    pub reports: Vec<StageReport>,
}

impl PipelineOutcome {
    /// Report of a given stage, if it ran.
    pub fn report(&self, stage: StageKind) -> Option<&StageReport> {
        self.reports.iter().find(|report| report.stage == stage)
    }
}

/// An ordered list of stages.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Builds a pipeline from explicit stages, run in the given order.
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// The nine stages in their contractual order.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(SchemaNormalizer),
            Box::new(TextSanitizer),
            Box::new(MissingValueResolver),
            Box::new(TypeCoercion),
            Box::new(CriticalFieldFilter),
            Box::new(CategoricalStandardizer),
            Box::new(Deduplicator),
            Box::new(Validator),
            Box::new(PresentationFormatter),
        ])
    }

    /// Stage kinds in execution order.
    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|stage| stage.kind()).collect()
    }

    /// Runs every stage, then sorts the result by the finalize column.
    ///
    /// # Errors
    ///
    /// Returns an error only when a stage cannot rebuild the frame or the
    /// final sort fails. Bad values and dropped rows are reported, not raised.
    pub fn run(&self, frame: DataFrame, rules: &CleaningRules) -> Result<PipelineOutcome> {
        let mut frame = frame;
        let mut reports = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let kind = stage.kind();
            let span = info_span!("stage", stage = kind.as_str());
            let _guard = span.enter();
            let start = Instant::now();

            let rows_before = frame.height();
            let missing_before = null_counts(&frame);
            let output = stage
                .apply(frame, rules)
                .map_err(|source| TransformError::Stage {
                    stage: kind,
                    source,
                })?;

            let mut report = StageReport::new(kind, rows_before);
            report.rows_after = output.frame.height();
            report.missing_before = output.missing_before.unwrap_or(missing_before);
            report.missing_after = null_counts(&output.frame);
            report.values_changed = output.values_changed;
            report.issues = output.issues;
            report.duration_ms = start.elapsed().as_millis();

            debug!(
                missing_before = ?report.missing_before,
                missing_after = ?report.missing_after,
                "missing values per column"
            );
            info!(
                rows_before = report.rows_before,
                rows_after = report.rows_after,
                rows_removed = report.rows_removed(),
                values_changed = report.values_changed,
                duration_ms = report.duration_ms,
                "{} complete",
                kind
            );

            frame = output.frame;
            reports.push(report);
        }

        let frame = sort_by_column(frame, &rules.finalize.sort_column)?;
        Ok(PipelineOutcome { frame, reports })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Runs the standard pipeline with `rules`.
pub fn clean(frame: DataFrame, rules: &CleaningRules) -> Result<PipelineOutcome> {
    Pipeline::standard().run(frame, rules)
}

/// Stable ascending sort on `column`, nulls last. A missing column leaves the
/// frame unchanged.
pub fn sort_by_column(frame: DataFrame, column: &str) -> Result<DataFrame> {
    if !has_column(&frame, column) {
        debug!(column, "sort column not present, keeping current order");
        return Ok(frame);
    }
    frame
        .sort(
            [column],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
        .map_err(|source| TransformError::Sort {
            column: column.to_string(),
            source,
        })
}
