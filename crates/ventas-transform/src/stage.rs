//! The `Stage` abstraction shared by all pipeline components.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, PolarsResult};
use ventas_model::{CleaningRules, RowIssue, StageKind};

/// One table-to-table step of the cleaning pipeline.
///
/// A stage takes the whole frame by value and returns the rewritten frame
/// together with what it did to it. Stages never fail on bad values; an `Err`
/// means the frame itself could not be rebuilt.
pub trait Stage: Send + Sync {
    /// Which pipeline component this stage implements.
    fn kind(&self) -> StageKind;

    /// Applies the stage to `frame` using the dataset rules.
    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput>;
}

/// Result of applying one stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub frame: DataFrame,
    /// Cells rewritten by the stage.
    pub values_changed: usize,
    /// One entry per removed row.
    pub issues: Vec<RowIssue>,
    /// Null counts to report as the "before" picture instead of the frame
    /// the stage received.
    pub missing_before: Option<BTreeMap<String, usize>>,
}

impl StageOutput {
    pub fn new(frame: DataFrame) -> Self {
        Self {
            frame,
            values_changed: 0,
            issues: Vec::new(),
            missing_before: None,
        }
    }

    #[must_use]
    pub fn with_values_changed(mut self, count: usize) -> Self {
        self.values_changed = count;
        self
    }

    #[must_use]
    pub fn with_issues(mut self, issues: Vec<RowIssue>) -> Self {
        self.issues = issues;
        self
    }

    #[must_use]
    pub fn with_missing_before(mut self, counts: BTreeMap<String, usize>) -> Self {
        self.missing_before = Some(counts);
        self
    }
}
