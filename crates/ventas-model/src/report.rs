//! Diagnostics produced by a cleaning run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// The pipeline stages, in their contractual execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    SchemaNormalizer,
    TextSanitizer,
    MissingValueResolver,
    TypeCoercion,
    CriticalFieldFilter,
    CategoricalStandardizer,
    Deduplicator,
    Validator,
    PresentationFormatter,
}

impl StageKind {
    /// Execution order of the standard pipeline.
    pub const ORDER: [StageKind; 9] = [
        StageKind::SchemaNormalizer,
        StageKind::TextSanitizer,
        StageKind::MissingValueResolver,
        StageKind::TypeCoercion,
        StageKind::CriticalFieldFilter,
        StageKind::CategoricalStandardizer,
        StageKind::Deduplicator,
        StageKind::Validator,
        StageKind::PresentationFormatter,
    ];

    /// Human-readable stage name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::SchemaNormalizer => "Schema normalizer",
            Self::TextSanitizer => "Text sanitizer",
            Self::MissingValueResolver => "Missing-value resolver",
            Self::TypeCoercion => "Type coercion",
            Self::CriticalFieldFilter => "Critical-field filter",
            Self::CategoricalStandardizer => "Categorical standardizer",
            Self::Deduplicator => "Deduplicator",
            Self::Validator => "Validator",
            Self::PresentationFormatter => "Presentation formatter",
        }
    }

    /// Span/log identifier for the stage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SchemaNormalizer => "schema_normalizer",
            Self::TextSanitizer => "text_sanitizer",
            Self::MissingValueResolver => "missing_value_resolver",
            Self::TypeCoercion => "type_coercion",
            Self::CriticalFieldFilter => "critical_field_filter",
            Self::CategoricalStandardizer => "categorical_standardizer",
            Self::Deduplicator => "deduplicator",
            Self::Validator => "validator",
            Self::PresentationFormatter => "presentation_formatter",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Why a row was removed from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueReason {
    /// A critical field was missing (absent or failed coercion).
    MissingCriticalField,
    /// The business key repeated an earlier row.
    DuplicateKey,
    /// `precio_unitario` was zero or negative.
    NonPositivePrice,
    /// `cantidad` was negative.
    NegativeQuantity,
}

impl IssueReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::MissingCriticalField => "missing critical field",
            Self::DuplicateKey => "duplicate key",
            Self::NonPositivePrice => "non-positive price",
            Self::NegativeQuantity => "negative quantity",
        }
    }
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row removed by a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowIssue {
    pub reason: IssueReason,
    /// Transaction id of the removed row, when it had one.
    pub transaction_id: Option<String>,
    /// Offending value or missing column names.
    pub detail: String,
}

/// Diagnostics for one stage execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: StageKind,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Null counts per column before the stage applied its policy.
    ///
    /// For the missing-value resolver this is taken after sentinel mapping
    /// and before fills, so it shows what the sentinels hid.
    pub missing_before: BTreeMap<String, usize>,
    /// Null counts per column when the stage finished.
    pub missing_after: BTreeMap<String, usize>,
    /// Cells rewritten by the stage (renames count one per column).
    pub values_changed: usize,
    pub issues: Vec<RowIssue>,
    pub duration_ms: u128,
}

impl StageReport {
    pub fn new(stage: StageKind, rows_before: usize) -> Self {
        Self {
            stage,
            rows_before,
            rows_after: rows_before,
            missing_before: BTreeMap::new(),
            missing_after: BTreeMap::new(),
            values_changed: 0,
            issues: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    pub fn issue_count(&self, reason: IssueReason) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.reason == reason)
            .count()
    }

    /// Total nulls across all columns when the stage finished.
    pub fn total_missing_after(&self) -> usize {
        self.missing_after.values().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkStatus {
    Written,
    Failed,
}

/// Outcome of one output sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkSummary {
    /// Sink kind (`csv`, `excel`, `sql`, `mongo`).
    pub sink: String,
    /// File path, table or collection the sink targeted.
    pub destination: String,
    pub status: SinkStatus,
    pub rows: usize,
    pub message: Option<String>,
}

/// Everything a cleaning run reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub source: PathBuf,
    pub rows_read: usize,
    pub rows_clean: usize,
    pub stages: Vec<StageReport>,
    pub sinks: Vec<SinkSummary>,
}

impl RunReport {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn failed_sinks(&self) -> usize {
        self.sinks
            .iter()
            .filter(|sink| sink.status == SinkStatus::Failed)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_sinks() > 0
    }

    /// Rows removed across all stages, per reason.
    pub fn removed_by_reason(&self) -> BTreeMap<IssueReason, usize> {
        let mut counts = BTreeMap::new();
        for issue in self.stages.iter().flat_map(|stage| stage.issues.iter()) {
            *counts.entry(issue.reason).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ModelError::io(path, e))
    }
}
