use polars::prelude::{AnyValue, DataFrame, PolarsResult};
use tracing::{debug, warn};
use ventas_common::{filter_rows, has_column};
use ventas_model::{CleaningRules, IssueReason, RowIssue, StageKind};

use super::transaction_id;
use crate::stage::{Stage, StageOutput};

/// Drops every row missing at least one critical field.
///
/// Critical fields absent from the frame are skipped. This is the only stage
/// that removes rows for missingness.
pub struct CriticalFieldFilter;

impl Stage for CriticalFieldFilter {
    fn kind(&self) -> StageKind {
        StageKind::CriticalFieldFilter
    }

    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput> {
        let present: Vec<&str> = rules
            .filter
            .critical_fields
            .iter()
            .map(String::as_str)
            .filter(|name| has_column(&frame, name))
            .collect();
        if present.is_empty() {
            warn!("no critical fields present in the table, nothing to filter");
            return Ok(StageOutput::new(frame));
        }

        let columns = present
            .iter()
            .map(|name| frame.column(name))
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut keep = Vec::with_capacity(frame.height());
        let mut issues = Vec::new();
        for idx in 0..frame.height() {
            let missing: Vec<&str> = present
                .iter()
                .zip(&columns)
                .filter(|(_, column)| matches!(column.get(idx), Ok(AnyValue::Null)))
                .map(|(name, _)| *name)
                .collect();
            if missing.is_empty() {
                keep.push(true);
                continue;
            }
            let id = transaction_id(&frame, idx);
            debug!(row = idx, transaction_id = ?id, missing = ?missing, "dropping row with missing critical field");
            issues.push(RowIssue {
                reason: IssueReason::MissingCriticalField,
                transaction_id: id,
                detail: missing.join(", "),
            });
            keep.push(false);
        }

        let filtered = filter_rows(&frame, &keep)?;
        Ok(StageOutput::new(filtered).with_issues(issues))
    }
}
