use std::collections::BTreeSet;

use polars::prelude::{DataFrame, PolarsResult};
use tracing::{debug, warn};
use ventas_common::{filter_rows, has_column, string_values};
use ventas_model::{CleaningRules, IssueReason, RowIssue, StageKind};

use super::transaction_id;
use crate::stage::{Stage, StageOutput};

/// Keeps the first row for each business key.
///
/// The key is the configured key columns when all of them exist, otherwise
/// the whole row. Nulls compare equal to each other.
pub struct Deduplicator;

fn key_columns(frame: &DataFrame, rules: &CleaningRules) -> Vec<String> {
    let key = &rules.dedupe.key;
    if !key.is_empty() && key.iter().all(|name| has_column(frame, name)) {
        return key.clone();
    }
    warn!(key = ?key, "business key not found, deduplicating on whole rows");
    frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

impl Stage for Deduplicator {
    fn kind(&self) -> StageKind {
        StageKind::Deduplicator
    }

    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput> {
        if frame.height() == 0 {
            return Ok(StageOutput::new(frame));
        }
        let columns: Vec<Vec<Option<String>>> = key_columns(&frame, rules)
            .iter()
            .filter_map(|name| string_values(&frame, name))
            .collect();

        let mut seen = BTreeSet::new();
        let mut keep = Vec::with_capacity(frame.height());
        let mut issues = Vec::new();
        for idx in 0..frame.height() {
            let key: Vec<Option<String>> =
                columns.iter().map(|values| values[idx].clone()).collect();
            if seen.contains(&key) {
                let detail = key
                    .iter()
                    .map(|part| part.as_deref().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("|");
                let id = transaction_id(&frame, idx);
                debug!(row = idx, transaction_id = ?id, "dropping duplicate row");
                issues.push(RowIssue {
                    reason: IssueReason::DuplicateKey,
                    transaction_id: id,
                    detail,
                });
                keep.push(false);
            } else {
                seen.insert(key);
                keep.push(true);
            }
        }

        let deduped = filter_rows(&frame, &keep)?;
        Ok(StageOutput::new(deduped).with_issues(issues))
    }
}
