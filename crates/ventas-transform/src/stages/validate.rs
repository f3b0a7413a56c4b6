use polars::prelude::{DataFrame, PolarsResult};
use tracing::warn;
use ventas_common::{any_to_f64, any_to_i64, filter_rows, format_numeric, redact_value};
use ventas_model::{CleaningRules, IssueReason, RowIssue, StageKind};

use super::{customer_name, transaction_id};
use crate::stage::{Stage, StageOutput};

/// Removes rows that break domain constraints.
///
/// A price of zero or below is one taxonomy (`NonPositivePrice`); a negative
/// quantity is `NegativeQuantity`. Each removed row is logged before removal.
pub struct Validator;

fn violation(frame: &DataFrame, rules: &CleaningRules, idx: usize) -> Option<(IssueReason, String)> {
    let price = frame
        .column(&rules.coercion.price_column)
        .ok()
        .and_then(|column| column.get(idx).ok())
        .and_then(any_to_f64);
    if let Some(price) = price
        && price <= 0.0
    {
        return Some((IssueReason::NonPositivePrice, format_numeric(price)));
    }
    let quantity = frame
        .column(&rules.coercion.quantity_column)
        .ok()
        .and_then(|column| column.get(idx).ok())
        .and_then(any_to_i64);
    match quantity {
        Some(quantity) if quantity < 0 => {
            Some((IssueReason::NegativeQuantity, quantity.to_string()))
        }
        _ => None,
    }
}

impl Stage for Validator {
    fn kind(&self) -> StageKind {
        StageKind::Validator
    }

    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput> {
        let mut keep = Vec::with_capacity(frame.height());
        let mut issues = Vec::new();
        for idx in 0..frame.height() {
            let Some((reason, value)) = violation(&frame, rules, idx) else {
                keep.push(true);
                continue;
            };
            let id = transaction_id(&frame, idx);
            let customer = customer_name(&frame, idx);
            warn!(
                transaction_id = id.as_deref().unwrap_or(""),
                value = %value,
                customer = redact_value(&customer),
                reason = %reason,
                "removing invalid row"
            );
            issues.push(RowIssue {
                reason,
                transaction_id: id,
                detail: value,
            });
            keep.push(false);
        }

        let valid = if issues.is_empty() {
            frame
        } else {
            filter_rows(&frame, &keep)?
        };
        Ok(StageOutput::new(valid).with_issues(issues))
    }
}
