use polars::prelude::{DataFrame, DataType, NamedFrom, PolarsResult, Series};
use ventas_common::{is_string_column, null_counts, replace_column, string_values};
use ventas_model::{CleaningRules, StageKind};

use crate::stage::{Stage, StageOutput};

/// Turns sentinel tokens into nulls, then applies the per-column fills.
///
/// The reported "before" counts are taken between the two steps.
pub struct MissingValueResolver;

impl Stage for MissingValueResolver {
    fn kind(&self) -> StageKind {
        StageKind::MissingValueResolver
    }

    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput> {
        let mut frame = frame;
        let policy = &rules.missing;

        let text_columns: Vec<String> = frame
            .get_columns()
            .iter()
            .filter(|column| column.dtype() == &DataType::String)
            .map(|column| column.name().to_string())
            .collect();

        let mut changed = 0;
        for name in &text_columns {
            let Some(values) = string_values(&frame, name) else {
                continue;
            };
            let resolved: Vec<Option<String>> = values
                .into_iter()
                .map(|value| {
                    value.filter(|raw| {
                        let sentinel = policy.is_sentinel(raw);
                        if sentinel {
                            changed += 1;
                        }
                        !sentinel
                    })
                })
                .collect();
            replace_column(&mut frame, Series::new(name.as_str().into(), resolved))?;
        }
        let after_sentinels = null_counts(&frame);

        for (column, default) in &policy.fill {
            if !is_string_column(&frame, column) {
                continue;
            }
            let Some(values) = string_values(&frame, column) else {
                continue;
            };
            let filled: Vec<String> = values
                .into_iter()
                .map(|value| {
                    value.unwrap_or_else(|| {
                        changed += 1;
                        default.clone()
                    })
                })
                .collect();
            replace_column(&mut frame, Series::new(column.as_str().into(), filled))?;
        }

        Ok(StageOutput::new(frame)
            .with_values_changed(changed)
            .with_missing_before(after_sentinels))
    }
}
