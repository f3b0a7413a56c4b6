use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use tracing::debug;
use ventas_common::{is_string_column, replace_column, string_values};
use ventas_model::{CleaningRules, StageKind};

use crate::normalization::sanitize_text;
use crate::stage::{Stage, StageOutput};

/// Replaces known variants with their canonical value, column by column.
///
/// Unmapped values pass through. Synonym keys are sanitized like the cells
/// they are matched against, so `"Málaga"` in a rules file still matches.
pub struct CategoricalStandardizer;

impl Stage for CategoricalStandardizer {
    fn kind(&self) -> StageKind {
        StageKind::CategoricalStandardizer
    }

    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput> {
        let mut frame = frame;
        let mut changed = 0;
        for (column, synonyms) in &rules.categorical {
            if !is_string_column(&frame, column) {
                continue;
            }
            let Some(values) = string_values(&frame, column) else {
                continue;
            };
            let lookup: BTreeMap<String, &str> = synonyms
                .iter()
                .map(|(variant, canonical)| (sanitize_text(variant), canonical.as_str()))
                .collect();
            let standardized: Vec<Option<String>> = values
                .into_iter()
                .map(|value| {
                    value.map(|raw| match lookup.get(&raw) {
                        Some(canonical) if *canonical != raw => {
                            changed += 1;
                            (*canonical).to_string()
                        }
                        _ => raw,
                    })
                })
                .collect();
            let distinct = standardized
                .iter()
                .flatten()
                .collect::<BTreeSet<_>>()
                .len();
            debug!(column = %column, distinct, "standardized categorical column");
            replace_column(&mut frame, Series::new(column.as_str().into(), standardized))?;
        }
        Ok(StageOutput::new(frame).with_values_changed(changed))
    }
}
