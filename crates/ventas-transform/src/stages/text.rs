use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use tracing::debug;
use ventas_common::{is_string_column, replace_column, string_values};
use ventas_model::{CleaningRules, StageKind};

use crate::normalization::sanitize_text;
use crate::stage::{Stage, StageOutput};

/// Trims, lowercases and collapses whitespace in the configured text columns.
///
/// Columns absent from the frame are skipped.
pub struct TextSanitizer;

impl Stage for TextSanitizer {
    fn kind(&self) -> StageKind {
        StageKind::TextSanitizer
    }

    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput> {
        let mut frame = frame;
        let mut changed = 0;
        for column in &rules.text.columns {
            if !is_string_column(&frame, column) {
                debug!(column = %column, "text column not present, skipping");
                continue;
            }
            let Some(values) = string_values(&frame, column) else {
                continue;
            };
            let cleaned: Vec<Option<String>> = values
                .into_iter()
                .map(|value| {
                    value.map(|raw| {
                        let sanitized = sanitize_text(&raw);
                        if sanitized != raw {
                            changed += 1;
                        }
                        sanitized
                    })
                })
                .collect();
            replace_column(&mut frame, Series::new(column.as_str().into(), cleaned))?;
        }
        Ok(StageOutput::new(frame).with_values_changed(changed))
    }
}
