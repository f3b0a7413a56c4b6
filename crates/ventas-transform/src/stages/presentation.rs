use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use ventas_common::{is_string_column, replace_column, string_values};
use ventas_model::{CleaningRules, StageKind};

use crate::normalization::title_case;
use crate::stage::{Stage, StageOutput};

/// Applies display casing and replaces configured missing cells with their
/// display value (`Sin Notas` for `notas`).
pub struct PresentationFormatter;

impl Stage for PresentationFormatter {
    fn kind(&self) -> StageKind {
        StageKind::PresentationFormatter
    }

    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput> {
        let mut frame = frame;
        let presentation = &rules.presentation;
        let mut changed = 0;

        for column in &presentation.title_case_columns {
            if !is_string_column(&frame, column) {
                continue;
            }
            let Some(values) = string_values(&frame, column) else {
                continue;
            };
            let titled: Vec<Option<String>> = values
                .into_iter()
                .map(|value| {
                    value.map(|raw| {
                        let display = title_case(&raw);
                        if display != raw {
                            changed += 1;
                        }
                        display
                    })
                })
                .collect();
            replace_column(&mut frame, Series::new(column.as_str().into(), titled))?;
        }

        for (column, display) in &presentation.missing_display {
            if !is_string_column(&frame, column) {
                continue;
            }
            let Some(values) = string_values(&frame, column) else {
                continue;
            };
            if values.iter().all(Option::is_some) {
                continue;
            }
            let shown: Vec<String> = values
                .into_iter()
                .map(|value| {
                    value.unwrap_or_else(|| {
                        changed += 1;
                        display.clone()
                    })
                })
                .collect();
            replace_column(&mut frame, Series::new(column.as_str().into(), shown))?;
        }

        Ok(StageOutput::new(frame).with_values_changed(changed))
    }
}
