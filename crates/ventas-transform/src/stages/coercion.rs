use chrono::NaiveDate;
use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use tracing::debug;
use ventas_common::{date_series, replace_column, string_values};
use ventas_model::{CleaningRules, StageKind};

use crate::normalization::{parse_date_with_formats, parse_price, parse_quantity};
use crate::stage::{Stage, StageOutput};

/// Retypes the date, quantity and price columns.
///
/// A value that cannot be parsed becomes null; the critical-field filter
/// decides what happens to its row.
pub struct TypeCoercion;

/// Parses every non-null value, counting conversions and failures.
fn coerce<T>(
    values: Vec<Option<String>>,
    parse: impl Fn(&str) -> Option<T>,
) -> (Vec<Option<T>>, usize, usize) {
    let mut converted = 0;
    let mut failed = 0;
    let parsed = values
        .into_iter()
        .map(|value| {
            let raw = value?;
            let result = parse(&raw);
            if result.is_some() {
                converted += 1;
            } else {
                failed += 1;
            }
            result
        })
        .collect();
    (parsed, converted, failed)
}

impl Stage for TypeCoercion {
    fn kind(&self) -> StageKind {
        StageKind::TypeCoercion
    }

    fn apply(&self, frame: DataFrame, rules: &CleaningRules) -> PolarsResult<StageOutput> {
        let mut frame = frame;
        let coercion = &rules.coercion;
        let mut changed = 0;

        if let Some(values) = string_values(&frame, &coercion.date_column) {
            let (dates, converted, failed): (Vec<Option<NaiveDate>>, _, _) =
                coerce(values, |raw| {
                    parse_date_with_formats(raw, &coercion.date_formats)
                });
            debug!(column = %coercion.date_column, converted, failed, "parsed dates");
            changed += converted;
            replace_column(&mut frame, date_series(&coercion.date_column, &dates)?)?;
        }

        if let Some(values) = string_values(&frame, &coercion.quantity_column) {
            let (quantities, converted, failed) =
                coerce(values, |raw| parse_quantity(raw, &coercion.quantity_words));
            debug!(column = %coercion.quantity_column, converted, failed, "parsed quantities");
            changed += converted;
            replace_column(
                &mut frame,
                Series::new(coercion.quantity_column.as_str().into(), quantities),
            )?;
        }

        if let Some(values) = string_values(&frame, &coercion.price_column) {
            let (prices, converted, failed) =
                coerce(values, |raw| parse_price(raw, &coercion.price_strip_chars));
            debug!(column = %coercion.price_column, converted, failed, "parsed prices");
            changed += converted;
            replace_column(
                &mut frame,
                Series::new(coercion.price_column.as_str().into(), prices),
            )?;
        }

        Ok(StageOutput::new(frame).with_values_changed(changed))
    }
}
