//! Loading the flat-file output back into a typed frame.

use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::{DataFrame, DataType, IntoLazy, NamedFrom, PolarsResult, Series, col};
use tracing::{debug, info};
use ventas_common::{date_series, has_column, parse_f64, replace_column, string_values};
use ventas_ingest::read_sales_csv;
use ventas_model::columns::{CANTIDAD, FECHA, INGRESOS, PRECIO_UNITARIO};

use crate::error::Result;

/// Reads a cleaned CSV and restores the column types the sinks wrote.
///
/// `fecha` is parsed as ISO `YYYY-MM-DD`, `cantidad` as an integer and
/// `precio_unitario` as a decimal. Cells that do not parse become null.
pub fn load_cleaned(path: &Path) -> Result<DataFrame> {
    let mut df = read_sales_csv(path)?;

    if let Some(values) = string_values(&df, FECHA) {
        let dates: Vec<Option<NaiveDate>> = values
            .iter()
            .map(|value| {
                value
                    .as_deref()
                    .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
            })
            .collect();
        replace_column(&mut df, date_series(FECHA, &dates)?)?;
    }

    if let Some(values) = string_values(&df, CANTIDAD) {
        let quantities: Vec<Option<i64>> = values
            .iter()
            .map(|value| value.as_deref().and_then(parse_whole))
            .collect();
        replace_column(&mut df, Series::new(CANTIDAD.into(), quantities))?;
    }

    if let Some(values) = string_values(&df, PRECIO_UNITARIO) {
        let prices: Vec<Option<f64>> = values
            .iter()
            .map(|value| value.as_deref().and_then(parse_f64))
            .collect();
        replace_column(&mut df, Series::new(PRECIO_UNITARIO.into(), prices))?;
    }

    info!(path = %path.display(), rows = df.height(), "loaded cleaned data");
    Ok(df)
}

fn parse_whole(value: &str) -> Option<i64> {
    parse_f64(value)
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
}

/// Adds `ingresos = cantidad * precio_unitario` when both columns exist.
pub fn derive_revenue(df: DataFrame) -> PolarsResult<DataFrame> {
    if !(has_column(&df, CANTIDAD) && has_column(&df, PRECIO_UNITARIO)) {
        debug!("revenue not derived: quantity or price column absent");
        return Ok(df);
    }
    df.lazy()
        .with_columns([(col(CANTIDAD).cast(DataType::Float64)
            * col(PRECIO_UNITARIO).cast(DataType::Float64))
        .alias(INGRESOS)])
        .collect()
}
