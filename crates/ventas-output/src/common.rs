//! Helpers shared by the sinks.

use std::path::Path;

use polars::prelude::{DataFrame, DataType};
use ventas_model::columns::CURRENCY_COLUMNS;

use crate::error::{Result, SinkError};

/// Semantic kind of a column, inferred from its dtype and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Currency,
    Integer,
    Decimal,
    Boolean,
    Text,
}

impl ColumnKind {
    pub fn infer(name: &str, dtype: &DataType) -> Self {
        match dtype {
            DataType::Date => Self::Date,
            DataType::Boolean => Self::Boolean,
            dtype if dtype.is_float() && CURRENCY_COLUMNS.contains(&name) => Self::Currency,
            dtype if dtype.is_float() => Self::Decimal,
            dtype if dtype.is_integer() => Self::Integer,
            _ => Self::Text,
        }
    }
}

/// Column name and kind, in frame order.
pub fn column_kinds(df: &DataFrame) -> Vec<(String, ColumnKind)> {
    df.get_columns()
        .iter()
        .map(|column| {
            let name = column.name().to_string();
            let kind = ColumnKind::infer(&name, column.dtype());
            (name, kind)
        })
        .collect()
}

/// Display form of a canonical column name: `precio_unitario` -> `Precio Unitario`.
pub fn display_header(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rejects table/collection names outside `[A-Za-z0-9_]`.
pub fn validate_identifier(kind: &'static str, name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SinkError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

/// Creates the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| SinkError::io(parent, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_header() {
        assert_eq!(display_header("precio_unitario"), "Precio Unitario");
        assert_eq!(display_header("id_transaccion"), "Id Transaccion");
        assert_eq!(display_header("notas"), "Notas");
        assert_eq!(display_header("fecha_2"), "Fecha 2");
    }

    #[test]
    fn test_column_kind_inference() {
        assert_eq!(ColumnKind::infer("fecha", &DataType::Date), ColumnKind::Date);
        assert_eq!(
            ColumnKind::infer("precio_unitario", &DataType::Float64),
            ColumnKind::Currency
        );
        assert_eq!(ColumnKind::infer("ingresos", &DataType::Float64), ColumnKind::Currency);
        assert_eq!(ColumnKind::infer("peso", &DataType::Float64), ColumnKind::Decimal);
        assert_eq!(ColumnKind::infer("cantidad", &DataType::Int64), ColumnKind::Integer);
        assert_eq!(ColumnKind::infer("ciudad", &DataType::String), ColumnKind::Text);
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("table", "transacciones_limpias").is_ok());
        assert!(validate_identifier("table", "Ventas2024").is_ok());
        assert!(validate_identifier("table", "").is_err());
        assert!(validate_identifier("table", "ventas; DROP TABLE x").is_err());
        assert!(validate_identifier("table", "ventas-2024").is_err());
    }
}
