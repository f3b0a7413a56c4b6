//! Relational table sink (SQLite).
//!
//! The table is dropped and recreated on every run; all rows go in inside a
//! single transaction.

use std::path::PathBuf;

use polars::prelude::DataFrame;
#[cfg(feature = "sql")]
use polars::prelude::AnyValue;

use crate::common::validate_identifier;
#[cfg(feature = "sql")]
use crate::common::{ColumnKind, column_kinds};
use crate::error::{Result, SinkError};

/// Resolves a connection target to a database file path.
///
/// Accepts `sqlite:///path`, `sqlite://path` or a plain path. Any other
/// `scheme://` is rejected.
pub fn sqlite_path(connection: &str) -> Result<PathBuf> {
    let trimmed = connection.trim();
    let path = if let Some(rest) = trimmed.strip_prefix("sqlite:///") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("sqlite://") {
        rest
    } else if trimmed.contains("://") {
        return Err(SinkError::UnsupportedConnection {
            target: connection.to_string(),
        });
    } else {
        trimmed
    };
    if path.is_empty() {
        return Err(SinkError::UnsupportedConnection {
            target: connection.to_string(),
        });
    }
    Ok(PathBuf::from(path))
}

#[cfg_attr(not(feature = "sql"), allow(dead_code))]
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(feature = "sql")]
fn sql_type(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Integer | ColumnKind::Boolean => "INTEGER",
        ColumnKind::Currency | ColumnKind::Decimal => "REAL",
        ColumnKind::Date | ColumnKind::Text => "TEXT",
    }
}

#[cfg(feature = "sql")]
fn sql_value(value: AnyValue<'_>, kind: ColumnKind) -> rusqlite::types::Value {
    use rusqlite::types::Value;
    use ventas_common::{any_to_f64, any_to_i64, any_to_string};

    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Integer(i64::from(b)),
        other => match kind {
            ColumnKind::Integer => any_to_i64(other).map_or(Value::Null, Value::Integer),
            ColumnKind::Currency | ColumnKind::Decimal => {
                any_to_f64(other).map_or(Value::Null, Value::Real)
            }
            _ => Value::Text(any_to_string(other)),
        },
    }
}

/// Replaces `table` in the database named by `connection` with the frame.
///
/// Returns the number of rows inserted.
#[cfg(feature = "sql")]
pub fn write_sql(df: &DataFrame, connection: &str, table: &str) -> Result<usize> {
    use rusqlite::{Connection, params_from_iter};

    validate_identifier("table", table)?;
    let path = sqlite_path(connection)?;
    crate::common::ensure_parent_dir(&path)?;
    let sql_error = |source: rusqlite::Error| SinkError::Sql {
        table: table.to_string(),
        source,
    };

    let kinds = column_kinds(df);
    let quoted_table = quote_identifier(table);
    let definitions: Vec<String> = kinds
        .iter()
        .map(|(name, kind)| format!("{} {}", quote_identifier(name), sql_type(*kind)))
        .collect();
    let names: Vec<String> = kinds.iter().map(|(name, _)| quote_identifier(name)).collect();
    let placeholders = vec!["?"; kinds.len()].join(", ");

    let mut conn = Connection::open(&path).map_err(sql_error)?;
    let tx = conn.transaction().map_err(sql_error)?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {quoted_table};\nCREATE TABLE {quoted_table} ({});",
        definitions.join(", ")
    ))
    .map_err(sql_error)?;

    {
        let mut stmt = tx
            .prepare(&format!(
                "INSERT INTO {quoted_table} ({}) VALUES ({placeholders})",
                names.join(", ")
            ))
            .map_err(sql_error)?;
        let columns = df.get_columns();
        for idx in 0..df.height() {
            let mut row = Vec::with_capacity(columns.len());
            for (column, (_, kind)) in columns.iter().zip(&kinds) {
                row.push(sql_value(column.get(idx)?, *kind));
            }
            stmt.execute(params_from_iter(row)).map_err(sql_error)?;
        }
    }

    tx.commit().map_err(sql_error)?;
    Ok(df.height())
}

#[cfg(not(feature = "sql"))]
pub fn write_sql(_df: &DataFrame, connection: &str, table: &str) -> Result<usize> {
    validate_identifier("table", table)?;
    sqlite_path(connection)?;
    Err(SinkError::Unavailable {
        sink: "sql",
        feature: "sql",
    })
}
