#![cfg(feature = "sql")]

mod common;

use rusqlite::Connection;
use ventas_output::{SinkError, write_sql};

fn connection_for(path: &std::path::Path) -> String {
    format!("sqlite:///{}", path.display())
}

#[test]
fn test_sql_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ventas.db");

    let rows = write_sql(
        &common::cleaned_frame(),
        &connection_for(&db),
        "transacciones_limpias",
    )
    .unwrap();
    assert_eq!(rows, 3);

    let conn = Connection::open(&db).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transacciones_limpias", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(count, 3);

    let (fecha, cantidad, precio): (String, i64, f64) = conn
        .query_row(
            "SELECT fecha, cantidad, precio_unitario FROM transacciones_limpias \
             WHERE id_transaccion = 'T1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(fecha, "2024-03-15");
    assert_eq!(cantidad, 2);
    assert_eq!(precio, 10.5);

    let notas: Option<String> = conn
        .query_row(
            "SELECT notas FROM transacciones_limpias WHERE id_transaccion = 'T2'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(notas, None);
}

#[test]
fn test_sql_replaces_existing_table() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ventas.db");
    let connection = connection_for(&db);

    write_sql(&common::cleaned_frame(), &connection, "ventas").unwrap();
    let smaller = common::cleaned_frame().head(Some(1));
    write_sql(&smaller, &connection, "ventas").unwrap();

    let conn = Connection::open(&db).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM ventas", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_sql_rejects_invalid_table_name() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ventas.db");

    let err = write_sql(
        &common::cleaned_frame(),
        &connection_for(&db),
        "ventas; DROP TABLE x",
    )
    .unwrap_err();
    assert!(matches!(err, SinkError::InvalidIdentifier { .. }));
    assert!(!db.exists());
}

#[test]
fn test_sql_rejects_unsupported_scheme() {
    let err = write_sql(
        &common::cleaned_frame(),
        "postgresql://usuario@localhost/ventas",
        "ventas",
    )
    .unwrap_err();
    assert!(matches!(err, SinkError::UnsupportedConnection { .. }));
}
