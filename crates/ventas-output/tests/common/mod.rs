//! Shared fixtures for sink tests.

#![allow(dead_code)]

use polars::prelude::{Column, DataFrame, DataType, NamedFrom};

/// A small cleaned table: text, date, integer, currency and nullable notes.
pub fn cleaned_frame() -> DataFrame {
    let fecha = Column::new(
        "fecha".into(),
        vec![Some(19797i32), None, Some(19724)],
    )
    .cast(&DataType::Date)
    .expect("cast fecha");
    DataFrame::new(vec![
        Column::new("id_transaccion".into(), vec!["T1", "T2", "T3"]),
        fecha,
        Column::new("cantidad".into(), vec![Some(2i64), Some(1), Some(10)]),
        Column::new("precio_unitario".into(), vec![10.5f64, 3.0, 1250.75]),
        Column::new(
            "notas".into(),
            vec![Some("Sin Notas"), None, Some("Envío, urgente")],
        ),
    ])
    .expect("build cleaned frame")
}

pub fn empty_frame() -> DataFrame {
    cleaned_frame().head(Some(0))
}
