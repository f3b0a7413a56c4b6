use std::fs;

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, DataType, NamedFrom};
use ventas_report::{ReportError, derive_revenue, load_cleaned, summarize};

fn cleaned_frame() -> DataFrame {
    let fecha = Column::new(
        "fecha".into(),
        vec![Some(19724i32), Some(19740), Some(19797), Some(19800)],
    )
    .cast(&DataType::Date)
    .unwrap();
    DataFrame::new(vec![
        Column::new("id_transaccion".into(), vec!["T1", "T2", "T3", "T4"]),
        fecha,
        Column::new("cantidad".into(), vec![2i64, 1, 3, 1]),
        Column::new("precio_unitario".into(), vec![10.0f64, 250.0, 10.0, 40.0]),
        Column::new(
            "descripcion_producto".into(),
            vec!["Teclado", "Monitor", "Teclado", "Raton"],
        ),
        Column::new("ciudad".into(), vec!["Madrid", "Sevilla", "Madrid", "Bilbao"]),
    ])
    .unwrap()
}

#[test]
fn test_dashboard_over_flat_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datos_limpios.csv");
    ventas_output::write_csv(&cleaned_frame(), &path).unwrap();

    let df = derive_revenue(load_cleaned(&path).unwrap()).unwrap();
    assert_eq!(df.column("fecha").unwrap().dtype(), &DataType::Date);
    assert_eq!(df.column("cantidad").unwrap().dtype(), &DataType::Int64);

    let summary = summarize(&df).unwrap();
    assert_eq!(summary.transactions, 4);
    assert_eq!(summary.total_revenue, 20.0 + 250.0 + 30.0 + 40.0);
    assert_eq!(summary.average_transaction, 340.0 / 4.0);
    assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2024, 1, 2));
    assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2024, 3, 18));

    let cities: Vec<(&str, f64)> = summary
        .revenue_by_city
        .iter()
        .map(|entry| (entry.name.as_str(), entry.total))
        .collect();
    assert_eq!(cities, [("Sevilla", 250.0), ("Madrid", 50.0), ("Bilbao", 40.0)]);

    let products: Vec<(&str, i64)> = summary
        .quantity_by_product
        .iter()
        .map(|entry| (entry.name.as_str(), entry.total))
        .collect();
    assert_eq!(products, [("Teclado", 5), ("Monitor", 1), ("Raton", 1)]);

    let months: Vec<(String, f64)> = summary
        .revenue_by_month
        .iter()
        .map(|month| (month.label(), month.revenue))
        .collect();
    assert_eq!(
        months,
        [
            ("2024-01".to_string(), 270.0),
            ("2024-02".to_string(), 0.0),
            ("2024-03".to_string(), 70.0),
        ]
    );
}

#[test]
fn test_empty_table_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datos_limpios.csv");
    fs::write(&path, "\u{feff}id_transaccion,fecha,cantidad,precio_unitario\n").unwrap();

    let df = derive_revenue(load_cleaned(&path).unwrap()).unwrap();
    let summary = summarize(&df).unwrap();
    assert_eq!(summary.transactions, 0);
    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.average_transaction, 0.0);
    assert_eq!(summary.first_date, None);
    assert!(summary.revenue_by_month.is_empty());
}

#[test]
fn test_revenue_requires_both_columns() {
    let df = cleaned_frame().drop("precio_unitario").unwrap();
    let df = derive_revenue(df).unwrap();
    assert!(df.column("ingresos").is_err());
    assert_eq!(summarize(&df).unwrap().total_revenue, 0.0);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_cleaned(&dir.path().join("no_existe.csv")).unwrap_err();
    assert!(matches!(err, ReportError::Ingest(_)));
}
