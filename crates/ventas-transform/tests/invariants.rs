use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, NamedFrom};
use proptest::prelude::*;
use ventas_common::{any_to_date, column_value_string};
use ventas_model::CleaningRules;
use ventas_transform::clean;

const HEADERS: [&str; 6] = [
    "ID Transaccion",
    "Fecha",
    "Cantidad",
    "Precio Unitario",
    "Nombre Cliente",
    "Notas",
];

fn raw_row() -> impl Strategy<Value = Vec<&'static str>> {
    (
        prop::sample::select(vec!["T1", "T2", "T3", "t1", "T4 ", "N/A", "", "--"]),
        prop::sample::select(vec![
            "2024-03-15",
            "15/03/2024",
            "01/02/2024",
            "2024/02/29",
            "Mar 15, 24",
            "Dec 01 2023",
            "31/02/2024",
            "ayer",
            "null",
        ]),
        prop::sample::select(vec!["1", "2", "dos", "uno", "0", "-3", "2.5", "abc", "na"]),
        prop::sample::select(vec![
            "$10.50", "10", "-5", "0", "0.01", "1,200.00", "gratis", " 3 ", "N/A",
        ]),
        prop::sample::select(vec!["ana lópez", "  LUIS  ", "", "n/a"]),
        prop::sample::select(vec!["ok", "N/A", "", "entrega  urgente"]),
    )
        .prop_map(|(id, fecha, cantidad, precio, cliente, notas)| {
            vec![id, fecha, cantidad, precio, cliente, notas]
        })
}

fn raw_frame(rows: &[Vec<&str>]) -> DataFrame {
    let columns = HEADERS
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let values: Vec<String> = rows.iter().map(|row| row[idx].to_string()).collect();
            Column::new((*header).into(), values)
        })
        .collect();
    DataFrame::new(columns).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn cleaned_table_holds_invariants(rows in prop::collection::vec(raw_row(), 0..25)) {
        let outcome = clean(raw_frame(&rows), &CleaningRules::default()).unwrap();
        let df = &outcome.frame;

        let prices = df.column("precio_unitario").unwrap().f64().unwrap();
        let quantities = df.column("cantidad").unwrap().i64().unwrap();
        let fechas = df.column("fecha").unwrap();

        let mut seen = BTreeSet::new();
        let mut previous = None;
        for idx in 0..df.height() {
            let price = prices.get(idx);
            prop_assert!(price.is_some_and(|p| p > 0.0));
            let quantity = quantities.get(idx);
            prop_assert!(quantity.is_some_and(|q| q >= 0));

            let id = column_value_string(df, "id_transaccion", idx);
            prop_assert!(!id.is_empty());
            prop_assert!(seen.insert(id));

            let fecha = any_to_date(fechas.get(idx).unwrap());
            prop_assert!(fecha.is_some());
            prop_assert!(previous <= fecha);
            previous = fecha;

            prop_assert_ne!(column_value_string(df, "notas", idx), "");
        }

        let removed: usize = outcome.reports.iter().map(|r| r.issues.len()).sum();
        prop_assert_eq!(removed + df.height(), rows.len());
    }
}
