use std::io::Write;

use tempfile::NamedTempFile;
use ventas_common::column_value_string;
use ventas_ingest::{IngestError, read_sales_csv};

fn create_temp_csv(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn keeps_cells_verbatim() {
    let file = create_temp_csv(
        "ID Transaccion,Fecha,Precio Unitario,Notas\n\
         T1,15/03/2024,  $10.50 ,N/A\n\
         T2,,1.234,\n"
            .as_bytes(),
    );
    let df = read_sales_csv(file.path()).unwrap();

    assert_eq!(
        df.get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>(),
        vec!["ID Transaccion", "Fecha", "Precio Unitario", "Notas"]
    );
    assert_eq!(column_value_string(&df, "Precio Unitario", 0), "  $10.50 ");
    assert_eq!(column_value_string(&df, "Notas", 0), "N/A");
    let fecha = df.column("Fecha").unwrap().str().unwrap();
    assert_eq!(fecha.get(1), Some(""));
    assert_eq!(df.column("Notas").unwrap().null_count(), 0);
}

#[test]
fn strips_byte_order_mark() {
    let file = create_temp_csv("\u{feff}ID Transaccion,Fecha\nT1,2024-01-05\n".as_bytes());
    let df = read_sales_csv(file.path()).unwrap();
    assert_eq!(df.get_column_names()[0].as_str(), "ID Transaccion");
}

#[test]
fn quoted_fields_keep_commas() {
    let file = create_temp_csv(b"ID,Precio\nT1,\"1,200.00\"\n");
    let df = read_sales_csv(file.path()).unwrap();
    assert_eq!(column_value_string(&df, "Precio", 0), "1,200.00");
}

#[test]
fn ragged_rows_are_padded_and_truncated() {
    let file = create_temp_csv(b"A,B,C\n1\n1,2,3,4\n");
    let df = read_sales_csv(file.path()).unwrap();
    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 3);
    assert_eq!(column_value_string(&df, "C", 0), "");
    assert_eq!(column_value_string(&df, "C", 1), "3");
}

#[test]
fn repeated_headers_are_disambiguated() {
    let file = create_temp_csv(b"Notas,Fecha,Notas\na,2024-01-01,b\n");
    let df = read_sales_csv(file.path()).unwrap();
    assert_eq!(column_value_string(&df, "Notas", 0), "a");
    assert_eq!(column_value_string(&df, "Notas.1", 0), "b");
}

#[test]
fn header_only_file_has_no_rows() {
    let file = create_temp_csv(b"ID,Fecha\n");
    let df = read_sales_csv(file.path()).unwrap();
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 2);
}

#[test]
fn invalid_utf8_is_a_parse_error() {
    let file = create_temp_csv(b"ID,Ciudad\nT1,M\xe1laga\n");
    let result = read_sales_csv(file.path());
    assert!(matches!(result, Err(IngestError::CsvParse { .. })));
}
