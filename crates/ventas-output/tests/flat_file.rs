mod common;

use std::fs;

use ventas_output::flat_file::UTF8_BOM;
use ventas_output::{OutputTarget, SinkError, write_csv, write_csv_rows, write_output};

#[test]
fn test_csv_output_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datos_limpios.csv");

    let rows = write_csv(&common::cleaned_frame(), &path).unwrap();
    assert_eq!(rows, 3);

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    insta::assert_snapshot!("cleaned_csv", text.trim_end());
}

#[test]
fn test_csv_rows_have_no_bom() {
    let mut buffer = Vec::new();
    write_csv_rows(&common::cleaned_frame(), &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("id_transaccion,fecha,cantidad,precio_unitario,notas\n"));
    assert!(text.contains("T2,,1,3,\n"));
}

#[test]
fn test_csv_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("salida").join("datos_limpios.csv");
    write_csv(&common::cleaned_frame(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_empty_frame_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datos_limpios.csv");
    let target = OutputTarget::Csv { path: path.clone() };

    let err = write_output(&common::empty_frame(), &target).unwrap_err();
    assert!(matches!(err, SinkError::EmptyFrame { sink: "csv" }));
    assert!(!path.exists());
}
