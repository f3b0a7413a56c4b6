mod common;

use std::fs;

use ventas_output::{DEFAULT_SHEET_NAME, SinkError, write_excel};

#[test]
fn test_excel_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datos_limpios.xlsx");

    let rows = write_excel(&common::cleaned_frame(), &path, DEFAULT_SHEET_NAME).unwrap();
    assert_eq!(rows, 3);

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_excel_rejects_invalid_sheet_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datos_limpios.xlsx");

    let err = write_excel(&common::cleaned_frame(), &path, "Datos[Limpios]").unwrap_err();
    assert!(matches!(err, SinkError::Spreadsheet { .. }));
    assert!(!path.exists());
}
