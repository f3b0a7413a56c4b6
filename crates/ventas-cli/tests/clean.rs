//! End-to-end runs of the `clean` command.

use std::fs;
use std::path::Path;

use ventas_cli::run::{CleanRequest, OutputOptions, SinkFormat, build_targets, run_clean};
use ventas_model::{CleaningRules, IssueReason, RunReport, SinkStatus};
use ventas_output::OutputTarget;

const RAW: &str = "\u{feff}ID Transaccion,Fecha,Cantidad,Precio Unitario,Descripcion Producto,Ciudad,Nombre Cliente,Notas
T1,15/03/2024,dos,$10.50,Laptop Model X,Málaga,ana lopez,N/A
T2,2024-01-05,1,250,Teclado Inalambrico,Sevilla,juan perez,entrega rapida
T1,15/03/2024,2,10.50,Laptop Model X,Malaga,ana lopez,
T3,NULL,1,5,Raton,Madrid,luis,
T4,2024-02-10,1,-5,Raton,Madrid,marta,
";

fn write_raw(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("ventas_sucias.csv");
    fs::write(&path, RAW).unwrap();
    path
}

fn request(input: std::path::PathBuf, targets: Vec<OutputTarget>) -> CleanRequest {
    CleanRequest {
        input,
        rules: CleaningRules::default(),
        targets,
        dry_run: false,
    }
}

#[test]
fn test_clean_writes_csv_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_raw(dir.path());
    let options = OutputOptions {
        output_dir: dir.path().join("salida"),
        ..OutputOptions::default()
    };
    let targets = build_targets(&[SinkFormat::Csv], &options);

    let result = run_clean(&request(input, targets)).unwrap();
    let report = &result.report;

    assert_eq!(report.rows_read, 5);
    assert_eq!(report.rows_clean, 2);
    assert_eq!(report.stages.len(), 9);
    let removed = report.removed_by_reason();
    assert_eq!(removed.get(&IssueReason::MissingCriticalField), Some(&1));
    assert_eq!(removed.get(&IssueReason::DuplicateKey), Some(&1));
    assert_eq!(removed.get(&IssueReason::NonPositivePrice), Some(&1));

    assert_eq!(report.sinks.len(), 1);
    assert_eq!(report.sinks[0].status, SinkStatus::Written);
    assert_eq!(report.sinks[0].rows, 2);
    assert!(!report.has_failures());

    let written = dir.path().join("salida").join("datos_limpios.csv");
    let loaded = ventas_report::load_cleaned(&written).unwrap();
    assert_eq!(loaded.height(), 2);
    let ids: Vec<Option<&str>> = loaded
        .column("id_transaccion")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(ids, [Some("T2"), Some("T1")]);
    let notas: Vec<Option<&str>> = loaded
        .column("notas")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(notas, [Some("Entrega Rapida"), Some("Sin Notas")]);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_raw(dir.path());
    let csv_path = dir.path().join("datos_limpios.csv");
    let mut request = request(
        input,
        vec![OutputTarget::Csv {
            path: csv_path.clone(),
        }],
    );
    request.dry_run = true;

    let result = run_clean(&request).unwrap();
    assert_eq!(result.frame.height(), 2);
    assert!(result.report.sinks.is_empty());
    assert!(!csv_path.exists());
}

#[test]
fn test_failed_sink_does_not_stop_others() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_raw(dir.path());
    let csv_path = dir.path().join("datos_limpios.csv");
    let targets = vec![
        OutputTarget::Sql {
            connection: "postgresql://usuario@localhost/ventas".to_string(),
            table: "transacciones_limpias".to_string(),
        },
        OutputTarget::Csv {
            path: csv_path.clone(),
        },
    ];

    let result = run_clean(&request(input, targets)).unwrap();
    assert!(result.report.has_failures());
    assert_eq!(result.report.failed_sinks(), 1);
    assert_eq!(result.report.sinks[1].status, SinkStatus::Written);
    assert!(csv_path.exists());
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_clean(&request(dir.path().join("no_existe.csv"), Vec::new())).unwrap_err();
    assert!(format!("{err:#}").contains("no_existe.csv"));
}

#[test]
fn test_run_report_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_raw(dir.path());
    let mut request = request(input, Vec::new());
    request.dry_run = true;

    let result = run_clean(&request).unwrap();
    let json_path = dir.path().join("reporte.json");
    result.report.write_json(&json_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["rows_read"], 5);
    assert_eq!(json["stages"][0]["stage"], "schema_normalizer");

    let round: RunReport = serde_json::from_value(json).unwrap();
    assert_eq!(round.rows_clean, 2);
}
