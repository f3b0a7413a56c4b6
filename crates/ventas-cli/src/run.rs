//! The `clean` run: ingest, pipeline, sinks.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};
use ventas_ingest::read_sales_csv;
use ventas_model::{CleaningRules, RunReport};
use ventas_output::{
    DEFAULT_CSV_FILE, DEFAULT_EXCEL_FILE, DEFAULT_MONGO_DATABASE, DEFAULT_MONGO_URI,
    DEFAULT_SHEET_NAME, DEFAULT_TABLE, OutputTarget, SinkResult, write_outputs,
};
use ventas_transform::Pipeline;

/// Sink kinds selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SinkFormat {
    Csv,
    Excel,
    Sql,
    Mongo,
}

/// Destination settings shared by all sinks.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    pub sheet_name: String,
    /// Connection target; defaults to `<output_dir>/ventas.db`.
    pub sql_url: Option<String>,
    pub sql_table: String,
    pub mongo_uri: String,
    pub mongo_db: String,
    pub mongo_collection: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            sql_url: None,
            sql_table: DEFAULT_TABLE.to_string(),
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            mongo_db: DEFAULT_MONGO_DATABASE.to_string(),
            mongo_collection: DEFAULT_TABLE.to_string(),
        }
    }
}

/// Builds one target per distinct format, in the order given.
pub fn build_targets(formats: &[SinkFormat], options: &OutputOptions) -> Vec<OutputTarget> {
    let mut seen = Vec::new();
    let mut targets = Vec::new();
    for format in formats {
        if seen.contains(format) {
            continue;
        }
        seen.push(*format);
        targets.push(match format {
            SinkFormat::Csv => OutputTarget::Csv {
                path: options.output_dir.join(DEFAULT_CSV_FILE),
            },
            SinkFormat::Excel => OutputTarget::Excel {
                path: options.output_dir.join(DEFAULT_EXCEL_FILE),
                sheet_name: options.sheet_name.clone(),
            },
            SinkFormat::Sql => OutputTarget::Sql {
                connection: options.sql_url.clone().unwrap_or_else(|| {
                    format!("sqlite:///{}", options.output_dir.join("ventas.db").display())
                }),
                table: options.sql_table.clone(),
            },
            SinkFormat::Mongo => OutputTarget::Mongo {
                connection: options.mongo_uri.clone(),
                database: options.mongo_db.clone(),
                collection: options.mongo_collection.clone(),
            },
        });
    }
    targets
}

/// Loads rules from `path`, or the built-in defaults when absent.
pub fn load_rules(path: Option<&Path>) -> Result<CleaningRules> {
    match path {
        Some(path) => CleaningRules::from_toml_file(path)
            .with_context(|| format!("load cleaning rules from {}", path.display())),
        None => Ok(CleaningRules::default()),
    }
}

/// Everything the `clean` command needs.
#[derive(Debug, Clone)]
pub struct CleanRequest {
    pub input: PathBuf,
    pub rules: CleaningRules,
    pub targets: Vec<OutputTarget>,
    /// Run the pipeline but write nothing.
    pub dry_run: bool,
}

/// Cleaned table and the run diagnostics.
#[derive(Debug)]
pub struct CleanResult {
    pub frame: DataFrame,
    pub report: RunReport,
}

/// Reads the input, runs the standard pipeline and writes every target.
///
/// Sink failures are recorded in the report, never returned as `Err`.
pub fn run_clean(request: &CleanRequest) -> Result<CleanResult> {
    let span = info_span!("clean", input = %request.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let raw = read_sales_csv(&request.input)
        .with_context(|| format!("read input {}", request.input.display()))?;
    let mut report = RunReport::new(&request.input);
    report.rows_read = raw.height();

    let outcome = Pipeline::standard()
        .run(raw, &request.rules)
        .context("run cleaning pipeline")?;
    report.rows_clean = outcome.frame.height();
    report.stages = outcome.reports;

    if request.dry_run {
        info!("dry run: skipping {} sink(s)", request.targets.len());
    } else {
        let results = write_outputs(&outcome.frame, &request.targets);
        report.sinks = results.iter().map(SinkResult::summary).collect();
    }

    if report.has_failures() {
        warn!(failed = report.failed_sinks(), "some sinks failed");
    }
    info!(
        rows_read = report.rows_read,
        rows_clean = report.rows_clean,
        duration_ms = start.elapsed().as_millis(),
        "clean run complete"
    );
    Ok(CleanResult {
        frame: outcome.frame,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_targets_defaults() {
        let options = OutputOptions {
            output_dir: PathBuf::from("salida"),
            ..OutputOptions::default()
        };
        let targets = build_targets(&[SinkFormat::Csv, SinkFormat::Excel, SinkFormat::Csv], &options);
        assert_eq!(
            targets,
            vec![
                OutputTarget::Csv {
                    path: PathBuf::from("salida").join("datos_limpios.csv"),
                },
                OutputTarget::Excel {
                    path: PathBuf::from("salida").join("datos_limpios.xlsx"),
                    sheet_name: "Datos Limpios".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_build_targets_sql_and_mongo() {
        let options = OutputOptions {
            sql_url: Some("sqlite:///ventas.db".to_string()),
            ..OutputOptions::default()
        };
        let targets = build_targets(&[SinkFormat::Sql, SinkFormat::Mongo], &options);
        assert_eq!(
            targets[0],
            OutputTarget::Sql {
                connection: "sqlite:///ventas.db".to_string(),
                table: "transacciones_limpias".to_string(),
            }
        );
        assert_eq!(targets[1].destination(), "mi_base_de_datos.transacciones_limpias");
    }

    #[test]
    fn test_load_rules_default() {
        assert_eq!(load_rules(None).unwrap(), CleaningRules::default());
        assert!(load_rules(Some(Path::new("no/existe.toml"))).is_err());
    }
}
