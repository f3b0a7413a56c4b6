//! CLI argument definitions for the sales ETL.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ventas_cli::run::SinkFormat;
use ventas_output::{
    DEFAULT_CSV_FILE, DEFAULT_MONGO_DATABASE, DEFAULT_MONGO_URI, DEFAULT_SHEET_NAME,
    DEFAULT_TABLE,
};

#[derive(Parser)]
#[command(
    name = "ventas",
    version,
    about = "Sales ETL - clean a raw sales export and load it into CSV, Excel, SQL or MongoDB",
    long_about = "Clean a raw sales transaction export.\n\n\
                  Normalizes headers, resolves missing values, coerces dates and numbers,\n\
                  drops invalid and duplicate rows, then writes the cleaned table to\n\
                  one or more sinks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow customer names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a raw export and write the result to the selected sinks.
    Clean(CleanArgs),

    /// Show dashboard metrics for a cleaned CSV.
    Report(ReportArgs),

    /// Print the effective cleaning rules as TOML.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Raw sales export (comma-delimited, header row).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Cleaning rules file (TOML). Missing keys keep their defaults.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Sink to write; repeat for several (default: csv).
    #[arg(long = "format", value_enum)]
    pub formats: Vec<SinkFormatArg>,

    /// Directory for file sinks.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Worksheet name for the excel sink.
    #[arg(long = "sheet-name", default_value = DEFAULT_SHEET_NAME)]
    pub sheet_name: String,

    /// SQL connection target (sqlite:///path). Default: <DIR>/ventas.db.
    #[arg(long = "sql-url", value_name = "URL")]
    pub sql_url: Option<String>,

    /// Table replaced by the sql sink.
    #[arg(long = "sql-table", default_value = DEFAULT_TABLE)]
    pub sql_table: String,

    /// MongoDB connection string.
    #[arg(long = "mongo-uri", default_value = DEFAULT_MONGO_URI)]
    pub mongo_uri: String,

    /// MongoDB database.
    #[arg(long = "mongo-db", default_value = DEFAULT_MONGO_DATABASE)]
    pub mongo_db: String,

    /// Collection replaced by the mongo sink.
    #[arg(long = "mongo-collection", default_value = DEFAULT_TABLE)]
    pub mongo_collection: String,

    /// Write the run report (stages, dropped rows, sinks) as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Run the pipeline and print the summary without writing any sink.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Cleaned CSV produced by `ventas clean`.
    #[arg(value_name = "CLEANED_CSV", default_value = DEFAULT_CSV_FILE)]
    pub input: PathBuf,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Rules file to merge over the defaults before printing.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SinkFormatArg {
    Csv,
    Excel,
    Sql,
    Mongo,
}

impl From<SinkFormatArg> for SinkFormat {
    fn from(value: SinkFormatArg) -> Self {
        match value {
            SinkFormatArg::Csv => SinkFormat::Csv,
            SinkFormatArg::Excel => SinkFormat::Excel,
            SinkFormatArg::Sql => SinkFormat::Sql,
            SinkFormatArg::Mongo => SinkFormat::Mongo,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
