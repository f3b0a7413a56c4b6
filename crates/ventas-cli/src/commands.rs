use anyhow::{Context, Result};
use tracing::info;

use ventas_cli::run::{
    CleanRequest, CleanResult, OutputOptions, SinkFormat, build_targets, load_rules, run_clean,
};
use ventas_report::{derive_revenue, load_cleaned, summarize};

use crate::cli::{CleanArgs, ReportArgs, RulesArgs};
use crate::summary::{print_dashboard, print_run_summary};

pub fn run_clean_command(args: &CleanArgs) -> Result<CleanResult> {
    let rules = load_rules(args.rules.as_deref())?;
    let formats: Vec<SinkFormat> = if args.formats.is_empty() {
        vec![SinkFormat::Csv]
    } else {
        args.formats.iter().copied().map(SinkFormat::from).collect()
    };
    let options = OutputOptions {
        output_dir: args.output_dir.clone(),
        sheet_name: args.sheet_name.clone(),
        sql_url: args.sql_url.clone(),
        sql_table: args.sql_table.clone(),
        mongo_uri: args.mongo_uri.clone(),
        mongo_db: args.mongo_db.clone(),
        mongo_collection: args.mongo_collection.clone(),
    };
    let request = CleanRequest {
        input: args.input.clone(),
        rules,
        targets: build_targets(&formats, &options),
        dry_run: args.dry_run,
    };

    let result = run_clean(&request)?;
    print_run_summary(&result.report, args.dry_run);

    if let Some(path) = &args.report_json {
        result
            .report
            .write_json(path)
            .with_context(|| format!("write run report to {}", path.display()))?;
        info!(path = %path.display(), "run report written");
    }
    Ok(result)
}

pub fn run_report_command(args: &ReportArgs) -> Result<()> {
    let frame = load_cleaned(&args.input)
        .with_context(|| format!("load cleaned data from {}", args.input.display()))?;
    let frame = derive_revenue(frame).context("derive revenue")?;
    let summary = summarize(&frame).context("summarize cleaned data")?;
    print_dashboard(&summary);
    Ok(())
}

pub fn run_rules_command(args: &RulesArgs) -> Result<()> {
    let rules = load_rules(args.rules.as_deref())?;
    let toml = rules.to_toml_string().context("render rules")?;
    print!("{toml}");
    Ok(())
}
