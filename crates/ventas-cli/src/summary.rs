use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ventas_model::{IssueReason, RunReport, SinkStatus};
use ventas_report::DashboardSummary;

pub fn print_run_summary(report: &RunReport, dry_run: bool) {
    println!("Input: {}", report.source.display());
    println!(
        "Rows: {} read, {} clean",
        report.rows_read, report.rows_clean
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Removed"),
        header_cell("Changed"),
        header_cell("Missing"),
        header_cell("ms"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for stage in &report.stages {
        table.add_row(vec![
            Cell::new(stage.stage.display_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.rows_before),
            Cell::new(stage.rows_after),
            count_cell(stage.rows_removed(), Color::Yellow),
            count_cell(stage.values_changed, Color::Green),
            Cell::new(stage.total_missing_after()),
            dim_cell(stage.duration_ms),
        ]);
    }
    println!("{table}");

    print_removed_table(report);

    if dry_run {
        println!();
        println!("Dry run: no sink written.");
    } else {
        print_sink_table(report);
    }
}

fn print_removed_table(report: &RunReport) {
    let removed = report.removed_by_reason();
    if removed.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Reason"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (reason, count) in removed {
        table.add_row(vec![reason_cell(reason), Cell::new(count)]);
    }
    println!();
    println!("Removed rows:");
    println!("{table}");
}

fn print_sink_table(report: &RunReport) {
    if report.sinks.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sink"),
        header_cell("Destination"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for sink in &report.sinks {
        table.add_row(vec![
            Cell::new(&sink.sink).add_attribute(Attribute::Bold),
            Cell::new(&sink.destination),
            status_cell(sink.status),
            Cell::new(sink.rows),
            match &sink.message {
                Some(message) => Cell::new(message).fg(Color::Red),
                None => dim_cell("-"),
            },
        ]);
    }
    println!();
    println!("Sinks:");
    println!("{table}");
}

pub fn print_dashboard(summary: &DashboardSummary) {
    let period = match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => format!("{first} a {last}"),
        _ => "N/A".to_string(),
    };
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Transacciones Limpias"),
        Cell::new(summary.transactions),
    ]);
    table.add_row(vec![
        Cell::new("Ingresos Totales"),
        Cell::new(euros(summary.total_revenue)),
    ]);
    table.add_row(vec![
        Cell::new("Valor Promedio Trans."),
        Cell::new(euros(summary.average_transaction)),
    ]);
    table.add_row(vec![Cell::new("Periodo"), Cell::new(period)]);
    println!("{table}");

    if !summary.revenue_by_city.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Ciudad"), header_cell("Ingresos")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for entry in &summary.revenue_by_city {
            table.add_row(vec![Cell::new(&entry.name), Cell::new(euros(entry.total))]);
        }
        println!();
        println!("Ingresos por Ciudad:");
        println!("{table}");
    }

    if !summary.quantity_by_product.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Producto"), header_cell("Cantidad")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for entry in &summary.quantity_by_product {
            table.add_row(vec![Cell::new(&entry.name), Cell::new(entry.total)]);
        }
        println!();
        println!("Cantidad Vendida por Producto:");
        println!("{table}");
    }

    if !summary.revenue_by_month.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Mes"), header_cell("Ingresos")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for month in &summary.revenue_by_month {
            table.add_row(vec![Cell::new(month.label()), Cell::new(euros(month.revenue))]);
        }
        println!();
        println!("Ingresos Mensuales:");
        println!("{table}");
    }
}

/// `1234.5` -> `€1,234.50`.
fn euros(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::new();
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}€{grouped}.{frac_part}")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn reason_cell(reason: IssueReason) -> Cell {
    let color = match reason {
        IssueReason::DuplicateKey => Color::Yellow,
        IssueReason::MissingCriticalField
        | IssueReason::NonPositivePrice
        | IssueReason::NegativeQuantity => Color::Red,
    };
    Cell::new(reason.label()).fg(color)
}

fn status_cell(status: SinkStatus) -> Cell {
    match status {
        SinkStatus::Written => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        SinkStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euros() {
        assert_eq!(euros(0.0), "€0.00");
        assert_eq!(euros(1234.5), "€1,234.50");
        assert_eq!(euros(1_000_000.0), "€1,000,000.00");
        assert_eq!(euros(999.999), "€1,000.00");
        assert_eq!(euros(-12.0), "-€12.00");
    }
}
