use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use hours_cli::pipeline::describe_counts;
use hours_cli::types::{CheckResult, CleanResult, ParseResult};
use hours_model::{CleansingError, Stage};
use hours_output::render_record;

/// Errors listed inline; the rest are only in the error report.
const MAX_LISTED_ERRORS: usize = 25;

pub fn print_clean_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.output_path {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.error_report_path {
        println!("Error report: {}", path.display());
    }
    if let Some(path) = &result.manifest_path {
        println!("Manifest: {}", path.display());
    }
    println!(
        "Extractor: {} | time format: {}",
        result.extractor, result.time_format
    );

    let report = &result.report;
    let counts = &report.counts;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Programs"),
        header_cell("Succeeded"),
        header_cell("Failed"),
        header_cell("Empty"),
        header_cell("Skipped"),
        header_cell("Rows"),
        header_cell("Errors"),
        header_cell("Notices"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(counts.total).add_attribute(Attribute::Bold),
        count_cell(counts.succeeded, Color::Green),
        count_cell(counts.failed, Color::Red),
        dim_cell(counts.empty),
        count_cell(report.skipped, Color::Yellow),
        Cell::new(report.rows.len()),
        count_cell(report.errors.len(), Color::Red),
        count_cell(report.notices.len(), Color::Yellow),
    ]);
    println!("{table}");
    if report.cancelled {
        eprintln!("Run interrupted: {} programs not started.", report.skipped);
    }
    print_error_table(&report.errors);
    println!("{}", describe_counts(counts));
}

fn print_error_table(errors: &[CleansingError]) {
    if errors.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Program"),
        header_cell("Row"),
        header_cell("Stage"),
        header_cell("Message"),
    ]);
    apply_error_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for error in errors.iter().take(MAX_LISTED_ERRORS) {
        table.add_row(vec![
            Cell::new(&error.program_id).fg(Color::Cyan),
            Cell::new(error.row_number),
            stage_cell(error.stage),
            Cell::new(&error.message),
        ]);
    }
    println!();
    println!("Errors:");
    println!("{table}");
    if errors.len() > MAX_LISTED_ERRORS {
        println!(
            "... {} more in the error report",
            errors.len() - MAX_LISTED_ERRORS
        );
    }
}

pub fn print_check_summary(result: &CheckResult) {
    println!("Input: {}", result.input.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Result")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Required columns"),
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Unique program ids"),
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Programs"), Cell::new(result.programs)]);
    table.add_row(vec![
        Cell::new("Blank hours"),
        count_cell(result.blank_hours, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Uncleaned column"),
        Cell::new(&result.uncleaned_column),
    ]);
    let pass_through = if result.pass_through.is_empty() {
        "-".to_string()
    } else {
        result.pass_through.join(", ")
    };
    table.add_row(vec![Cell::new("Pass-through"), Cell::new(pass_through)]);
    println!("{table}");
}

pub fn print_parse_result(result: &ParseResult) {
    let outcome = &result.outcome;
    if !outcome.rows.is_empty() {
        let mut table = Table::new();
        // The program id column is meaningless for a single string.
        let headers: Vec<Cell> = result.layout.headers()[1..]
            .iter()
            .map(|header| header_cell(header.trim_start_matches("Hours ")))
            .collect();
        table.set_header(headers);
        apply_table_style(&mut table);
        for row in &outcome.rows {
            let record = render_record(&result.layout, row, result.time_format);
            table.add_row(record.into_iter().skip(1).map(Cell::new).collect::<Vec<_>>());
        }
        println!("{table}");
    } else {
        println!("No rows.");
    }
    for notice in &outcome.notices {
        eprintln!("note: {}", notice.message);
    }
    for error in &outcome.errors {
        eprintln!("error [{}]: {}", error.stage, error.message);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_error_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(15)),
            ColumnConstraint::UpperBoundary(Width::Percentage(65)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn stage_cell(stage: Stage) -> Cell {
    match stage {
        Stage::Extraction => Cell::new("EXTRACT").fg(Color::Red),
        Stage::Normalization => Cell::new("NORMALIZE").fg(Color::Yellow),
        Stage::Validation => Cell::new("VALIDATE").fg(Color::Magenta),
    }
}
