use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use csvx_ingest::{CellValue, column_cells, column_names};
use csvx_report::ColumnProfile;

use csvx_cli::inspect::{FileInfo, InspectReport};

pub fn print_file_info(file: &FileInfo) {
    println!("File: {}", file.name);
    println!("File size: {}", file.size_label);
}

pub fn print_report(report: &InspectReport) {
    if let Some(file) = &report.file {
        print_file_info(file);
    }
    println!();
    println!("Data Summary:");
    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Memory Usage"),
        header_cell("Missing Values"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.rows).add_attribute(Attribute::Bold),
        Cell::new(summary.columns).add_attribute(Attribute::Bold),
        Cell::new(summary.memory_label()),
        count_cell(summary.missing_values, Color::Yellow),
    ]);
    println!("{table}");

    println!();
    println!("Column Information:");
    println!("{}", column_table(&report.columns));
}

pub fn column_table(columns: &[ColumnProfile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Data Type"),
        header_cell("Non-Null Count"),
        header_cell("Null Count"),
        header_cell("Unique Values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for column in columns {
        table.add_row(vec![
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            dim_cell(&column.dtype),
            Cell::new(column.non_null),
            count_cell(column.nulls, Color::Yellow),
            Cell::new(column.unique),
        ]);
    }
    table
}

pub fn print_preview(df: &DataFrame, total_rows: usize) -> anyhow::Result<()> {
    println!();
    println!("Data Preview ({} of {} rows):", df.height(), total_rows);
    println!("{}", preview_table(df)?);
    Ok(())
}

pub fn preview_table(df: &DataFrame) -> anyhow::Result<Table> {
    let mut table = Table::new();
    table.set_header(
        column_names(df)
            .iter()
            .map(|name| header_cell(name))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);

    let mut columns = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        columns.push(column_cells(col)?);
    }
    for row in 0..df.height() {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|values| value_cell(values.get(row).unwrap_or(&CellValue::Null)))
            .collect();
        table.add_row(cells);
    }
    Ok(table)
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Null => dim_cell("NaN"),
        CellValue::Int(_) | CellValue::Float(_) => {
            Cell::new(value).set_alignment(CellAlignment::Right)
        }
        _ => Cell::new(value),
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
