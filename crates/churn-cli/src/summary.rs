//! Terminal rendering of tables, messages and summaries.

use std::path::Path;

use churn_core::{APP_TITLE, BulkOutcome, DOWNLOAD_LABEL, ResultMessage, Severity};
use churn_ingest::any_to_string;
use churn_model::{ColumnKind, column_specs};
use churn_output::XLSX_MIME_TYPE;
use churn_predict::ModelInfo;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame, DataType};

pub fn print_title() {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(APP_TITLE)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_message(message: &ResultMessage) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![message_cell(message)]);
    println!("{table}");
}

fn message_cell(message: &ResultMessage) -> Cell {
    let color = match message.severity {
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    };
    Cell::new(&message.text)
        .fg(color)
        .add_attribute(Attribute::Bold)
}

/// Render at most `max_rows` rows of `df`.
pub fn dataframe_table(df: &DataFrame, max_rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_data_table_style(&mut table);
    for (idx, column) in df.get_columns().iter().enumerate() {
        if is_numeric(column.dtype()) {
            align_column(&mut table, idx, CellAlignment::Right);
        }
    }
    for row in 0..df.height().min(max_rows) {
        let cells: Vec<Cell> = df
            .get_columns()
            .iter()
            .map(|column| value_cell(column.get(row).unwrap_or(AnyValue::Null)))
            .collect();
        table.add_row(cells);
    }
    table
}

pub fn print_dataframe(title: &str, df: &DataFrame, max_rows: usize) {
    println!("{title}");
    println!("{}", dataframe_table(df, max_rows));
    if df.height() > max_rows {
        println!("... {} more row(s)", df.height() - max_rows);
    }
}

pub fn print_bulk_summary(outcome: &BulkOutcome, output: Option<&Path>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Churn"),
        header_cell("Retained"),
        header_cell("Workbook"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let churned = outcome.churn_count();
    table.add_row(vec![
        Cell::new(&outcome.file_name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.row_count()),
        count_cell(churned, Color::Yellow),
        Cell::new(outcome.row_count() - churned),
        match output {
            Some(path) => Cell::new(path.display()).fg(Color::Green),
            None => dim_cell("-"),
        },
    ]);
    println!("{table}");
}

/// Where the result workbook was saved and how to open it.
pub fn download_table(output: &Path) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(DOWNLOAD_LABEL), Cell::new("")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("File").fg(Color::Cyan),
        Cell::new(output.display()).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("MIME type").fg(Color::Cyan),
        dim_cell(XLSX_MIME_TYPE),
    ]);
    table
}

pub fn print_download(output: &Path) {
    println!("{}", download_table(output));
}

pub fn print_schema() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Allowed"),
    ]);
    apply_table_style(&mut table);
    for spec in column_specs() {
        let allowed = match spec.kind {
            ColumnKind::Category { .. } => Cell::new(spec.kind.domain()),
            _ => Cell::new(spec.kind.domain()).fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(spec.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(spec.label),
            Cell::new(spec.kind.type_name()),
            allowed,
        ]);
    }
    println!("{table}");
}

pub fn print_model_info(info: &ModelInfo) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    let rows = [
        ("Path", info.path.display().to_string()),
        ("Name", info.name.clone()),
        ("Version", info.version.clone()),
        (
            "Description",
            info.description.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("SHA-256", info.sha256.clone()),
        ("Threshold", info.threshold.to_string()),
        ("Features", info.feature_count.to_string()),
    ];
    for (property, value) in rows {
        table.add_row(vec![Cell::new(property).fg(Color::Cyan), Cell::new(value)]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_data_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(200);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn value_cell(value: AnyValue<'_>) -> Cell {
    if matches!(value, AnyValue::Null) {
        dim_cell("-")
    } else {
        Cell::new(any_to_string(value))
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
    use polars::prelude::df;

    use super::*;

    #[test]
    fn dataframe_table_limits_rows() {
        let df = df! {
            "Tenure" => [10i64, 3, 24],
            "MaritalStatus" => ["Single", "Married", "Divorced"],
        }
        .unwrap();
        let mut table = dataframe_table(&df, 2);
        assert_eq!(table.row_iter().count(), 2);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn download_table_names_file_and_mime_type() {
        let rendered = download_table(Path::new("out/hasil_prediksi_churn.xlsx")).to_string();
        assert!(rendered.contains(DOWNLOAD_LABEL));
        assert!(rendered.contains("out/hasil_prediksi_churn.xlsx"));
        assert!(rendered.contains(XLSX_MIME_TYPE));
    }
}
