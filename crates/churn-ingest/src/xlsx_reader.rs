//! XLSX upload reading.
//!
//! Only the first worksheet is read. Its first row is the header, ending at
//! the last named cell; cells right of it are ignored. Each column's type is
//! inferred from the non-empty cells below it. Spreadsheet numbers stay
//! floating point even when whole, so exported probabilities keep their type.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, XlsxError, open_workbook_from_rs};
use polars::prelude::*;

use crate::csv_reader::check_column_names;
use crate::error::{IngestError, Result};
use crate::polars_utils::format_numeric;

const EMPTY_CELL: &Data = &Data::Empty;

/// Inferred storage type of a spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellType {
    Integer,
    Float,
    Boolean,
    Text,
}

fn infer_cell_type(cells: &[&Data]) -> CellType {
    let mut saw_value = false;
    let mut all_integer = true;
    let mut all_numeric = true;
    let mut all_bool = true;
    for cell in cells {
        match cell {
            Data::Empty => continue,
            Data::Int(_) => {
                all_bool = false;
            }
            Data::Float(_) => {
                all_integer = false;
                all_bool = false;
            }
            Data::Bool(_) => {
                all_integer = false;
                all_numeric = false;
            }
            _ => {
                all_integer = false;
                all_numeric = false;
                all_bool = false;
            }
        }
        saw_value = true;
    }
    if !saw_value {
        CellType::Text
    } else if all_integer {
        CellType::Integer
    } else if all_numeric {
        CellType::Float
    } else if all_bool {
        CellType::Boolean
    } else {
        CellType::Text
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(value) => Some(value.clone()),
        Data::Float(value) => Some(format_numeric(*value)),
        other => Some(other.to_string()),
    }
}

fn build_column(name: &str, cells: &[&Data]) -> Column {
    match infer_cell_type(cells) {
        CellType::Integer => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(value) => Some(*value),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        CellType::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(value) => Some(*value as f64),
                    Data::Float(value) => Some(*value),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        CellType::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Bool(value) => Some(*value),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        CellType::Text => {
            let values: Vec<Option<String>> = cells.iter().map(|cell| cell_text(cell)).collect();
            Series::new(name.into(), values).into_column()
        }
    }
}

/// Parse the first worksheet of an XLSX upload into a DataFrame.
pub fn read_xlsx_bytes(file_name: &str, bytes: &[u8]) -> Result<DataFrame> {
    let parse_error = |message: String| IngestError::XlsxParse {
        file_name: file_name.to_string(),
        message,
    };

    let mut workbook: Xlsx<Cursor<Vec<u8>>> = open_workbook_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e: XlsxError| parse_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyUpload {
            file_name: file_name.to_string(),
        })?
        .map_err(|e| parse_error(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyUpload {
            file_name: file_name.to_string(),
        });
    };
    let mut headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default().trim().to_string())
        .collect();
    // The range spans the widest used row; trailing unnamed columns hold
    // stray cells, not data.
    let Some(width) = headers.iter().rposition(|name| !name.is_empty()) else {
        return Err(IngestError::EmptyUpload {
            file_name: file_name.to_string(),
        });
    };
    headers.truncate(width + 1);
    check_column_names(file_name, &headers)?;

    let body: Vec<&[Data]> = rows
        .filter(|row| {
            row.iter()
                .take(headers.len())
                .any(|cell| !matches!(cell, Data::Empty))
        })
        .collect();
    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(EMPTY_CELL))
                .collect();
            build_column(name, &cells)
        })
        .collect();

    let df = DataFrame::new(columns)?;
    tracing::debug!(
        file_name,
        columns = df.width(),
        rows = df.height(),
        "xlsx upload parsed"
    );
    Ok(df)
}
