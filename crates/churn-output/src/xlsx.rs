//! In-memory XLSX workbook generation.

use std::fs;
use std::path::Path;

use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::{OutputError, Result};

/// Suggested file name for the downloadable result workbook.
pub const DOWNLOAD_FILE_NAME: &str = "hasil_prediksi_churn.xlsx";

/// MIME type of the generated workbook.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Hasil Prediksi";

const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Render `df` as a single-sheet workbook and return the file bytes.
///
/// The first row holds the column names. Nothing touches the filesystem.
pub fn export_xlsx(df: &DataFrame) -> Result<Vec<u8>> {
    // One row is taken by the header.
    if df.height() >= MAX_ROWS || df.width() > MAX_COLUMNS {
        return Err(OutputError::TooLarge {
            rows: df.height(),
            columns: df.width(),
        });
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string_with_format(0, col, column.name().as_str(), &header)?;
        for row in 0..df.height() {
            let value = column.get(row)?;
            write_cell(worksheet, row as u32 + 1, col, value)?;
        }
    }
    worksheet.autofit();

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(
        rows = df.height(),
        columns = df.width(),
        bytes = bytes.len(),
        "result workbook generated"
    );
    Ok(bytes)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: AnyValue<'_>) -> Result<()> {
    match value {
        AnyValue::Null => {}
        AnyValue::Boolean(v) => {
            worksheet.write_boolean(row, col, v)?;
        }
        AnyValue::Int8(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::Int16(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::Int32(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::Int64(v) => write_number(worksheet, row, col, v as f64)?,
        AnyValue::UInt8(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::UInt16(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::UInt32(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::UInt64(v) => write_number(worksheet, row, col, v as f64)?,
        AnyValue::Float32(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::Float64(v) => write_number(worksheet, row, col, v)?,
        AnyValue::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        AnyValue::StringOwned(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

// Non-finite values have no spreadsheet representation and are left empty.
fn write_number(worksheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<()> {
    if value.is_finite() {
        worksheet.write_number(row, col, value)?;
    }
    Ok(())
}

/// Write the workbook for `df` to `path`, creating parent directories.
pub fn write_xlsx(df: &DataFrame, path: &Path) -> Result<()> {
    let bytes = export_xlsx(df)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &bytes).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "result workbook written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_zip_container() {
        let df = df! {
            "Tenure" => [10i64, 3],
            "MaritalStatus" => ["Single", "Married"],
        }
        .unwrap();
        let bytes = export_xlsx(&df).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_table_still_has_header_sheet() {
        let df = df! { "Tenure" => Vec::<i64>::new() }.unwrap();
        let bytes = export_xlsx(&df).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn mime_type_and_file_name() {
        assert!(DOWNLOAD_FILE_NAME.ends_with(".xlsx"));
        assert!(XLSX_MIME_TYPE.ends_with("spreadsheetml.sheet"));
    }
}
