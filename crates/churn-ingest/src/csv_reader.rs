//! CSV upload reading.
//!
//! The header row is checked with the `csv` reader first so that blank or
//! duplicate column names are reported by name; the body is then parsed by
//! Polars, inferring column types from every row.

use std::collections::BTreeSet;
use std::io::Cursor;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Reject UTF-16 encoded uploads. A UTF-8 BOM is accepted.
pub fn validate_encoding(file_name: &str, bytes: &[u8]) -> Result<()> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                file_name: file_name.to_string(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                file_name: file_name.to_string(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

/// Read and check the header row.
pub fn read_csv_headers(file_name: &str, bytes: &[u8]) -> Result<Vec<String>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(strip_bom(bytes));
    let headers = reader.headers().map_err(|e| IngestError::CsvParse {
        file_name: file_name.to_string(),
        message: e.to_string(),
    })?;
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyUpload {
            file_name: file_name.to_string(),
        });
    }
    check_column_names(file_name, &columns)?;
    Ok(columns)
}

/// Blank and duplicate names are both rejected.
pub(crate) fn check_column_names(file_name: &str, columns: &[String]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for column in columns {
        if column.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                file_name: file_name.to_string(),
            });
        }
        if !seen.insert(column.as_str()) {
            return Err(IngestError::DuplicateColumn {
                file_name: file_name.to_string(),
                column: column.clone(),
            });
        }
    }
    Ok(())
}

/// Parse a whole CSV upload into a DataFrame. The first row is the header.
pub fn read_csv_bytes(file_name: &str, bytes: &[u8]) -> Result<DataFrame> {
    validate_encoding(file_name, bytes)?;
    let headers = read_csv_headers(file_name, bytes)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(strip_bom(bytes).to_vec()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            file_name: file_name.to_string(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        file_name,
        columns = headers.len(),
        rows = df.height(),
        "csv upload parsed"
    );
    Ok(df)
}
