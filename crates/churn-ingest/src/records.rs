//! Conversion of uploaded tables into typed customer records.

use churn_model::{CUSTOMER_COLUMNS, CustomerRecord, missing_columns};
use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_string;

/// Column names of a DataFrame, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Fail with [`IngestError::SchemaMismatch`] when any trained column is absent.
///
/// Extra columns are allowed; they are carried into the export untouched.
pub fn check_schema(df: &DataFrame) -> Result<()> {
    let missing = missing_columns(&column_names(df));
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::SchemaMismatch { missing })
    }
}

/// Convert every row into a [`CustomerRecord`].
///
/// Row numbers in errors are 1-based data rows (the header is not counted).
pub fn extract_records(df: &DataFrame) -> Result<Vec<CustomerRecord>> {
    check_schema(df)?;
    let columns = CUSTOMER_COLUMNS
        .iter()
        .map(|name| df.column(name))
        .collect::<PolarsResult<Vec<&Column>>>()?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let record = CustomerRecord::from_lookup(|column| {
            let idx = CUSTOMER_COLUMNS.iter().position(|name| *name == column)?;
            columns[idx].get(row).ok().map(any_to_string)
        })
        .map_err(|source| IngestError::InvalidRow {
            row: row + 1,
            source,
        })?;
        records.push(record);
    }
    tracing::debug!(rows = records.len(), "customer records extracted");
    Ok(records)
}
