//! Appending prediction outputs to an uploaded table.

use churn_model::{PREDICTION_COLUMN, PROBABILITY_COLUMN, ResultRecord};
use polars::prelude::*;

use crate::error::{OutputError, Result};

/// Return a copy of `df` with `Prediksi Churn` (0/1) and `Probabilitas Churn`
/// (rounded to 2 decimals) appended.
///
/// `results` must hold one entry per row, in row order. Existing columns
/// with either name are replaced in place.
pub fn augment(df: &DataFrame, results: &[ResultRecord]) -> Result<DataFrame> {
    if df.height() != results.len() {
        return Err(OutputError::LengthMismatch {
            rows: df.height(),
            outputs: results.len(),
        });
    }

    let labels: Vec<i64> = results
        .iter()
        .map(|result| i64::from(result.label.as_flag()))
        .collect();
    let probabilities: Vec<f64> = results
        .iter()
        .map(ResultRecord::rounded_probability)
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(PREDICTION_COLUMN.into(), labels).into_column())?;
    out.with_column(Series::new(PROBABILITY_COLUMN.into(), probabilities).into_column())?;
    Ok(out)
}
