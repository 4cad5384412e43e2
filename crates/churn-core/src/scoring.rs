//! Batch scoring shared by both input adapters.

use std::time::Instant;

use churn_model::{CUSTOMER_COLUMNS, CustomerRecord, ResultRecord};
use churn_predict::ChurnPredictor;
use tracing::{debug, info};

use crate::error::{CoreError, Result};

/// Check that the predictor expects exactly the customer columns, in order.
pub fn verify_columns<P: ChurnPredictor + ?Sized>(predictor: &P) -> Result<()> {
    let found = predictor.columns();
    if found.iter().map(String::as_str).eq(CUSTOMER_COLUMNS) {
        Ok(())
    } else {
        Err(CoreError::ColumnMismatch {
            expected: CUSTOMER_COLUMNS.iter().map(|name| name.to_string()).collect(),
            found: found.to_vec(),
        })
    }
}

/// Score a record-set in one call and pair every record with its outputs.
pub fn score<P: ChurnPredictor + ?Sized>(
    predictor: &P,
    records: &[CustomerRecord],
) -> Result<Vec<ResultRecord>> {
    verify_columns(predictor)?;
    let start = Instant::now();

    let labels = predictor.predict(records)?;
    check_count("label", records.len(), labels.len())?;
    let probabilities = predictor.predict_probability(records)?;
    check_count("probability", records.len(), probabilities.len())?;

    let results: Vec<ResultRecord> = records
        .iter()
        .zip(labels)
        .zip(probabilities)
        .map(|((record, label), probability)| ResultRecord::new(*record, label, probability))
        .collect();

    let churned = results.iter().filter(|result| result.label.is_churn()).count();
    info!(
        rows = results.len(),
        churned,
        duration_ms = start.elapsed().as_millis() as u64,
        "prediction complete"
    );
    debug!(rows = results.len(), "results assembled");
    Ok(results)
}

fn check_count(output: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(CoreError::OutputCount {
            output,
            expected,
            found,
        })
    }
}
