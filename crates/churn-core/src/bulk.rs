//! Whole-file prediction from an uploaded table.

use churn_ingest::{Upload, extract_records};
use churn_model::ResultRecord;
use churn_output::{augment, export_xlsx};
use churn_predict::ChurnPredictor;
use polars::prelude::DataFrame;
use tracing::info_span;

use crate::error::Result;
use crate::message::ResultMessage;
use crate::scoring::score;

/// Outcome of a bulk prediction.
#[derive(Debug, Clone)]
pub struct BulkOutcome {
    pub file_name: String,
    /// The uploaded table with `Prediksi Churn` and `Probabilitas Churn` appended.
    pub table: DataFrame,
    pub results: Vec<ResultRecord>,
    pub message: ResultMessage,
}

impl BulkOutcome {
    pub fn row_count(&self) -> usize {
        self.results.len()
    }

    pub fn churn_count(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.label.is_churn())
            .count()
    }

    /// Workbook bytes for download.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        Ok(export_xlsx(&self.table)?)
    }
}

/// Scores every row of an upload in a single predictor call.
pub struct BulkAdapter<'a, P: ChurnPredictor + ?Sized> {
    predictor: &'a P,
}

impl<'a, P: ChurnPredictor + ?Sized> BulkAdapter<'a, P> {
    pub fn new(predictor: &'a P) -> Self {
        Self { predictor }
    }

    pub fn predict(&self, upload: &Upload) -> Result<BulkOutcome> {
        let _span = info_span!("bulk_predict", file_name = %upload.file_name).entered();
        let records = extract_records(&upload.data)?;
        let results = score(self.predictor, &records)?;
        let table = augment(&upload.data, &results)?;
        Ok(BulkOutcome {
            file_name: upload.file_name.clone(),
            table,
            results,
            message: ResultMessage::bulk_success(),
        })
    }
}
