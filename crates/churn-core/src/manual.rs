//! Single-customer prediction from form input.

use churn_model::{CustomerRecord, ResultRecord};
use churn_predict::ChurnPredictor;
use tracing::info_span;

use crate::error::{CoreError, Result};
use crate::message::ResultMessage;
use crate::scoring::score;

/// Outcome of a manual prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualOutcome {
    pub result: ResultRecord,
    pub message: ResultMessage,
}

/// Scores one customer at a time against an injected predictor.
pub struct ManualAdapter<'a, P: ChurnPredictor + ?Sized> {
    predictor: &'a P,
}

impl<'a, P: ChurnPredictor + ?Sized> ManualAdapter<'a, P> {
    pub fn new(predictor: &'a P) -> Self {
        Self { predictor }
    }

    /// Validate ranges, then score the record as a one-row record-set.
    pub fn predict(&self, record: CustomerRecord) -> Result<ManualOutcome> {
        let _span = info_span!("manual_predict").entered();
        record.validate_ranges()?;
        let result = score(self.predictor, std::slice::from_ref(&record))?
            .into_iter()
            .next()
            .ok_or(CoreError::OutputCount {
                output: "result",
                expected: 1,
                found: 0,
            })?;
        let message = ResultMessage::for_result(&result);
        Ok(ManualOutcome { result, message })
    }
}
