#![deny(unsafe_code)]

use churn_model::{ChurnLabel, CustomerRecord};

use crate::error::Result;

/// An opaque, pre-trained churn classifier.
///
/// Both methods return exactly one output per input record, in input order.
/// Implementations are read-only so one handle can serve concurrent callers.
pub trait ChurnPredictor: Send + Sync {
    /// Column names the predictor was trained on, in order.
    fn columns(&self) -> &[String];

    fn predict(&self, records: &[CustomerRecord]) -> Result<Vec<ChurnLabel>>;

    /// Churn probability per record, each in `[0, 1]`.
    fn predict_probability(&self, records: &[CustomerRecord]) -> Result<Vec<f64>>;
}
