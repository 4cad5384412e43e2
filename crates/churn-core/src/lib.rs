//! Churn prediction workflow.
//!
//! Both input adapters build the same [`churn_model::CustomerRecord`] and score
//! it through an injected, read-only [`churn_predict::ChurnPredictor`]:
//!
//! - [`ManualAdapter`]: one customer from form fields
//! - [`BulkAdapter`]: every row of an uploaded CSV/XLSX table
//! - [`Session`]: the stage / submit / show state machine around them

pub mod bulk;
pub mod error;
pub mod manual;
pub mod message;
pub mod scoring;
pub mod session;

pub use bulk::{BulkAdapter, BulkOutcome};
pub use error::{CoreError, ErrorCategory, Result};
pub use manual::{ManualAdapter, ManualOutcome};
pub use message::{
    APP_TITLE, BULK_SUCCESS_TEXT, DOWNLOAD_LABEL, PREVIEW_HEADING, ResultMessage, Severity,
};
pub use scoring::{score, verify_columns};
pub use session::{InputMode, Outcome, Session, SessionState, StagedInput};
