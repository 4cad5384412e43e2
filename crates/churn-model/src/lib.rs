//! Customer churn data model.
//!
//! Shared by both input adapters and the predictor: the strongly typed
//! [`CustomerRecord`], its categorical fields, the trained column schema, and
//! the [`ResultRecord`] produced after scoring.

pub mod enums;
pub mod error;
pub mod record;
pub mod schema;

pub use enums::{ChurnLabel, MaritalStatus, PreferedOrderCat, SatisfactionScore};
pub use error::{ModelError, Result};
pub use record::{CustomerRecord, FieldValue, ResultRecord, round_probability};
pub use schema::{
    CUSTOMER_COLUMNS, ColumnKind, ColumnSpec, PREDICTION_COLUMN, PROBABILITY_COLUMN, column_spec,
    column_specs, missing_columns,
};
