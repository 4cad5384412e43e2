use thiserror::Error;

/// Errors raised while building or checking customer records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A numeric field lies outside the form limits.
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A categorical field received a value outside its category set.
    #[error("invalid {field} value '{value}' (expected one of: {allowed})")]
    InvalidCategory {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// A value could not be parsed into the field's type.
    #[error("invalid {field} value '{value}': expected {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
