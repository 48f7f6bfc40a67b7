//! Error types for the terminal

use thiserror::Error;

/// Terminal-wide error type
#[derive(Error, Debug)]
pub enum CoconutError {
    /// Aggregation found no quotes inside the accepted price range
    #[error("No valid price data from sources")]
    NoValidData,

    /// The requested entity does not exist (e.g. no snapshot recorded yet)
    #[error("Not found: {0}")]
    NotFound(String),

    /// A statistic was requested over an empty history
    #[error("No data: {0}")]
    NoData(String),

    /// A required submission field is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field or query parameter carries an unusable value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Durable storage failed; distinct from validation so callers can tell
    /// "bad input" from "storage unavailable"
    #[error("Storage error: {0}")]
    Storage(String),

    /// A quote source could not be reached or parsed
    #[error("Source error: {0}")]
    Source(String),
}

impl CoconutError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        CoconutError::NotFound(msg.into())
    }

    pub fn no_data(msg: impl Into<String>) -> Self {
        CoconutError::NoData(msg.into())
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        CoconutError::MissingField(field.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        CoconutError::InvalidValue(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        CoconutError::Storage(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        CoconutError::Source(msg.into())
    }

    /// Whether this error is a caller-input problem rather than a system fault
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoconutError::NoValidData
                | CoconutError::MissingField(_)
                | CoconutError::InvalidValue(_)
        )
    }
}

/// Result type alias for terminal operations
pub type CoconutResult<T> = Result<T, CoconutError>;
