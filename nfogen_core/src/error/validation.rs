//! Validation related error types

use thiserror::Error;

/// Input validation and configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A captured number could not be represented
    #[error("Invalid {field} number '{value}': {reason}")]
    InvalidNumber {
        field: String,
        value: String,
        reason: String,
    },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },
}

impl ValidationError {
    /// Create an invalid number error
    pub fn invalid_number(field: &str, value: &str, reason: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}
