//! Validation error types

use std::fmt;

/// Validation error for appointment input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Request body could not be read as the expected shape
    /// (missing field, wrong type, malformed JSON)
    InvalidBody { reason: String },

    /// Path parameter could not be parsed
    InvalidPath { field: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidBody { reason } => write!(f, "invalid request body: {}", reason),
            Self::InvalidPath { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Input types that check their own field constraints after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}
