//! Error types for request-level validation
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Date range validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid date for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("Inverted date range: {from} is after {to}")]
    Inverted { from: String, to: String },
}
