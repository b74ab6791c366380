//! Error types for exercise-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading unit data.
///
/// Only structurally invalid input ends up here. Rejected placements, empty
/// undo history and blank slots are ordinary values, not errors.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed unit JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("empty unit file")]
    EmptyInput,
}
