//! Command error types.

use exercise_core::{ExerciseType, ParseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid unit data: {0}")]
    Parse(#[from] ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unit not found: {0}")]
    UnitNotFound(String),

    #[error("no unit loaded")]
    NoUnitLoaded,

    #[error("unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("{op} does not apply to {exercise}")]
    NotApplicable {
        exercise: ExerciseType,
        op: &'static str,
    },

    #[error("slot {slot} out of range for {exercise} (1..={slots})")]
    SlotOutOfRange {
        exercise: ExerciseType,
        slot: usize,
        slots: usize,
    },

    #[error("option {option} is not offered by question {question}")]
    InvalidSelection { question: usize, option: String },

    #[error("unknown audio track: {0}")]
    UnknownTrack(String),
}

impl CommandError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "validation_error",
            Self::Io(_) => "io_error",
            Self::Encode(_) => "encode_error",
            Self::UnitNotFound(_) => "not_found",
            Self::NoUnitLoaded => "no_unit",
            Self::UnknownExercise(_) => "unknown_exercise",
            Self::NotApplicable { .. } => "not_applicable",
            Self::SlotOutOfRange { .. } => "slot_out_of_range",
            Self::InvalidSelection { .. } => "invalid_selection",
            Self::UnknownTrack(_) => "unknown_track",
        }
    }
}

/// Error body written by the shell.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&CommandError> for ErrorResponse {
    fn from(e: &CommandError) -> Self {
        Self {
            error: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

/// Result type alias for player commands.
pub type Result<T> = std::result::Result<T, CommandError>;
