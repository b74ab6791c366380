//! Core exercise library for the unit player.
//!
//! Provides:
//! - Unit JSON parsing and validation
//! - Placement engine for drag-and-drop exercises (with undo history)
//! - Response store for typed fill-ins and multiple-choice selections
//! - Grading engine (slot fill and multiple choice)
//! - Answer matching (exact and case-insensitive)
//! - Audio source resolution
//! - Shared types (Unit, ExerciseType, InstanceKey, etc.)

pub mod audio;
pub mod error;
pub mod grading;
pub mod matching;
pub mod parser;
pub mod placement;
pub mod responses;
pub mod types;

pub use audio::{paragraph_sources, resolve_source, speech_text, AudioTrack};
pub use error::{ParseError, Result};
pub use grading::{
    ChoiceGradingResult, GradingEngine, GradingResult, OptionGrade, QuestionGrade, Score,
    SelectionMark, SlotGrade, Verdict,
};
pub use matching::{compare_answers, MatchResult};
pub use parser::{parse_index, parse_unit, slot_markers};
pub use placement::{
    BoardSnapshot, FillState, PlacementEngine, PlacementOutcome, PlacementRecord, Rejection,
    SlotView,
};
pub use responses::ResponseStore;
pub use types::{
    AnswerSet, AudioPatterns, DragOption, ExerciseType, InputKind, InstanceKey, MatchingMode,
    Unit, UnitIndexEntry, UserAnswers,
};
