//! Exercise commands: placement, fill-in, selection, checking and reset.

use crate::error::{CommandError, Result};
use crate::state::AppState;
use exercise_core::{
    BoardSnapshot, ChoiceGradingResult, ExerciseType, FillState, GradingResult, InputKind,
    PlacementOutcome, PlacementRecord, Score, UserAnswers,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UndoOutcome {
    pub undone: Option<PlacementRecord>,
    pub state: FillState,
}

#[derive(Debug, Serialize)]
pub struct FillOutcome {
    pub exercise: ExerciseType,
    pub slot: usize,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetOutcome {
    pub exercise: ExerciseType,
    pub cleared_slots: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Grade {
    Slots(GradingResult),
    Choice(ChoiceGradingResult),
}

#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    pub exercise: ExerciseType,
    pub score: Score,
    pub percent: u32,
    pub summary: String,
    pub grade: Grade,
}

#[derive(Debug, Serialize)]
pub struct ExerciseStatus {
    pub exercise: ExerciseType,
    pub slots: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardSnapshot>,
    pub answers: UserAnswers,
}

/// Parse an exercise name typed by the user.
pub fn parse_exercise(name: &str) -> Result<ExerciseType> {
    ExerciseType::from_str(name).ok_or_else(|| CommandError::UnknownExercise(name.to_string()))
}

fn require(exercise: ExerciseType, kind: InputKind, op: &'static str) -> Result<()> {
    if exercise.input_kind() == kind {
        Ok(())
    } else {
        Err(CommandError::NotApplicable { exercise, op })
    }
}

/// Drop an option onto a target slot.
pub fn place(
    state: &mut AppState,
    exercise: ExerciseType,
    slot: usize,
    option_id: &str,
) -> Result<PlacementOutcome> {
    require(exercise, InputKind::Placement, "place")?;
    let key = state.key(exercise)?;
    let outcome = state.placements.place(&key, slot, option_id);
    tracing::debug!("place {} -> {} on {}: {:?}", option_id, slot, key, outcome);
    Ok(outcome)
}

/// Take back the most recent placement.
pub fn undo(state: &mut AppState, exercise: ExerciseType) -> Result<UndoOutcome> {
    require(exercise, InputKind::Placement, "undo")?;
    let key = state.key(exercise)?;
    let undone = state.placements.undo(&key);
    Ok(UndoOutcome {
        undone,
        state: state.placements.fill_state(&key),
    })
}

/// Type an answer into a fill-in slot. Blank text clears the slot.
pub fn fill(
    state: &mut AppState,
    exercise: ExerciseType,
    slot: usize,
    text: &str,
) -> Result<FillOutcome> {
    require(exercise, InputKind::FreeText, "fill")?;
    let slots = state.current_unit()?.slot_count(exercise);
    if slot == 0 || slot > slots {
        return Err(CommandError::SlotOutOfRange {
            exercise,
            slot,
            slots,
        });
    }

    let key = state.key(exercise)?;
    let value = if text.trim().is_empty() {
        state.responses.clear(&key, slot);
        None
    } else {
        state.responses.record(&key, slot, text);
        Some(text.to_string())
    };
    Ok(FillOutcome {
        exercise,
        slot,
        value,
    })
}

/// Choose an option for a reading question.
pub fn select(state: &mut AppState, question: usize, option_id: &str) -> Result<FillOutcome> {
    let exercise = ExerciseType::Reading;
    let unit = state.current_unit()?;
    let slots = unit.slot_count(exercise);
    if question == 0 || question > slots {
        return Err(CommandError::SlotOutOfRange {
            exercise,
            slot: question,
            slots,
        });
    }
    let offered = unit
        .reading_comprehension
        .get(question - 1)
        .map_or(true, |q| q.options.iter().any(|o| o.id == option_id));
    if !offered {
        return Err(CommandError::InvalidSelection {
            question,
            option: option_id.to_string(),
        });
    }

    let key = state.key(exercise)?;
    state.responses.record(&key, question, option_id);
    Ok(FillOutcome {
        exercise,
        slot: question,
        value: Some(option_id.to_string()),
    })
}

/// Grade the current answers of an exercise.
pub fn check(state: &AppState, exercise: ExerciseType) -> Result<CheckOutcome> {
    let unit = state.current_unit()?;
    let key = state.key(exercise)?;

    let grade = match exercise.input_kind() {
        InputKind::Placement => Grade::Slots(state.grading.grade_unit(
            unit,
            exercise,
            &state.placements.answers(&key),
        )),
        InputKind::FreeText => Grade::Slots(state.grading.grade_unit(
            unit,
            exercise,
            &state.responses.answers(&key),
        )),
        InputKind::Choice => Grade::Choice(state.grading.grade_choice(
            &unit.reading_comprehension,
            unit.answer_key(exercise),
            &state.responses.answers(&key),
        )),
    };

    let score = match &grade {
        Grade::Slots(r) => r.score,
        Grade::Choice(r) => r.score,
    };
    tracing::info!("Checked {}: {}/{}", key, score.correct, score.total);

    Ok(CheckOutcome {
        exercise,
        score,
        percent: score.percent(),
        summary: summarize(score),
        grade,
    })
}

fn summarize(score: Score) -> String {
    if score.is_perfect() {
        format!("All correct! ({}/{})", score.correct, score.total)
    } else {
        format!(
            "{}/{} correct ({}%)",
            score.correct,
            score.total,
            score.percent()
        )
    }
}

/// Return an exercise to its empty state. The slot count is the
/// answer-key length.
pub fn reset(state: &mut AppState, exercise: ExerciseType) -> Result<ResetOutcome> {
    let slots = state.current_unit()?.slot_count(exercise);
    let key = state.key(exercise)?;

    match exercise.input_kind() {
        InputKind::Placement => state.placements.reset_all(&key, slots),
        InputKind::FreeText | InputKind::Choice => state.responses.reset(&key, slots),
    }
    Ok(ResetOutcome {
        exercise,
        cleared_slots: slots,
    })
}

/// Current board or answer sheet of an exercise.
pub fn status(state: &AppState, exercise: ExerciseType) -> Result<ExerciseStatus> {
    let slots = state.current_unit()?.slot_count(exercise);
    let key = state.key(exercise)?;

    let (board, answers) = match exercise.input_kind() {
        InputKind::Placement => (
            state.placements.snapshot(&key),
            state.placements.answers(&key),
        ),
        InputKind::FreeText | InputKind::Choice => (None, state.responses.answers(&key)),
    };
    Ok(ExerciseStatus {
        exercise,
        slots,
        board,
        answers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_wording() {
        assert_eq!(summarize(Score { correct: 3, total: 3 }), "All correct! (3/3)");
        assert_eq!(summarize(Score { correct: 2, total: 3 }), "2/3 correct (67%)");
    }

    #[test]
    fn parse_exercise_rejects_unknown_name() {
        assert!(matches!(
            parse_exercise("essay"),
            Err(CommandError::UnknownExercise(_))
        ));
        assert_eq!(parse_exercise("cloze").unwrap(), ExerciseType::Cloze);
    }
}
