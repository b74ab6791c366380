//! Grading of placements, fill-ins and multiple-choice selections.
//!
//! Every pass walks slots `1..=answer_key.len()`. Grading never touches the
//! answers it is given, so it can run as often as the view likes.

use crate::matching::{compare_answers, is_blank};
use crate::types::{ExerciseType, MatchingMode, ReadingQuestion, Unit, UserAnswers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-slot classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    Missing,
}

/// Aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Percentage rounded half up. An exercise without slots scores 0.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// Grade of a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrade {
    pub slot: usize,
    pub verdict: Verdict,
    /// Reference value, always surfaced so the view can reveal it.
    pub expected: String,
    /// What the user entered, `None` when the slot was left blank.
    pub given: Option<String>,
    pub expected_display: String,
    pub given_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    pub exercise: ExerciseType,
    pub items: Vec<SlotGrade>,
    pub score: Score,
}

impl GradingResult {
    pub fn item(&self, slot: usize) -> Option<&SlotGrade> {
        self.items.iter().find(|g| g.slot == slot)
    }
}

/// How a user's selection relates to an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMark {
    SelectedCorrect,
    SelectedIncorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGrade {
    pub option_id: String,
    /// Highlight as the correct answer, selected or not.
    pub is_answer: bool,
    pub selection: Option<SelectionMark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGrade {
    pub question: usize,
    pub verdict: Verdict,
    pub expected: String,
    pub selected: Option<String>,
    pub options: Vec<OptionGrade>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceGradingResult {
    pub questions: Vec<QuestionGrade>,
    pub score: Score,
}

/// Compares user answers against an answer key.
///
/// Matching modes default to [`ExerciseType::matching_mode`] and can be
/// overridden per exercise type.
#[derive(Debug, Clone, Default)]
pub struct GradingEngine {
    overrides: HashMap<ExerciseType, MatchingMode>,
}

impl GradingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, exercise: ExerciseType, mode: MatchingMode) -> Self {
        self.overrides.insert(exercise, mode);
        self
    }

    pub fn matching_mode(&self, exercise: ExerciseType) -> MatchingMode {
        self.overrides
            .get(&exercise)
            .copied()
            .unwrap_or_else(|| exercise.matching_mode())
    }

    /// Slot-fill grading. Display text equals the raw values.
    pub fn grade(
        &self,
        exercise: ExerciseType,
        answer_key: &[String],
        user_answers: &UserAnswers,
    ) -> GradingResult {
        self.grade_with_display(exercise, answer_key, user_answers, |v| v.to_string())
    }

    /// Slot-fill grading against a unit, mapping option identifiers to the
    /// text the learner saw.
    pub fn grade_unit(
        &self,
        unit: &Unit,
        exercise: ExerciseType,
        user_answers: &UserAnswers,
    ) -> GradingResult {
        self.grade_with_display(exercise, unit.answer_key(exercise), user_answers, |v| {
            unit.display_text(exercise, v).to_string()
        })
    }

    fn grade_with_display<F>(
        &self,
        exercise: ExerciseType,
        answer_key: &[String],
        user_answers: &UserAnswers,
        display: F,
    ) -> GradingResult
    where
        F: Fn(&str) -> String,
    {
        let mode = self.matching_mode(exercise);
        let mut correct = 0;

        let items = answer_key
            .iter()
            .enumerate()
            .map(|(idx, expected)| {
                let slot = idx + 1;
                let given = user_answers.get(slot);
                let verdict = if is_blank(given) {
                    Verdict::Missing
                } else if given.is_some_and(|g| compare_answers(g, expected, mode).is_correct) {
                    correct += 1;
                    Verdict::Correct
                } else {
                    Verdict::Incorrect
                };
                let given = given.filter(|_| verdict != Verdict::Missing);

                SlotGrade {
                    slot,
                    verdict,
                    expected: expected.clone(),
                    given: given.map(str::to_string),
                    expected_display: display(expected.as_str()),
                    given_display: given.map(&display),
                }
            })
            .collect();

        GradingResult {
            exercise,
            items,
            score: Score {
                correct,
                total: answer_key.len(),
            },
        }
    }

    /// Multiple-choice grading: marks each option of each question.
    pub fn grade_choice(
        &self,
        questions: &[ReadingQuestion],
        answer_key: &[String],
        selections: &UserAnswers,
    ) -> ChoiceGradingResult {
        let mode = self.matching_mode(ExerciseType::Reading);
        let mut correct = 0;

        let graded = answer_key
            .iter()
            .enumerate()
            .map(|(idx, expected)| {
                let question = idx + 1;
                let selected = selections.get(question).filter(|s| !s.trim().is_empty());
                let matches = |id: &str| compare_answers(id, expected, mode).is_correct;

                let verdict = match selected {
                    None => Verdict::Missing,
                    Some(s) if matches(s) => {
                        correct += 1;
                        Verdict::Correct
                    }
                    Some(_) => Verdict::Incorrect,
                };

                let options = questions
                    .get(idx)
                    .map(|q| q.options.as_slice())
                    .unwrap_or_default()
                    .iter()
                    .map(|opt| {
                        let is_answer = matches(opt.id.as_str());
                        let selection = (selected == Some(opt.id.as_str())).then_some(if is_answer {
                            SelectionMark::SelectedCorrect
                        } else {
                            SelectionMark::SelectedIncorrect
                        });
                        OptionGrade {
                            option_id: opt.id.clone(),
                            is_answer,
                            selection,
                        }
                    })
                    .collect();

                QuestionGrade {
                    question,
                    verdict,
                    expected: expected.clone(),
                    selected: selected.map(str::to_string),
                    options,
                }
            })
            .collect();

        ChoiceGradingResult {
            questions: graded,
            score: Score {
                correct,
                total: answer_key.len(),
            },
        }
    }
}
