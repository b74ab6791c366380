//! Core types for the exercise player.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Exercise block within a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseType {
    VocabUsage,
    Reading,
    Cloze,
    SevenFive,
    Grammar,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 5] = [
        Self::VocabUsage,
        Self::Reading,
        Self::Cloze,
        Self::SevenFive,
        Self::Grammar,
    ];

    /// Key of this exercise in the unit's `answers` block.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VocabUsage => "vocab",
            Self::Reading => "reading",
            Self::Cloze => "cloze",
            Self::SevenFive => "sevenFive",
            Self::Grammar => "grammar",
        }
    }

    /// Parse from string. Accepts the answer key names and a few spellings
    /// used by the shell.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "vocab" | "vocabusage" | "vocab-usage" => Some(Self::VocabUsage),
            "reading" | "readingcomprehension" => Some(Self::Reading),
            "cloze" => Some(Self::Cloze),
            "sevenfive" | "seven-five" | "7-5" => Some(Self::SevenFive),
            "grammar" => Some(Self::Grammar),
            _ => None,
        }
    }

    /// How the learner answers this exercise.
    pub fn input_kind(&self) -> InputKind {
        match self {
            Self::VocabUsage | Self::SevenFive => InputKind::Placement,
            Self::Cloze | Self::Grammar => InputKind::FreeText,
            Self::Reading => InputKind::Choice,
        }
    }

    /// Comparison used when grading this exercise.
    ///
    /// Vocabulary placements carry the word itself, so they are compared like
    /// spelling answers. Sentence completion and reading answers are option
    /// identifiers and must match exactly.
    pub fn matching_mode(&self) -> MatchingMode {
        match self {
            Self::VocabUsage | Self::Cloze | Self::Grammar => MatchingMode::CaseInsensitive,
            Self::SevenFive | Self::Reading => MatchingMode::Exact,
        }
    }

    /// Prefix of the slot marker ids embedded in this exercise's template.
    pub fn marker_prefix(&self) -> Option<&'static str> {
        match self {
            Self::VocabUsage => Some("vocab-drop"),
            Self::SevenFive => Some("drop"),
            Self::Cloze => Some("cloze"),
            Self::Grammar => Some("grammar"),
            Self::Reading => None,
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input style of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Placement,
    FreeText,
    Choice,
}

/// Matching mode for answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Byte-for-byte equality, used for option identifiers.
    Exact,
    /// Trimmed, whitespace-collapsed, lowercase comparison.
    CaseInsensitive,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::CaseInsensitive
    }
}

/// Identifies one exercise instance: a unit crossed with an exercise type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceKey {
    pub unit_id: String,
    pub exercise: ExerciseType,
}

impl InstanceKey {
    pub fn new(unit_id: impl Into<String>, exercise: ExerciseType) -> Self {
        Self {
            unit_id: unit_id.into(),
            exercise,
        }
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.unit_id, self.exercise)
    }
}

/// User answers for one exercise instance, keyed by 1-based slot number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAnswers(BTreeMap<usize, String>);

impl UserAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.0.get(&slot).map(String::as_str)
    }

    pub fn insert(&mut self, slot: usize, value: impl Into<String>) -> Option<String> {
        self.0.insert(slot, value.into())
    }

    pub fn remove(&mut self, slot: usize) -> Option<String> {
        self.0.remove(&slot)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(slot, value)| (*slot, value.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for UserAnswers {
    fn from_iter<I: IntoIterator<Item = (usize, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(slot, v)| (slot, v.into())).collect())
    }
}

/// A draggable candidate in an exercise's option pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragOption {
    pub id: String,
    pub display: String,
}

impl DragOption {
    pub fn new(id: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
        }
    }
}

/// Entry of the unit index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitIndexEntry {
    pub unit_id: String,
    pub unit_name: String,
    pub data_url: String,
}

/// A fully validated unit of study content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub unit_id: String,
    pub unit_name: String,
    pub article: Article,
    #[serde(default)]
    pub vocabulary: Vec<VocabEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocab_usage: Option<VocabUsage>,
    #[serde(default)]
    pub reading_comprehension: Vec<ReadingQuestion>,
    #[serde(default)]
    pub cloze_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seven_five: Option<SevenFive>,
    #[serde(default)]
    pub grammar_text: String,
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioPatterns>,
}

impl Unit {
    /// Reference answers for an exercise.
    pub fn answer_key(&self, exercise: ExerciseType) -> &[String] {
        self.answers.key(exercise)
    }

    /// Number of gradable slots. Always the answer-key length.
    pub fn slot_count(&self, exercise: ExerciseType) -> usize {
        self.answer_key(exercise).len()
    }

    /// Option pool for a drag exercise, `None` for other exercise types.
    pub fn placement_options(&self, exercise: ExerciseType) -> Option<Vec<DragOption>> {
        match exercise {
            ExerciseType::VocabUsage => Some(
                self.vocab_usage
                    .iter()
                    .flat_map(|vu| vu.options.iter())
                    .map(|word| DragOption::new(word.clone(), word.clone()))
                    .collect(),
            ),
            ExerciseType::SevenFive => Some(
                self.seven_five
                    .iter()
                    .flat_map(|sf| sf.options.iter())
                    .map(|opt| DragOption::new(opt.id.clone(), opt.text.clone()))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Display text for an answer value. Sentence-completion identifiers map
    /// to their option text; everything else displays as itself.
    pub fn display_text<'a>(&'a self, exercise: ExerciseType, value: &'a str) -> &'a str {
        if exercise == ExerciseType::SevenFive {
            if let Some(opt) = self
                .seven_five
                .as_ref()
                .and_then(|sf| sf.options.iter().find(|o| o.id == value))
            {
                return &opt.text;
            }
        }
        value
    }

    /// Template markup holding the slot markers for an exercise.
    pub fn template(&self, exercise: ExerciseType) -> Option<String> {
        match exercise {
            ExerciseType::VocabUsage => self.vocab_usage.as_ref().map(|vu| vu.questions.join("\n")),
            ExerciseType::SevenFive => self.seven_five.as_ref().map(|sf| sf.text.clone()),
            ExerciseType::Cloze => Some(self.cloze_text.clone()),
            ExerciseType::Grammar => Some(self.grammar_text.clone()),
            ExerciseType::Reading => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub english: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub implication: Implication,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Implication {
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub chinese: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    pub id: u32,
    pub word: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_class: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabUsage {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SevenFive {
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub text: String,
}

/// Answer key, one ordered list per exercise type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    #[serde(default)]
    pub vocab: Vec<String>,
    #[serde(default)]
    pub reading: Vec<String>,
    #[serde(default)]
    pub cloze: Vec<String>,
    #[serde(default)]
    pub seven_five: Vec<String>,
    #[serde(default)]
    pub grammar: Vec<String>,
}

impl AnswerSet {
    pub fn key(&self, exercise: ExerciseType) -> &[String] {
        match exercise {
            ExerciseType::VocabUsage => &self.vocab,
            ExerciseType::Reading => &self.reading,
            ExerciseType::Cloze => &self.cloze,
            ExerciseType::SevenFive => &self.seven_five,
            ExerciseType::Grammar => &self.grammar,
        }
    }
}

/// Per-unit audio path patterns. `{id}` is replaced by a two-digit number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPatterns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implication_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_pattern: Option<String>,
}
