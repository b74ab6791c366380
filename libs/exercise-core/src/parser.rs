//! Unit JSON parser.
//!
//! A unit file must carry `unitId`, `unitName` and `article`. Every exercise
//! block is optional; a missing answer list means the exercise has no
//! gradable slots.
//!
//! # Format
//! ```json
//! {
//!   "unitId": "unit1",
//!   "unitName": "Unit 1",
//!   "article": { "title": "A Fire", "paragraphs": [] },
//!   "clozeText": "It was a <input id='cloze-1'> night.",
//!   "answers": { "cloze": ["dark"] }
//! }
//! ```

use crate::error::{ParseError, Result};
use crate::types::{
    AnswerSet, Article, AudioPatterns, ExerciseType, ReadingQuestion, SevenFive, Unit,
    UnitIndexEntry, VocabEntry, VocabUsage,
};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Parse and validate unit JSON.
pub fn parse_unit(content: &str) -> Result<Unit> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let raw: RawUnit = serde_json::from_str(content)?;
    let unit = raw.build()?;
    check_slot_drift(&unit);
    Ok(unit)
}

/// Parse a unit index file.
pub fn parse_index(content: &str) -> Result<Vec<UnitIndexEntry>> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(serde_json::from_str(content)?)
}

/// Slot numbers found in `id='<prefix>-N'` markers of a template.
pub fn slot_markers(template: &str, prefix: &str) -> BTreeSet<usize> {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    let marker = MARKER.get_or_init(|| {
        Regex::new(r#"id=['"]([a-z\-]+)-(\d+)['"]"#).expect("valid marker pattern")
    });

    marker
        .captures_iter(template)
        .filter(|caps| &caps[1] == prefix)
        .filter_map(|caps| caps[2].parse().ok())
        .collect()
}

/// The answer key decides how many slots an exercise has. A template whose
/// markers disagree is still accepted, but the mismatch is worth a warning.
fn check_slot_drift(unit: &Unit) {
    for exercise in ExerciseType::ALL {
        let (Some(template), Some(prefix)) = (unit.template(exercise), exercise.marker_prefix())
        else {
            continue;
        };
        let markers = slot_markers(&template, prefix);
        if markers.is_empty() {
            continue;
        }
        let expected = unit.slot_count(exercise);
        if markers.len() != expected {
            tracing::warn!(
                unit = %unit.unit_id,
                %exercise,
                markers = markers.len(),
                answers = expected,
                "template slot count differs from answer key"
            );
        }
    }
}

/// Unit as it appears on disk, before required fields are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUnit {
    unit_id: Option<String>,
    unit_name: Option<String>,
    article: Option<Article>,
    #[serde(default)]
    vocabulary: Vec<VocabEntry>,
    vocab_usage: Option<VocabUsage>,
    #[serde(default)]
    reading_comprehension: Vec<ReadingQuestion>,
    #[serde(default)]
    cloze_text: String,
    seven_five: Option<SevenFive>,
    #[serde(default)]
    grammar_text: String,
    #[serde(default)]
    answers: AnswerSet,
    audio: Option<AudioPatterns>,
}

impl RawUnit {
    fn build(self) -> Result<Unit> {
        let unit_id = required_text(self.unit_id, "unitId")?;
        let unit_name = required_text(self.unit_name, "unitName")?;
        let article = self
            .article
            .ok_or(ParseError::MissingField { field: "article" })?;

        Ok(Unit {
            unit_id,
            unit_name,
            article,
            vocabulary: self.vocabulary,
            vocab_usage: self.vocab_usage,
            reading_comprehension: self.reading_comprehension,
            cloze_text: self.cloze_text,
            seven_five: self.seven_five,
            grammar_text: self.grammar_text,
            answers: self.answers,
            audio: self.audio,
        })
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ParseError::MissingField { field }),
    }
}
