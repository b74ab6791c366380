//! Audio source resolution for article paragraphs, implications and words.

use crate::types::{AudioPatterns, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something in a unit that can be read aloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AudioTrack {
    /// 1-based paragraph number.
    Paragraph(u32),
    /// 1-based paragraph number of the implication note.
    Implication(u32),
    /// Vocabulary entry id.
    Vocabulary(u32),
}

impl fmt::Display for AudioTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph(n) => write!(f, "paragraph {}", n),
            Self::Implication(n) => write!(f, "implication {}", n),
            Self::Vocabulary(id) => write!(f, "vocabulary {}", id),
        }
    }
}

/// Path of the recorded audio for a track.
///
/// Uses the unit's pattern when present, otherwise
/// `<default_base>/<unit_id>/<stem>_{id}.mp3`. `{id}` becomes a two-digit
/// zero-padded number.
pub fn resolve_source(
    unit_id: &str,
    patterns: Option<&AudioPatterns>,
    default_base: &str,
    track: AudioTrack,
) -> String {
    let (pattern, stem, id) = match track {
        AudioTrack::Paragraph(n) => {
            (patterns.and_then(|p| p.paragraph_pattern.as_deref()), "paragraph", n)
        }
        AudioTrack::Implication(n) => {
            (patterns.and_then(|p| p.implication_pattern.as_deref()), "impl", n)
        }
        AudioTrack::Vocabulary(n) => {
            (patterns.and_then(|p| p.vocabulary_pattern.as_deref()), "word", n)
        }
    };

    let padded = format!("{:02}", id);
    match pattern {
        Some(p) => p.replace("{id}", &padded),
        None => format!(
            "{}/{}/{}_{}.mp3",
            default_base.trim_end_matches('/'),
            unit_id,
            stem,
            padded
        ),
    }
}

/// Text to speak when no recording is available. `None` when the track does
/// not exist in the unit.
pub fn speech_text(unit: &Unit, track: AudioTrack) -> Option<String> {
    let paragraph = |n: u32| {
        (n as usize)
            .checked_sub(1)
            .and_then(|idx| unit.article.paragraphs.get(idx))
    };

    match track {
        AudioTrack::Paragraph(n) => paragraph(n).map(|p| p.english.clone()),
        AudioTrack::Implication(n) => paragraph(n).map(|p| p.implication.english.clone()),
        AudioTrack::Vocabulary(id) => unit
            .vocabulary
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.word.clone()),
    }
}

/// Sources worth warming up when a unit is opened: one per paragraph.
pub fn paragraph_sources(unit: &Unit, default_base: &str) -> Vec<String> {
    (1..=unit.article.paragraphs.len() as u32)
        .map(|n| {
            resolve_source(
                &unit.unit_id,
                unit.audio.as_ref(),
                default_base,
                AudioTrack::Paragraph(n),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_unit;

    fn unit() -> Unit {
        parse_unit(
            r#"{
                "unitId": "unit1",
                "unitName": "Unit 1",
                "article": { "title": "t", "paragraphs": [
                    { "english": "First.", "implication": { "english": "Note one." } },
                    { "english": "Second." }
                ] },
                "vocabulary": [{ "id": 7, "word": "blaze" }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn default_source_is_zero_padded() {
        let src = resolve_source("unit1", None, "audio/", AudioTrack::Paragraph(3));
        assert_eq!(src, "audio/unit1/paragraph_03.mp3");
        let src = resolve_source("unit1", None, "audio", AudioTrack::Vocabulary(12));
        assert_eq!(src, "audio/unit1/word_12.mp3");
    }

    #[test]
    fn unit_pattern_wins() {
        let patterns = AudioPatterns {
            implication_pattern: Some("media/u1/impl-{id}.ogg".to_string()),
            ..Default::default()
        };
        let src = resolve_source("unit1", Some(&patterns), "audio", AudioTrack::Implication(2));
        assert_eq!(src, "media/u1/impl-02.ogg");
        let src = resolve_source("unit1", Some(&patterns), "audio", AudioTrack::Paragraph(2));
        assert_eq!(src, "audio/unit1/paragraph_02.mp3");
    }

    #[test]
    fn speech_text_looks_up_track() {
        let unit = unit();
        assert_eq!(speech_text(&unit, AudioTrack::Paragraph(2)).as_deref(), Some("Second."));
        assert_eq!(speech_text(&unit, AudioTrack::Implication(1)).as_deref(), Some("Note one."));
        assert_eq!(speech_text(&unit, AudioTrack::Vocabulary(7)).as_deref(), Some("blaze"));
        assert_eq!(speech_text(&unit, AudioTrack::Paragraph(0)), None);
        assert_eq!(speech_text(&unit, AudioTrack::Paragraph(3)), None);
    }

    #[test]
    fn paragraph_sources_cover_article() {
        let sources = paragraph_sources(&unit(), "audio");
        assert_eq!(
            sources,
            vec!["audio/unit1/paragraph_01.mp3", "audio/unit1/paragraph_02.mp3"]
        );
    }
}
