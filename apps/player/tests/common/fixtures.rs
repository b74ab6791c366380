//! Test fixtures and factory functions for unit data.

use serde_json::{json, Value};

/// A unit exercising every block. Answer keys:
/// - vocab: fire, ignite, blaze
/// - sevenFive: b, a
/// - cloze: London, dark
/// - grammar: was
/// - reading: A, B
pub fn fire_unit(unit_id: &str) -> Value {
    json!({
        "unitId": unit_id,
        "unitName": format!("{} – A Severe Fire", unit_id),
        "article": {
            "title": "A Severe Fire\nin Hong Kong",
            "paragraphs": [
                {
                    "english": "A fire broke out in a tower block.",
                    "translation": "一座大厦发生火灾。",
                    "implication": { "english": "Safety matters.", "chinese": "安全很重要。" }
                },
                {
                    "english": "Firefighters worked through the night.",
                    "translation": "消防员通宵工作。",
                    "implication": { "english": "Courage.", "chinese": "勇气。" }
                }
            ]
        },
        "vocabulary": [
            { "id": 1, "word": "blaze", "meaning": "a large fire" },
            { "id": 2, "word": "ignite", "meaning": "to catch fire" }
        ],
        "vocabUsage": {
            "options": ["fire", "ignite", "blaze", "spark"],
            "questions": [
                "The <span class='vocab-dropzone' id='vocab-drop-1'></span> spread fast.",
                "Sparks can <span class='vocab-dropzone' id='vocab-drop-2'></span> dry grass.",
                "The <span class='vocab-dropzone' id='vocab-drop-3'></span> lit the sky."
            ]
        },
        "readingComprehension": [
            {
                "question": "Where was the fire?",
                "options": [
                    { "id": "A", "text": "In a tower block" },
                    { "id": "B", "text": "In a forest" }
                ]
            },
            {
                "question": "Who worked through the night?",
                "options": [
                    { "id": "A", "text": "Residents" },
                    { "id": "B", "text": "Firefighters" }
                ]
            }
        ],
        "clozeText": "It happened in <input id='cloze-1'> on a <input id='cloze-2'> night.",
        "sevenFive": {
            "options": [
                { "id": "a", "text": "Smoke filled the corridors." },
                { "id": "b", "text": "The alarm sounded at midnight." },
                { "id": "c", "text": "Nobody expected rain." }
            ],
            "text": "<span id='drop-1'></span> Then <span id='drop-2'></span>"
        },
        "grammarText": "The building <input id='grammar-1'> old.",
        "answers": {
            "vocab": ["fire", "ignite", "blaze"],
            "reading": ["A", "B"],
            "cloze": ["London", "dark"],
            "sevenFive": ["b", "a"],
            "grammar": ["was"]
        }
    })
}

/// Index entries for the given unit ids, pointing at `./data/<id>.json`.
pub fn index_for(unit_ids: &[&str]) -> Value {
    Value::Array(
        unit_ids
            .iter()
            .map(|id| {
                json!({
                    "unitId": id,
                    "unitName": format!("Unit {}", id),
                    "dataUrl": format!("./data/{}.json", id),
                })
            })
            .collect(),
    )
}
