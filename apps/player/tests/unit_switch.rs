//! Unit loading, upload and the switch transaction.

mod common;

use pretty_assertions::assert_eq;

use common::{fixtures, TestContext};
use exercise_core::{AudioTrack, ExerciseType, FillState, InstanceKey};
use unit_player::commands;
use unit_player::error::CommandError;

#[test]
fn switching_units_discards_pending_placements() {
    let ctx = TestContext::with_units(&["unitA", "unitB"]);
    let mut state = ctx.state();
    commands::load_unit(&mut state, "unitA").unwrap();

    commands::place(&mut state, ExerciseType::VocabUsage, 1, "fire").unwrap();
    commands::place(&mut state, ExerciseType::SevenFive, 1, "b").unwrap();
    commands::fill(&mut state, ExerciseType::Cloze, 1, "London").unwrap();

    commands::load_unit(&mut state, "unitB").unwrap();
    let key_a = InstanceKey::new("unitA", ExerciseType::VocabUsage);
    assert!(!state.placements.contains(&key_a));
    assert!(state
        .responses
        .answers(&InstanceKey::new("unitA", ExerciseType::Cloze))
        .is_empty());

    commands::load_unit(&mut state, "unitA").unwrap();
    for exercise in [ExerciseType::VocabUsage, ExerciseType::SevenFive] {
        let status = commands::status(&state, exercise).unwrap();
        assert_eq!(status.board.unwrap().state, FillState::Empty);
    }
    assert!(commands::undo(&mut state, ExerciseType::VocabUsage)
        .unwrap()
        .undone
        .is_none());
    assert!(commands::status(&state, ExerciseType::Cloze)
        .unwrap()
        .answers
        .is_empty());
}

#[test]
fn switching_units_stops_audio() {
    let ctx = TestContext::with_units(&["unitA", "unitB"]);
    let mut state = ctx.state();
    commands::load_unit(&mut state, "unitA").unwrap();

    commands::play(&mut state, AudioTrack::Paragraph(1)).unwrap();
    assert!(state.audio.now_playing().is_some());

    commands::load_unit(&mut state, "unitB").unwrap();
    assert!(state.audio.now_playing().is_none());
}

#[test]
fn list_units_flags_current() {
    let ctx = TestContext::with_units(&["unitA", "unitB"]);
    let mut state = ctx.state();
    commands::load_unit(&mut state, "unitB").unwrap();

    let units = commands::list_units(&state);
    let flags: Vec<(&str, bool)> = units
        .iter()
        .map(|u| (u.unit_id.as_str(), u.current))
        .collect();
    assert_eq!(flags, vec![("unitA", false), ("unitB", true)]);
}

#[test]
fn loaded_unit_describes_slot_counts() {
    let ctx = TestContext::with_units(&["unit1"]);
    let mut state = ctx.state();
    let loaded = commands::load_unit(&mut state, "unit1").unwrap();

    let counts: Vec<(ExerciseType, usize)> = loaded
        .exercises
        .iter()
        .map(|e| (e.exercise, e.slots))
        .collect();
    assert_eq!(
        counts,
        vec![
            (ExerciseType::VocabUsage, 3),
            (ExerciseType::Reading, 2),
            (ExerciseType::Cloze, 2),
            (ExerciseType::SevenFive, 2),
            (ExerciseType::Grammar, 1),
        ]
    );
    assert_eq!(
        loaded.preload,
        vec!["audio/unit1/paragraph_01.mp3", "audio/unit1/paragraph_02.mp3"]
    );
}

#[test]
fn unknown_unit_is_reported() {
    let ctx = TestContext::with_units(&["unit1"]);
    let mut state = ctx.state();
    let result = commands::load_unit(&mut state, "unit9");
    assert!(matches!(result, Err(CommandError::UnitNotFound(id)) if id == "unit9"));
}

#[test]
fn open_initial_falls_back_to_first_entry() {
    let ctx = TestContext::with_units(&["unitA", "unitB"]);
    let mut state = ctx.state();

    let loaded = commands::open_initial(&mut state, Some("missing")).unwrap();
    assert_eq!(loaded.unit_id, "unitA");

    let loaded = commands::open_initial(&mut state, Some("unitB")).unwrap();
    assert_eq!(loaded.unit_id, "unitB");
}

#[test]
fn upload_adds_entry_and_switches() {
    let ctx = TestContext::with_units(&["unitA"]);
    let mut state = ctx.state();
    commands::load_unit(&mut state, "unitA").unwrap();
    commands::place(&mut state, ExerciseType::SevenFive, 1, "b").unwrap();

    let path = ctx.write_json("uploads/mine.json", &fixtures::fire_unit("custom"));
    let loaded = commands::upload_unit(&mut state, &path).unwrap();

    assert_eq!(loaded.unit_id, "custom");
    assert_eq!(state.index.len(), 2);
    assert!(state.index[1].unit_id.starts_with("upload_"));
    assert!(!state
        .placements
        .contains(&InstanceKey::new("unitA", ExerciseType::SevenFive)));

    let upload_id = state.index[1].unit_id.clone();
    let reloaded = commands::load_unit(&mut state, &upload_id).unwrap();
    assert_eq!(reloaded.unit_id, "custom");
}

#[test]
fn invalid_upload_changes_nothing() {
    let ctx = TestContext::with_units(&["unitA"]);
    let mut state = ctx.state();
    commands::load_unit(&mut state, "unitA").unwrap();
    commands::place(&mut state, ExerciseType::SevenFive, 1, "b").unwrap();

    let path = ctx.write("uploads/bad.json", r#"{ "unitId": "x", "unitName": "No article" }"#);
    let result = commands::upload_unit(&mut state, &path);

    assert!(matches!(result, Err(CommandError::Parse(_))));
    assert_eq!(state.index.len(), 1);
    assert_eq!(state.current_unit().unwrap().unit_id, "unitA");
    assert_eq!(
        state
            .placements
            .occupant(&InstanceKey::new("unitA", ExerciseType::SevenFive), 1),
        Some("b")
    );
}

#[test]
fn missing_index_uses_builtin_entries() {
    let ctx = TestContext::with_units(&[]);
    std::fs::remove_file(ctx.root().join("data/units-index.json")).unwrap();
    ctx.write_json("data/unit1.json", &fixtures::fire_unit("unit1"));

    let mut state = ctx.state();
    assert_eq!(state.index.len(), 2);
    let loaded = commands::load_unit(&mut state, "unit1").unwrap();
    assert_eq!(loaded.unit_id, "unit1");
}
