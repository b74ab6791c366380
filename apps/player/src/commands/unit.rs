//! Unit selection commands.

use crate::error::{CommandError, Result};
use crate::loader;
use crate::state::AppState;
use exercise_core::{ExerciseType, InputKind, Unit, UnitIndexEntry};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub unit_id: String,
    pub unit_name: String,
    pub current: bool,
}

#[derive(Debug, Serialize)]
pub struct ExerciseSummary {
    pub exercise: ExerciseType,
    pub input: InputKind,
    pub slots: usize,
}

#[derive(Debug, Serialize)]
pub struct UnitLoaded {
    pub unit_id: String,
    pub unit_name: String,
    pub title: String,
    pub paragraphs: usize,
    pub vocabulary: usize,
    pub exercises: Vec<ExerciseSummary>,
    pub preload: Vec<String>,
}

impl UnitLoaded {
    fn describe(state: &AppState, unit: &Unit) -> Self {
        Self {
            unit_id: unit.unit_id.clone(),
            unit_name: unit.unit_name.clone(),
            title: unit.article.title.clone(),
            paragraphs: unit.article.paragraphs.len(),
            vocabulary: unit.vocabulary.len(),
            exercises: ExerciseType::ALL
                .into_iter()
                .map(|exercise| ExerciseSummary {
                    exercise,
                    input: exercise.input_kind(),
                    slots: unit.slot_count(exercise),
                })
                .collect(),
            preload: state.audio.preload(&state.config, unit),
        }
    }
}

/// List the units in the index.
pub fn list_units(state: &AppState) -> Vec<UnitSummary> {
    let current = state.current_unit().ok().map(|u| u.unit_id.as_str());
    state
        .index
        .iter()
        .map(|e| UnitSummary {
            unit_id: e.unit_id.clone(),
            unit_name: e.unit_name.clone(),
            current: current == Some(e.unit_id.as_str()),
        })
        .collect()
}

/// Load a unit from the index and make it current.
pub fn load_unit(state: &mut AppState, unit_id: &str) -> Result<UnitLoaded> {
    let entry = state
        .find_entry(unit_id)
        .cloned()
        .ok_or_else(|| CommandError::UnitNotFound(unit_id.to_string()))?;

    let unit = loader::load_unit(&state.config, &entry)?;
    state.switch_unit(unit);
    current_unit(state)
}

/// Validate a local unit file, add it to the index and make it current.
///
/// Nothing changes when validation fails.
pub fn upload_unit(state: &mut AppState, path: &Path) -> Result<UnitLoaded> {
    let unit = loader::read_unit_file(path)?;

    let entry = UnitIndexEntry {
        unit_id: format!("upload_{}", chrono::Utc::now().timestamp_millis()),
        unit_name: unit.unit_name.clone(),
        data_url: path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .to_string_lossy()
            .into_owned(),
    };
    tracing::info!("Added uploaded unit {} as {}", unit.unit_id, entry.unit_id);
    state.index.push(entry);

    state.switch_unit(unit);
    current_unit(state)
}

/// Describe the current unit.
pub fn current_unit(state: &AppState) -> Result<UnitLoaded> {
    let unit = state.current_unit()?;
    Ok(UnitLoaded::describe(state, unit))
}

/// Open the requested unit, or the first index entry when it is absent or
/// unknown.
pub fn open_initial(state: &mut AppState, requested: Option<&str>) -> Result<UnitLoaded> {
    let target = requested
        .filter(|id| state.find_entry(id).is_some())
        .map(str::to_string)
        .or_else(|| state.index.first().map(|e| e.unit_id.clone()))
        .ok_or(CommandError::NoUnitLoaded)?;

    if let Some(id) = requested.filter(|id| *id != target) {
        tracing::warn!("Unit {} is not in the index, opening {}", id, target);
    }
    load_unit(state, &target)
}
