//! Application state.

use crate::audio::{AudioController, AudioEvent};
use crate::config::Config;
use crate::error::{CommandError, Result};
use crate::loader;
use exercise_core::{
    AudioTrack, ExerciseType, GradingEngine, InstanceKey, PlacementEngine, ResponseStore, Unit,
    UnitIndexEntry,
};

/// Everything the player holds for one learner.
pub struct AppState {
    pub config: Config,
    pub index: Vec<UnitIndexEntry>,
    pub placements: PlacementEngine,
    pub responses: ResponseStore,
    pub grading: GradingEngine,
    pub audio: AudioController,
    current: Option<Unit>,
}

impl AppState {
    /// Create state and read the unit index.
    pub fn new(config: Config) -> Self {
        let index = loader::load_index(&config);
        Self::with_index(config, index)
    }

    pub fn with_index(config: Config, index: Vec<UnitIndexEntry>) -> Self {
        Self {
            config,
            index,
            placements: PlacementEngine::new(),
            responses: ResponseStore::new(),
            grading: GradingEngine::new(),
            audio: AudioController::new(),
            current: None,
        }
    }

    pub fn current_unit(&self) -> Result<&Unit> {
        self.current.as_ref().ok_or(CommandError::NoUnitLoaded)
    }

    pub fn find_entry(&self, unit_id: &str) -> Option<&UnitIndexEntry> {
        self.index.iter().find(|e| e.unit_id == unit_id)
    }

    /// Instance key of an exercise in the current unit.
    pub fn key(&self, exercise: ExerciseType) -> Result<InstanceKey> {
        Ok(InstanceKey::new(self.current_unit()?.unit_id.clone(), exercise))
    }

    /// Start or stop a track of the current unit.
    pub fn toggle_audio(&mut self, track: AudioTrack) -> Result<AudioEvent> {
        let unit = self.current.as_ref().ok_or(CommandError::NoUnitLoaded)?;
        self.audio.toggle(&self.config, unit, track)
    }

    /// Replace the current unit.
    ///
    /// Audio stops and every instance of the outgoing unit is discarded
    /// before the incoming unit's boards are registered, so an incoming unit
    /// with the same id never sees stale history.
    pub fn switch_unit(&mut self, unit: Unit) {
        self.audio.stop();

        if let Some(previous) = self.current.take() {
            let boards = self.placements.discard_unit(&previous.unit_id);
            let sheets = self.responses.discard_unit(&previous.unit_id);
            tracing::debug!(
                "Discarded {} boards and {} answer sheets of {}",
                boards,
                sheets,
                previous.unit_id
            );
        }
        self.placements.discard_unit(&unit.unit_id);
        self.responses.discard_unit(&unit.unit_id);

        self.placements.register_unit(&unit);
        tracing::info!("Switched to unit {} ({})", unit.unit_id, unit.unit_name);
        self.current = Some(unit);
    }
}
