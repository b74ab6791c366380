//! Drag-and-drop placement engine.
//!
//! Each exercise instance (unit × exercise type) gets a board: a fixed pool
//! of options, a number of drop targets taken from the answer key, the
//! current occupants and a LIFO history of placements.

use crate::types::{DragOption, ExerciseType, InstanceKey, Unit, UserAnswers};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Records that an option currently occupies a target slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub target: usize,
    pub option_id: String,
}

/// Why a placement was refused. State is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    UnknownInstance,
    UnknownOption,
    UnknownTarget,
    OptionConsumed,
    TargetOccupied,
}

/// Result of a placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlacementOutcome {
    Placed {
        target: usize,
        option_id: String,
        /// Text the view renders inside the target.
        display: String,
    },
    Rejected {
        reason: Rejection,
    },
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }
}

/// Coarse progress of an exercise instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillState {
    Empty,
    PartiallyFilled,
    FullyFilled,
}

/// Read-only view of one target slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub slot: usize,
    pub option_id: Option<String>,
    pub display: Option<String>,
}

/// Read-only view of a whole board, for rendering and comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub state: FillState,
    pub slots: Vec<SlotView>,
    pub available: Vec<DragOption>,
    pub history_len: usize,
}

#[derive(Debug, Clone)]
struct Board {
    options: Vec<DragOption>,
    slot_count: usize,
    occupants: BTreeMap<usize, String>,
    consumed: HashSet<String>,
    history: Vec<PlacementRecord>,
}

impl Board {
    fn new(options: Vec<DragOption>, slot_count: usize) -> Self {
        Self {
            options,
            slot_count,
            occupants: BTreeMap::new(),
            consumed: HashSet::new(),
            history: Vec::new(),
        }
    }

    fn option(&self, option_id: &str) -> Option<&DragOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    fn place(&mut self, target: usize, option_id: &str) -> PlacementOutcome {
        let Some(option) = self.option(option_id) else {
            return PlacementOutcome::Rejected {
                reason: Rejection::UnknownOption,
            };
        };
        let display = option.display.clone();

        if target == 0 || target > self.slot_count {
            return PlacementOutcome::Rejected {
                reason: Rejection::UnknownTarget,
            };
        }
        if self.consumed.contains(option_id) {
            return PlacementOutcome::Rejected {
                reason: Rejection::OptionConsumed,
            };
        }
        if self.occupants.contains_key(&target) {
            return PlacementOutcome::Rejected {
                reason: Rejection::TargetOccupied,
            };
        }

        self.consumed.insert(option_id.to_string());
        self.occupants.insert(target, option_id.to_string());
        self.history.push(PlacementRecord {
            target,
            option_id: option_id.to_string(),
        });

        PlacementOutcome::Placed {
            target,
            option_id: option_id.to_string(),
            display,
        }
    }

    fn undo(&mut self) -> Option<PlacementRecord> {
        let last = self.history.pop()?;
        self.consumed.remove(&last.option_id);
        self.occupants.remove(&last.target);
        Some(last)
    }

    fn reset(&mut self, expected_slot_count: usize) {
        self.slot_count = expected_slot_count;
        self.occupants.clear();
        self.consumed.clear();
        self.history.clear();
    }

    fn state(&self) -> FillState {
        if self.occupants.is_empty() {
            FillState::Empty
        } else if (1..=self.slot_count).all(|slot| self.occupants.contains_key(&slot)) {
            FillState::FullyFilled
        } else {
            FillState::PartiallyFilled
        }
    }

    fn answers(&self) -> UserAnswers {
        self.occupants
            .iter()
            .map(|(slot, option_id)| (*slot, option_id.clone()))
            .collect()
    }

    fn snapshot(&self) -> BoardSnapshot {
        let slots = (1..=self.slot_count)
            .map(|slot| {
                let option_id = self.occupants.get(&slot).cloned();
                let display = option_id
                    .as_deref()
                    .and_then(|id| self.option(id))
                    .map(|o| o.display.clone());
                SlotView {
                    slot,
                    option_id,
                    display,
                }
            })
            .collect();

        BoardSnapshot {
            state: self.state(),
            slots,
            available: self
                .options
                .iter()
                .filter(|o| !self.consumed.contains(&o.id))
                .cloned()
                .collect(),
            history_len: self.history.len(),
        }
    }
}

/// Tracks placements for any number of exercise instances.
///
/// Instances are independent: two panes showing different units, or the same
/// exercise type of two units, never share state.
#[derive(Debug, Default)]
pub struct PlacementEngine {
    boards: HashMap<InstanceKey, Board>,
}

impl PlacementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) an instance with its option pool and slot
    /// count. Any previous state for the key is dropped.
    pub fn register(&mut self, key: InstanceKey, options: Vec<DragOption>, slot_count: usize) {
        tracing::debug!(instance = %key, options = options.len(), slot_count, "registering board");
        self.boards.insert(key, Board::new(options, slot_count));
    }

    /// Register every drag exercise of a unit, sized by its answer key.
    pub fn register_unit(&mut self, unit: &Unit) {
        for exercise in ExerciseType::ALL {
            if let Some(options) = unit.placement_options(exercise) {
                self.register(
                    InstanceKey::new(unit.unit_id.clone(), exercise),
                    options,
                    unit.slot_count(exercise),
                );
            }
        }
    }

    pub fn contains(&self, key: &InstanceKey) -> bool {
        self.boards.contains_key(key)
    }

    /// Put an option into a target slot.
    pub fn place(&mut self, key: &InstanceKey, target: usize, option_id: &str) -> PlacementOutcome {
        let outcome = match self.boards.get_mut(key) {
            Some(board) => board.place(target, option_id),
            None => PlacementOutcome::Rejected {
                reason: Rejection::UnknownInstance,
            },
        };
        if let PlacementOutcome::Rejected { reason } = &outcome {
            tracing::debug!(instance = %key, target, option_id, ?reason, "placement rejected");
        }
        outcome
    }

    /// Reverse the most recent placement. `None` when there is nothing to undo.
    pub fn undo(&mut self, key: &InstanceKey) -> Option<PlacementRecord> {
        self.boards.get_mut(key)?.undo()
    }

    /// Clear every target and return every option to the pool.
    ///
    /// `expected_slot_count` must be the answer-key length for the exercise.
    pub fn reset_all(&mut self, key: &InstanceKey, expected_slot_count: usize) {
        if let Some(board) = self.boards.get_mut(key) {
            board.reset(expected_slot_count);
        }
    }

    /// Drop every instance belonging to a unit. Returns how many were dropped.
    pub fn discard_unit(&mut self, unit_id: &str) -> usize {
        let before = self.boards.len();
        self.boards.retain(|key, _| key.unit_id != unit_id);
        before - self.boards.len()
    }

    /// Current placements as slot → option id, ready for grading.
    pub fn answers(&self, key: &InstanceKey) -> UserAnswers {
        self.boards.get(key).map(Board::answers).unwrap_or_default()
    }

    pub fn fill_state(&self, key: &InstanceKey) -> FillState {
        self.boards.get(key).map_or(FillState::Empty, Board::state)
    }

    pub fn history(&self, key: &InstanceKey) -> &[PlacementRecord] {
        match self.boards.get(key) {
            Some(board) => &board.history,
            None => &[],
        }
    }

    pub fn occupant(&self, key: &InstanceKey, target: usize) -> Option<&str> {
        self.boards
            .get(key)?
            .occupants
            .get(&target)
            .map(String::as_str)
    }

    pub fn is_consumed(&self, key: &InstanceKey, option_id: &str) -> bool {
        self.boards
            .get(key)
            .is_some_and(|b| b.consumed.contains(option_id))
    }

    pub fn snapshot(&self, key: &InstanceKey) -> Option<BoardSnapshot> {
        self.boards.get(key).map(Board::snapshot)
    }
}
