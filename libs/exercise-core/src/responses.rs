//! Typed fill-ins and multiple-choice selections.
//!
//! These exercises have no option pool or history, only the latest value per
//! slot, so they live apart from the placement engine but share its keys.

use crate::types::{InstanceKey, UserAnswers};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ResponseStore {
    sheets: HashMap<InstanceKey, UserAnswers>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a typed answer or selected option, replacing any earlier value.
    pub fn record(&mut self, key: &InstanceKey, slot: usize, value: impl Into<String>) {
        self.sheets
            .entry(key.clone())
            .or_default()
            .insert(slot, value);
    }

    pub fn clear(&mut self, key: &InstanceKey, slot: usize) -> Option<String> {
        self.sheets.get_mut(key)?.remove(slot)
    }

    pub fn answers(&self, key: &InstanceKey) -> UserAnswers {
        self.sheets.get(key).cloned().unwrap_or_default()
    }

    /// Clear slots `1..=expected_slot_count`. The count comes from the
    /// answer key.
    pub fn reset(&mut self, key: &InstanceKey, expected_slot_count: usize) {
        if let Some(sheet) = self.sheets.get_mut(key) {
            for slot in 1..=expected_slot_count {
                sheet.remove(slot);
            }
            if sheet.is_empty() {
                self.sheets.remove(key);
            }
        }
    }

    /// Drop every sheet belonging to a unit.
    pub fn discard_unit(&mut self, unit_id: &str) -> usize {
        let before = self.sheets.len();
        self.sheets.retain(|key, _| key.unit_id != unit_id);
        before - self.sheets.len()
    }
}
