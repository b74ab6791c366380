//! Unit index and unit file loading.
//!
//! The index lists `{ unitId, unitName, dataUrl }` entries. `dataUrl` is
//! resolved against the configured site root.

use crate::config::Config;
use crate::error::Result;
use exercise_core::parser::{parse_index, parse_unit};
use exercise_core::{Unit, UnitIndexEntry};
use std::fs;
use std::path::Path;

/// Index used when the index file is missing or unreadable.
pub fn builtin_index() -> Vec<UnitIndexEntry> {
    vec![
        UnitIndexEntry {
            unit_id: "unit1".to_string(),
            unit_name: "Unit 1 – A Severe Fire in Hong Kong".to_string(),
            data_url: "./data/unit1.json".to_string(),
        },
        UnitIndexEntry {
            unit_id: "unit2".to_string(),
            unit_name: "Unit 2 – The Rise of Blindbox".to_string(),
            data_url: "./data/unit2.json".to_string(),
        },
    ]
}

/// Load the unit index, falling back to the built-in index on failure.
pub fn load_index(config: &Config) -> Vec<UnitIndexEntry> {
    let path = config.index_path();
    let loaded = fs::read_to_string(&path)
        .map_err(crate::error::CommandError::from)
        .and_then(|content| Ok(parse_index(&content)?));

    match loaded {
        Ok(entries) => {
            tracing::info!("Loaded {} units from {}", entries.len(), path.display());
            entries
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load unit index {}: {}, using built-in index",
                path.display(),
                e
            );
            builtin_index()
        }
    }
}

/// Read and validate the unit an index entry points at.
pub fn load_unit(config: &Config, entry: &UnitIndexEntry) -> Result<Unit> {
    read_unit_file(&config.resolve(&entry.data_url))
}

/// Read and validate a unit file.
pub fn read_unit_file(path: &Path) -> Result<Unit> {
    let content = fs::read_to_string(path)?;
    let unit = parse_unit(&content)?;
    tracing::debug!("Parsed unit {} from {}", unit.unit_id, path.display());
    Ok(unit)
}
