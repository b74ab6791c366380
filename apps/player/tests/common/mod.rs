//! Common test utilities for player integration tests.
//!
//! `TestContext` lays out a site root (index, unit files, audio) in a
//! temporary directory and builds an `AppState` over it.

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use unit_player::config::Config;
use unit_player::state::AppState;

pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a site root with an index and one fire unit per id.
    pub fn with_units(unit_ids: &[&str]) -> Self {
        let ctx = Self {
            dir: TempDir::new().expect("create temp dir"),
        };
        ctx.write_json("data/units-index.json", &fixtures::index_for(unit_ids));
        for id in unit_ids {
            ctx.write_json(&format!("data/{}.json", id), &fixtures::fire_unit(id));
        }
        ctx
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> Config {
        Config::with_root(self.root())
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.config())
    }

    pub fn write_json(&self, relative: &str, value: &Value) -> PathBuf {
        self.write(relative, &serde_json::to_string_pretty(value).expect("encode fixture"))
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(&path, content).expect("write fixture");
        path
    }
}
