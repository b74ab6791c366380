//! Headless unit player.
//!
//! Loads units from a site root, keeps placement and answer state for the
//! current unit and drives everything through line commands on stdin.

pub mod audio;
pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod shell;
pub mod state;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "unit-player", version, about = "Interactive language-unit exercise player")]
pub struct Cli {
    /// Site root holding data/ and audio/
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Unit index file, relative to the root
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Unit to open first
    #[arg(long)]
    pub unit: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the environment configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(index) = &self.index {
            config.index = index.clone();
        }
        config
    }
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.apply(Config::from_env());
    tracing::info!("Using site root {}", config.root.display());

    let mut state = AppState::new(config);
    match commands::open_initial(&mut state, cli.unit.as_deref()) {
        Ok(loaded) => tracing::info!("Opened {}", loaded.unit_name),
        Err(e) => tracing::error!("Failed to open initial unit: {}", e),
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell::run_shell(&mut state, stdin.lock(), stdout.lock()).context("shell terminated")?;

    Ok(())
}
