//! Player configuration from the environment.
//!
//! Variables (a `.env` file is honoured):
//! - `UNIT_PLAYER_ROOT`: site root that data and audio paths resolve against
//! - `UNIT_PLAYER_INDEX`: index file relative to the root
//! - `UNIT_PLAYER_AUDIO_BASE`: audio directory for units without patterns
//! - `UNIT_PLAYER_TTS_LANG`, `UNIT_PLAYER_TTS_RATE`: speech fallback voice

use std::path::{Path, PathBuf};

const DEFAULT_INDEX: &str = "data/units-index.json";
const DEFAULT_AUDIO_BASE: &str = "audio";
const DEFAULT_TTS_LANG: &str = "en-GB";
const DEFAULT_TTS_RATE: f32 = 0.85;

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub index: PathBuf,
    pub audio_base: String,
    pub tts_lang: String,
    pub tts_rate: f32,
}

impl Config {
    /// Build from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let root = std::env::var("UNIT_PLAYER_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_root());
        let index = std::env::var("UNIT_PLAYER_INDEX")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_INDEX));
        let audio_base = std::env::var("UNIT_PLAYER_AUDIO_BASE")
            .unwrap_or_else(|_| DEFAULT_AUDIO_BASE.to_string());
        let tts_lang = std::env::var("UNIT_PLAYER_TTS_LANG")
            .unwrap_or_else(|_| DEFAULT_TTS_LANG.to_string());
        let tts_rate = std::env::var("UNIT_PLAYER_TTS_RATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTS_RATE);

        Self {
            root,
            index,
            audio_base,
            tts_lang,
            tts_rate,
        }
    }

    /// Configuration rooted at `root` with every other value at its default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: PathBuf::from(DEFAULT_INDEX),
            audio_base: DEFAULT_AUDIO_BASE.to_string(),
            tts_lang: DEFAULT_TTS_LANG.to_string(),
            tts_rate: DEFAULT_TTS_RATE,
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.resolve(&self.index.to_string_lossy())
    }

    /// Resolve a site-relative URL such as `./data/unit1.json` or
    /// `/audio/unit1/word_01.mp3` to a path under the root. Absolute paths
    /// that already exist (uploaded files) are kept as they are.
    pub fn resolve(&self, url: &str) -> PathBuf {
        let path = Path::new(url);
        if path.is_absolute() && (path.starts_with(&self.root) || path.exists()) {
            return path.to_path_buf();
        }
        let relative = url.trim_start_matches("./").trim_start_matches('/');
        self.root.join(relative)
    }
}

fn default_root() -> PathBuf {
    if Path::new("data").is_dir() {
        return PathBuf::from(".");
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("unit-player")
}
