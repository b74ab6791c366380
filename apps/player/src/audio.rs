//! Audio playback tracking.
//!
//! At most one track plays at a time. A recorded file is preferred; when it
//! is missing the controller falls back to speech synthesis of the text.

use crate::config::Config;
use crate::error::{CommandError, Result};
use exercise_core::audio::{paragraph_sources, resolve_source, speech_text, AudioTrack};
use exercise_core::Unit;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Playback {
    File { source: String },
    Speech { text: String, lang: String, rate: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivePlayback {
    pub unit_id: String,
    pub track: AudioTrack,
    pub playback: Playback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AudioEvent {
    Started { now_playing: ActivePlayback },
    Stopped { stopped: Option<ActivePlayback> },
}

#[derive(Debug, Default)]
pub struct AudioController {
    active: Option<ActivePlayback>,
}

impl AudioController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_playing(&self) -> Option<&ActivePlayback> {
        self.active.as_ref()
    }

    /// Start `track`, or stop it if it is already playing.
    pub fn toggle(
        &mut self,
        config: &Config,
        unit: &Unit,
        track: AudioTrack,
    ) -> Result<AudioEvent> {
        let same_track = self
            .active
            .as_ref()
            .is_some_and(|a| a.unit_id == unit.unit_id && a.track == track);
        if same_track {
            return Ok(AudioEvent::Stopped {
                stopped: self.stop(),
            });
        }

        let text = speech_text(unit, track)
            .ok_or_else(|| CommandError::UnknownTrack(track.to_string()))?;
        let source = resolve_source(
            &unit.unit_id,
            unit.audio.as_ref(),
            &config.audio_base,
            track,
        );

        let playback = if config.resolve(&source).is_file() {
            Playback::File { source }
        } else {
            tracing::warn!("No recording at {}, falling back to speech for {}", source, track);
            Playback::Speech {
                text,
                lang: config.tts_lang.clone(),
                rate: config.tts_rate,
            }
        };

        self.stop();
        let now_playing = ActivePlayback {
            unit_id: unit.unit_id.clone(),
            track,
            playback,
        };
        self.active = Some(now_playing.clone());
        Ok(AudioEvent::Started { now_playing })
    }

    /// Stop whatever is playing.
    pub fn stop(&mut self) -> Option<ActivePlayback> {
        let stopped = self.active.take();
        if let Some(ref s) = stopped {
            tracing::debug!("Stopped {} of {}", s.track, s.unit_id);
        }
        stopped
    }

    /// Paragraph sources to warm up for a freshly opened unit.
    pub fn preload(&self, config: &Config, unit: &Unit) -> Vec<String> {
        paragraph_sources(unit, &config.audio_base)
    }
}
