//! Audio commands.

use crate::audio::AudioEvent;
use crate::error::Result;
use crate::state::AppState;
use exercise_core::AudioTrack;

/// Start or stop a track of the current unit.
pub fn play(state: &mut AppState, track: AudioTrack) -> Result<AudioEvent> {
    state.toggle_audio(track)
}

/// Stop any playback.
pub fn stop(state: &mut AppState) -> AudioEvent {
    AudioEvent::Stopped {
        stopped: state.audio.stop(),
    }
}
