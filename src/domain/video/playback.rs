// SPDX-License-Identifier: MPL-2.0
//! Observable playback state.
//!
//! The snapshot is a composite record rather than a single mode enum: each
//! field follows its own source (engine events, user intents, the
//! fullscreen platform, the controls timer).

use super::newtypes::{PlaybackRate, Volume};

/// Immutable view of the player, replaced wholesale on every transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    /// Mirrors the engine's `play`/`pause` events.
    pub is_playing: bool,
    /// Last reported playback position in seconds.
    pub current_time: f64,
    /// Media duration in seconds, `0.0` until metadata is loaded.
    pub duration: f64,
    /// Last explicit volume level, independent of mute.
    pub volume: Volume,
    pub is_muted: bool,
    pub playback_rate: PlaybackRate,
    /// Mirrors the platform's fullscreen notification, not the request.
    pub is_fullscreen: bool,
    pub are_controls_visible: bool,
    pub is_settings_menu_open: bool,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: Volume::default(),
            is_muted: false,
            playback_rate: PlaybackRate::default(),
            is_fullscreen: false,
            are_controls_visible: true,
            is_settings_menu_open: false,
        }
    }
}

impl PlaybackSnapshot {
    /// Returns true once the engine reported a duration.
    #[must_use]
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Position as a fraction of the duration, for the progress track.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        if !self.has_duration() {
            return 0.0;
        }
        (self.current_time / self.duration).clamp(0.0, 1.0)
    }

    /// Level shown by the volume slider (zero while muted).
    #[must_use]
    pub fn displayed_volume(&self) -> f64 {
        if self.is_muted {
            0.0
        } else {
            self.volume.value()
        }
    }

    /// Returns true if the mute icon should be drawn.
    #[must_use]
    pub fn shows_muted_icon(&self) -> bool {
        self.is_muted || self.volume.is_zero()
    }

    /// Returns true if `rate` is the selected entry of the settings menu.
    #[must_use]
    pub fn is_active_rate(&self, rate: f64) -> bool {
        self.playback_rate.matches(rate)
    }
}
