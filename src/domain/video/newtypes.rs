// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges.

use crate::config::{
    DEFAULT_KEYBOARD_SEEK_STEP_SECS, DEFAULT_PLAYBACK_RATE, DEFAULT_VOLUME,
    MAX_KEYBOARD_SEEK_STEP_SECS, MAX_VOLUME, MIN_KEYBOARD_SEEK_STEP_SECS, MIN_VOLUME,
    PLAYBACK_RATE_PRESETS, UNMUTE_RESTORE_VOLUME,
};

/// Tolerance used when matching a requested rate against the presets.
const RATE_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Volume
// =============================================================================

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// Explicit levels are stored as given. Relative steps are rounded to two
/// decimals so repeated keyboard steps never drift into an inaudible
/// non-zero level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f64);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    ///
    /// Non-finite input is treated as silence.
    #[must_use]
    pub fn new(volume: f64) -> Self {
        if !volume.is_finite() {
            return Self(MIN_VOLUME);
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    /// The level restored when un-muting at zero volume.
    #[must_use]
    pub fn restore_level() -> Self {
        Self(UNMUTE_RESTORE_VOLUME)
    }

    /// Returns the volume value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if the level is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 <= MIN_VOLUME
    }

    /// Shifts the volume by `delta`, rounded to 0.01 and clamped to the
    /// valid range.
    #[must_use]
    pub fn adjusted(self, delta: f64) -> Self {
        Self::new(((self.0 + delta) * 100.0).round() / 100.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

// =============================================================================
// PlaybackRate
// =============================================================================

/// Playback rate restricted to the settings menu presets.
///
/// There is no clamping constructor: a rate outside the preset list
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Returns the preset matching `rate`, or `None` if it is not offered.
    #[must_use]
    pub fn from_preset(rate: f64) -> Option<Self> {
        PLAYBACK_RATE_PRESETS
            .iter()
            .copied()
            .find(|preset| (preset - rate).abs() < RATE_TOLERANCE)
            .map(Self)
    }

    /// All selectable rates, slowest first.
    #[must_use]
    pub fn presets() -> impl Iterator<Item = Self> {
        PLAYBACK_RATE_PRESETS.iter().copied().map(Self)
    }

    /// Returns the rate as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if `rate` designates this preset.
    #[must_use]
    pub fn matches(self, rate: f64) -> bool {
        (self.0 - rate).abs() < RATE_TOLERANCE
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self(DEFAULT_PLAYBACK_RATE)
    }
}

// =============================================================================
// KeyboardSeekStep
// =============================================================================

/// Keyboard seek step in seconds for ArrowLeft/ArrowRight.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (0.5–30.0 seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardSeekStep(f64);

impl KeyboardSeekStep {
    /// Creates a new keyboard seek step value, clamping to valid range.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(MIN_KEYBOARD_SEEK_STEP_SECS, MAX_KEYBOARD_SEEK_STEP_SECS))
    }

    /// Returns the value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for KeyboardSeekStep {
    fn default() -> Self {
        Self(DEFAULT_KEYBOARD_SEEK_STEP_SECS)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Volume tests
    // -------------------------------------------------------------------------

    #[test]
    fn volume_clamps_to_valid_range() {
        assert_abs_diff_eq!(Volume::new(-0.5).value(), MIN_VOLUME);
        assert_abs_diff_eq!(Volume::new(2.0).value(), MAX_VOLUME);
        assert_abs_diff_eq!(Volume::new(0.5).value(), 0.5);
    }

    #[test]
    fn volume_keeps_explicit_levels_exactly() {
        for level in [0.004, 0.125, 0.333] {
            assert_eq!(Volume::new(level).value(), level);
        }
        assert!(!Volume::new(0.004).is_zero());
    }

    #[test]
    fn volume_rejects_non_finite_input() {
        assert!(Volume::new(f64::NAN).is_zero());
        assert!(Volume::new(f64::INFINITY).is_zero());
    }

    #[test]
    fn volume_steps_do_not_drift() {
        let mut volume = Volume::new(1.0);
        for _ in 0..10 {
            volume = volume.adjusted(-0.1);
        }
        assert!(volume.is_zero());

        for _ in 0..3 {
            volume = volume.adjusted(0.1);
        }
        assert_abs_diff_eq!(volume.value(), 0.3);
    }

    #[test]
    fn volume_adjusted_saturates_at_bounds() {
        assert_abs_diff_eq!(Volume::new(0.95).adjusted(0.1).value(), MAX_VOLUME);
        assert!(Volume::new(0.05).adjusted(-0.1).is_zero());
    }

    #[test]
    fn volume_step_from_off_grid_level_lands_on_grid() {
        assert_abs_diff_eq!(Volume::new(0.333).adjusted(0.1).value(), 0.43);
        assert!(Volume::new(0.004).adjusted(-0.1).is_zero());
    }

    #[test]
    fn volume_default_and_restore_are_full() {
        assert_abs_diff_eq!(Volume::default().value(), 1.0);
        assert_abs_diff_eq!(Volume::restore_level().value(), 1.0);
    }

    // -------------------------------------------------------------------------
    // PlaybackRate tests
    // -------------------------------------------------------------------------

    #[test]
    fn playback_rate_accepts_presets_only() {
        for rate in [0.5, 1.0, 1.5, 2.0] {
            let preset = PlaybackRate::from_preset(rate).expect("preset should be accepted");
            assert_abs_diff_eq!(preset.value(), rate);
        }
        for rate in [0.0, -1.0, 0.75, 1.25, 3.0, f64::NAN] {
            assert!(PlaybackRate::from_preset(rate).is_none(), "rate {rate}");
        }
    }

    #[test]
    fn playback_rate_presets_are_ordered() {
        let values: Vec<f64> = PlaybackRate::presets().map(PlaybackRate::value).collect();
        assert_eq!(values, vec![0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn playback_rate_default_is_normal_speed() {
        assert!(PlaybackRate::default().matches(1.0));
        assert!(!PlaybackRate::default().matches(1.5));
    }

    // -------------------------------------------------------------------------
    // KeyboardSeekStep tests
    // -------------------------------------------------------------------------

    #[test]
    fn keyboard_seek_step_clamps_to_valid_range() {
        assert_abs_diff_eq!(
            KeyboardSeekStep::new(0.0).value(),
            MIN_KEYBOARD_SEEK_STEP_SECS
        );
        assert_abs_diff_eq!(
            KeyboardSeekStep::new(100.0).value(),
            MAX_KEYBOARD_SEEK_STEP_SECS
        );
        assert_abs_diff_eq!(KeyboardSeekStep::new(10.0).value(), 10.0);
    }

    #[test]
    fn keyboard_seek_step_default_is_five_seconds() {
        assert_abs_diff_eq!(KeyboardSeekStep::default().value(), 5.0);
        assert_abs_diff_eq!(KeyboardSeekStep::new(f64::NAN).value(), 5.0);
    }
}
