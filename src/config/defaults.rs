// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Volume**: Audio level bounds and keyboard step
//! - **Seek**: Keyboard seek step bounds
//! - **Playback rate**: The fixed speed choices
//! - **Controls**: Auto-hide window for the control overlay
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f64 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f64 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f64 = 1.0;

/// Volume adjustment per ArrowUp/ArrowDown press (10%).
pub const VOLUME_STEP: f64 = 0.1;

/// Volume level restored when un-muting at zero volume.
pub const UNMUTE_RESTORE_VOLUME: f64 = 1.0;

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Default keyboard seek step in seconds (ArrowLeft/ArrowRight).
pub const DEFAULT_KEYBOARD_SEEK_STEP_SECS: f64 = 5.0;

/// Minimum keyboard seek step in seconds.
pub const MIN_KEYBOARD_SEEK_STEP_SECS: f64 = 0.5;

/// Maximum keyboard seek step in seconds.
pub const MAX_KEYBOARD_SEEK_STEP_SECS: f64 = 30.0;

// ==========================================================================
// Playback Rate Defaults
// ==========================================================================

/// The only playback rates offered by the settings menu.
pub const PLAYBACK_RATE_PRESETS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Default playback rate.
pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Idle time before the control overlay hides during playback (ms).
pub const DEFAULT_CONTROLS_HIDE_DELAY_MS: u64 = 3000;

/// Minimum auto-hide delay (ms).
pub const MIN_CONTROLS_HIDE_DELAY_MS: u64 = 500;

/// Maximum auto-hide delay (ms).
pub const MAX_CONTROLS_HIDE_DELAY_MS: u64 = 30_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_VOLUME < MAX_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);
    assert!(UNMUTE_RESTORE_VOLUME > MIN_VOLUME);

    assert!(MIN_KEYBOARD_SEEK_STEP_SECS > 0.0);
    assert!(MAX_KEYBOARD_SEEK_STEP_SECS >= MIN_KEYBOARD_SEEK_STEP_SECS);
    assert!(DEFAULT_KEYBOARD_SEEK_STEP_SECS >= MIN_KEYBOARD_SEEK_STEP_SECS);
    assert!(DEFAULT_KEYBOARD_SEEK_STEP_SECS <= MAX_KEYBOARD_SEEK_STEP_SECS);

    assert!(MIN_CONTROLS_HIDE_DELAY_MS > 0);
    assert!(MAX_CONTROLS_HIDE_DELAY_MS >= MIN_CONTROLS_HIDE_DELAY_MS);
    assert!(DEFAULT_CONTROLS_HIDE_DELAY_MS >= MIN_CONTROLS_HIDE_DELAY_MS);
    assert!(DEFAULT_CONTROLS_HIDE_DELAY_MS <= MAX_CONTROLS_HIDE_DELAY_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
