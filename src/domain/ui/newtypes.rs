// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.

use crate::config::{
    DEFAULT_CONTROLS_HIDE_DELAY_MS, MAX_CONTROLS_HIDE_DELAY_MS, MIN_CONTROLS_HIDE_DELAY_MS,
};
use std::time::Duration;

/// Idle window before the control overlay hides during playback.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (500–30000 ms).
///
/// # Example
///
/// ```
/// use uniview::domain::ui::ControlsTimeout;
///
/// let timeout = ControlsTimeout::new(3000);
/// assert_eq!(timeout.value(), 3000);
///
/// // Values outside range are clamped
/// let too_low = ControlsTimeout::new(0);
/// assert_eq!(too_low.value(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsTimeout(u64);

impl ControlsTimeout {
    /// Creates a new timeout in milliseconds, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_CONTROLS_HIDE_DELAY_MS, MAX_CONTROLS_HIDE_DELAY_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the timeout as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for ControlsTimeout {
    fn default() -> Self {
        Self(DEFAULT_CONTROLS_HIDE_DELAY_MS)
    }
}
