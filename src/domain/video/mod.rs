// SPDX-License-Identifier: MPL-2.0
//! Video playback domain types.
//!
//! This module contains video-related value objects that are independent of
//! any engine or presentation concerns.

pub mod newtypes;
pub mod playback;

// Re-export commonly used types
pub use newtypes::{KeyboardSeekStep, PlaybackRate, Volume};
pub use playback::PlaybackSnapshot;
