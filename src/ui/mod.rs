// SPDX-License-Identifier: MPL-2.0
//! Input handling and presentation helpers for the player surface.
//!
//! - [`input`] - Keyboard shortcuts, pointer mapping and the focus guard
//! - [`controls_timer`] - Auto-hide countdown for the controls overlay
//! - [`format`] - Labels for file size, duration and the transport clock

pub mod controls_timer;
pub mod format;
pub mod input;

pub use controls_timer::ControlsVisibilityTimer;
pub use input::{
    ControlButton, FocusContext, FocusTarget, InputDispatcher, KeyCode, KeyOutcome,
    PointerDispatch, PointerEvent, PointerTarget, TimerAction, TrackGeometry,
};
