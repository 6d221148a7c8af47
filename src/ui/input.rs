// SPDX-License-Identifier: MPL-2.0
//! Keyboard and pointer mapping to player intents.
//!
//! The dispatcher is pure: it turns raw input into [`Intent`]s plus a timer
//! instruction and never touches the player itself. The session applies both.

use crate::config::VOLUME_STEP;
use crate::domain::video::KeyboardSeekStep;
use crate::video_player::Intent;

/// Physical key, named after the platform key codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCode {
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyF,
    KeyM,
    Other(String),
}

impl KeyCode {
    /// Parses a key code string such as `"Space"` or `"KeyF"`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Self::Space,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "KeyF" => Self::KeyF,
            "KeyM" => Self::KeyM,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Kind of element holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    None,
    Body,
    Input,
    Button,
    Other,
}

impl FocusTarget {
    /// Inputs and buttons consume keys themselves.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Input | Self::Button)
    }
}

/// Read-only view of the host's focus state, queried per key press.
pub trait FocusContext {
    fn focused(&self) -> FocusTarget;
}

impl FocusContext for FocusTarget {
    fn focused(&self) -> FocusTarget {
        *self
    }
}

/// Result of mapping one key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyOutcome {
    pub intent: Option<Intent>,
    /// The host must suppress the key's default action (page scroll etc.).
    pub prevent_default: bool,
}

impl KeyOutcome {
    const IGNORED: Self = Self {
        intent: None,
        prevent_default: false,
    };

    fn handled(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            prevent_default: true,
        }
    }
}

/// Buttons rendered inside the controls overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlButton {
    PlayPause,
    Mute,
    Settings,
    /// An entry of the playback rate menu.
    Rate(f64),
    Fullscreen,
}

impl ControlButton {
    fn intent(self) -> Intent {
        match self {
            Self::PlayPause => Intent::TogglePlayPause,
            Self::Mute => Intent::ToggleMute,
            Self::Settings => Intent::ToggleSettingsMenu,
            Self::Rate(rate) => Intent::SetPlaybackRate(rate),
            Self::Fullscreen => Intent::ToggleFullscreen,
        }
    }
}

/// Horizontal bounds of the progress track, in the pointer's coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
}

impl TrackGeometry {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Position of `x` along the track. Not clamped; `None` for a
    /// degenerate track.
    #[must_use]
    pub fn fraction_at(self, x: f64) -> Option<f64> {
        if self.width > 0.0 && self.width.is_finite() && x.is_finite() {
            Some((x - self.left) / self.width)
        } else {
            None
        }
    }
}

/// Innermost element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// The video surface itself.
    Surface,
    Control(ControlButton),
    ProgressTrack(TrackGeometry),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Click { target: PointerTarget, x: f64 },
    /// Pointer held down and moved over the progress track.
    Drag { track: TrackGeometry, x: f64 },
    /// Any movement over the player.
    Move,
    /// Pointer left the player area.
    Leave,
    /// Pointer entered (`true`) or left the volume control.
    VolumeHover(bool),
    /// Volume slider moved.
    VolumeInput(f64),
}

/// What to do with the controls countdown after a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerAction {
    #[default]
    None,
    Restart,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerDispatch {
    pub intents: Vec<Intent>,
    pub timer: TimerAction,
}

impl PointerDispatch {
    fn single(intent: Intent) -> Self {
        Self {
            intents: vec![intent],
            timer: TimerAction::None,
        }
    }
}

/// Maps keys and pointer events to intents.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    seek_step: KeyboardSeekStep,
    volume_step: f64,
    /// Presentation-only: the volume slider pops out on hover.
    volume_slider_revealed: bool,
}

impl InputDispatcher {
    #[must_use]
    pub fn new(seek_step: KeyboardSeekStep) -> Self {
        Self {
            seek_step,
            volume_step: VOLUME_STEP,
            volume_slider_revealed: false,
        }
    }

    #[must_use]
    pub fn volume_slider_revealed(&self) -> bool {
        self.volume_slider_revealed
    }

    /// Maps a global key press.
    ///
    /// Nothing is dispatched while an input or button has focus, so the
    /// focused control keeps its own handling of the key.
    #[must_use]
    pub fn on_key(&self, key: &KeyCode, focus: &dyn FocusContext) -> KeyOutcome {
        if focus.focused().is_interactive() {
            return KeyOutcome::IGNORED;
        }

        let step = self.seek_step.value();
        match key {
            KeyCode::Space => KeyOutcome::handled(Intent::TogglePlayPause),
            KeyCode::ArrowUp => KeyOutcome::handled(Intent::AdjustVolume(self.volume_step)),
            KeyCode::ArrowDown => KeyOutcome::handled(Intent::AdjustVolume(-self.volume_step)),
            KeyCode::ArrowLeft => KeyOutcome::handled(Intent::SeekBy(-step)),
            KeyCode::ArrowRight => KeyOutcome::handled(Intent::SeekBy(step)),
            KeyCode::KeyF => KeyOutcome::handled(Intent::ToggleFullscreen),
            KeyCode::KeyM => KeyOutcome::handled(Intent::ToggleMute),
            KeyCode::Other(_) => KeyOutcome::IGNORED,
        }
    }

    /// Maps a pointer event.
    pub fn on_pointer(&mut self, event: PointerEvent) -> PointerDispatch {
        match event {
            PointerEvent::Click { target, x } => match target {
                PointerTarget::Surface => PointerDispatch::single(Intent::TogglePlayPause),
                PointerTarget::Control(button) => PointerDispatch::single(button.intent()),
                PointerTarget::ProgressTrack(track) => Self::seek_on(track, x),
            },
            PointerEvent::Drag { track, x } => Self::seek_on(track, x),
            PointerEvent::Move => PointerDispatch {
                intents: vec![Intent::RevealControls],
                timer: TimerAction::Restart,
            },
            PointerEvent::Leave => {
                self.volume_slider_revealed = false;
                PointerDispatch {
                    intents: vec![Intent::HideControlsIfPlaying],
                    timer: TimerAction::Cancel,
                }
            }
            PointerEvent::VolumeHover(hovered) => {
                self.volume_slider_revealed = hovered;
                PointerDispatch::default()
            }
            PointerEvent::VolumeInput(volume) => PointerDispatch::single(Intent::SetVolume(volume)),
        }
    }

    fn seek_on(track: TrackGeometry, x: f64) -> PointerDispatch {
        track
            .fraction_at(x)
            .map(|fraction| PointerDispatch::single(Intent::Seek(fraction)))
            .unwrap_or_default()
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(KeyboardSeekStep::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn dispatcher() -> InputDispatcher {
        InputDispatcher::default()
    }

    #[test]
    fn key_codes_parse() {
        assert_eq!(KeyCode::from_code("Space"), KeyCode::Space);
        assert_eq!(KeyCode::from_code("KeyM"), KeyCode::KeyM);
        assert_eq!(
            KeyCode::from_code("Enter"),
            KeyCode::Other("Enter".to_string())
        );
    }

    #[test]
    fn shortcuts_map_to_intents() {
        let d = dispatcher();
        let cases = [
            (KeyCode::Space, Intent::TogglePlayPause),
            (KeyCode::ArrowUp, Intent::AdjustVolume(0.1)),
            (KeyCode::ArrowDown, Intent::AdjustVolume(-0.1)),
            (KeyCode::ArrowLeft, Intent::SeekBy(-5.0)),
            (KeyCode::ArrowRight, Intent::SeekBy(5.0)),
            (KeyCode::KeyF, Intent::ToggleFullscreen),
            (KeyCode::KeyM, Intent::ToggleMute),
        ];

        for (key, intent) in cases {
            let outcome = d.on_key(&key, &FocusTarget::Body);
            assert_eq!(outcome.intent, Some(intent), "key {:?}", key);
            assert!(outcome.prevent_default, "key {:?}", key);
        }
    }

    #[test]
    fn unknown_keys_keep_default_behavior() {
        let outcome = dispatcher().on_key(&KeyCode::from_code("Tab"), &FocusTarget::None);

        assert_eq!(outcome.intent, None);
        assert!(!outcome.prevent_default);
    }

    #[test]
    fn focused_controls_swallow_nothing() {
        let d = dispatcher();
        for focus in [FocusTarget::Input, FocusTarget::Button] {
            for key in [KeyCode::Space, KeyCode::KeyF, KeyCode::ArrowLeft] {
                let outcome = d.on_key(&key, &focus);
                assert_eq!(outcome.intent, None);
                assert!(!outcome.prevent_default);
            }
        }
    }

    #[test]
    fn seek_step_follows_configuration() {
        let d = InputDispatcher::new(KeyboardSeekStep::new(10.0));

        let outcome = d.on_key(&KeyCode::ArrowRight, &FocusTarget::Body);

        assert_eq!(outcome.intent, Some(Intent::SeekBy(10.0)));
    }

    #[test]
    fn surface_click_toggles_playback() {
        let dispatch = dispatcher().on_pointer(PointerEvent::Click {
            target: PointerTarget::Surface,
            x: 40.0,
        });

        assert_eq!(dispatch.intents, vec![Intent::TogglePlayPause]);
    }

    #[test]
    fn control_click_does_not_toggle_playback() {
        let mut d = dispatcher();
        let dispatch = d.on_pointer(PointerEvent::Click {
            target: PointerTarget::Control(ControlButton::Mute),
            x: 0.0,
        });
        assert_eq!(dispatch.intents, vec![Intent::ToggleMute]);

        let dispatch = d.on_pointer(PointerEvent::Click {
            target: PointerTarget::Control(ControlButton::Rate(1.5)),
            x: 0.0,
        });
        assert_eq!(dispatch.intents, vec![Intent::SetPlaybackRate(1.5)]);
    }

    #[test]
    fn track_click_seeks_to_pointer_fraction() {
        let track = TrackGeometry::new(100.0, 400.0);
        let dispatch = dispatcher().on_pointer(PointerEvent::Click {
            target: PointerTarget::ProgressTrack(track),
            x: 200.0,
        });

        match dispatch.intents.as_slice() {
            [Intent::Seek(fraction)] => assert_abs_diff_eq!(*fraction, 0.25),
            other => panic!("unexpected intents {:?}", other),
        }
    }

    #[test]
    fn drag_past_track_end_is_left_for_clamping() {
        let track = TrackGeometry::new(0.0, 200.0);
        let dispatch = dispatcher().on_pointer(PointerEvent::Drag { track, x: 300.0 });

        assert_eq!(dispatch.intents, vec![Intent::Seek(1.5)]);
    }

    #[test]
    fn degenerate_track_is_ignored() {
        let track = TrackGeometry::new(0.0, 0.0);
        let dispatch = dispatcher().on_pointer(PointerEvent::Drag { track, x: 10.0 });

        assert!(dispatch.intents.is_empty());
    }

    #[test]
    fn movement_reveals_and_restarts_countdown() {
        let dispatch = dispatcher().on_pointer(PointerEvent::Move);

        assert_eq!(dispatch.intents, vec![Intent::RevealControls]);
        assert_eq!(dispatch.timer, TimerAction::Restart);
    }

    #[test]
    fn leaving_hides_and_cancels_countdown() {
        let mut d = dispatcher();
        d.on_pointer(PointerEvent::VolumeHover(true));

        let dispatch = d.on_pointer(PointerEvent::Leave);

        assert_eq!(dispatch.intents, vec![Intent::HideControlsIfPlaying]);
        assert_eq!(dispatch.timer, TimerAction::Cancel);
        assert!(!d.volume_slider_revealed());
    }

    #[test]
    fn volume_hover_reveals_slider_only() {
        let mut d = dispatcher();

        let dispatch = d.on_pointer(PointerEvent::VolumeHover(true));
        assert!(dispatch.intents.is_empty());
        assert!(d.volume_slider_revealed());

        let dispatch = d.on_pointer(PointerEvent::VolumeInput(0.4));
        assert_eq!(dispatch.intents, vec![Intent::SetVolume(0.4)]);
    }
}
