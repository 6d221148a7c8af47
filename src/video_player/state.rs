// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for the video player.
//!
//! The player owns a [`PlaybackSnapshot`] and the engine's command surface.
//! Two inputs drive it:
//! - [`Intent`]s from the keyboard, the pointer and the controls timer
//! - [`EngineEvent`]s confirming what the engine actually did
//!
//! Play state and position only change on engine events. Volume, mute,
//! rate, the settings menu and control visibility are owned by the player
//! and change on the intent itself. Fullscreen follows the platform's
//! change notification, never the request.

use super::engine::{EngineEvent, PlaybackEngine};
use super::fullscreen::{FullscreenAction, FullscreenSurface};
use crate::diagnostics::{
    DiagnosticsHandle, ErrorEvent, ErrorType, PlayerStateEvent, UserAction, WarningEvent,
    WarningType,
};
use crate::domain::media::{LoadedMetadata, Resolution};
use crate::domain::video::{PlaybackRate, PlaybackSnapshot, Volume};
use crate::error::VideoError;

/// A request for a state transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Play if the engine is paused, pause otherwise.
    TogglePlayPause,
    /// Seek to a fraction of the duration. Clamped to `[0, 1]`.
    Seek(f64),
    /// Seek by a signed number of seconds from the engine's position.
    SeekBy(f64),
    /// Set an absolute volume in `[0, 1]`.
    SetVolume(f64),
    /// Shift the volume by a signed step.
    AdjustVolume(f64),
    ToggleMute,
    ToggleFullscreen,
    /// Select a playback rate. Anything but a preset is ignored.
    SetPlaybackRate(f64),
    ToggleSettingsMenu,
    RevealControls,
    /// Hide the overlay, unless playback is paused.
    HideControlsIfPlaying,
    /// The platform reported a fullscreen change.
    FullscreenChanged(bool),
}

/// Outcome of a transition that the host has to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Duration and resolution are known. Emitted once per player.
    MetadataLoaded(LoadedMetadata),
    /// Something failed. Terminal only for `VideoError::UnsupportedMedia`.
    Failed(VideoError),
}

/// Video player bound to one engine for its whole lifetime.
pub struct VideoPlayer {
    engine: Box<dyn PlaybackEngine>,
    fullscreen: Box<dyn FullscreenSurface>,
    snapshot: PlaybackSnapshot,

    /// Set by the engine's `Error` event. No command is issued afterwards.
    failed: bool,

    /// Whether `Effect::MetadataLoaded` was already returned.
    metadata_reported: bool,

    diagnostics: Option<DiagnosticsHandle>,
}

impl VideoPlayer {
    /// Creates a player driving `engine`.
    ///
    /// The engine should already be loaded with a source; the player never
    /// loads or unloads it.
    pub fn new(
        engine: Box<dyn PlaybackEngine>,
        fullscreen: Box<dyn FullscreenSurface>,
        diagnostics: Option<DiagnosticsHandle>,
    ) -> Self {
        let snapshot = PlaybackSnapshot {
            is_fullscreen: fullscreen.is_active(),
            ..PlaybackSnapshot::default()
        };
        Self {
            engine,
            fullscreen,
            snapshot,
            failed: false,
            metadata_reported: false,
            diagnostics,
        }
    }

    /// Current state, for rendering.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot
    }

    /// Returns true once the engine reported a decode failure.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Read access to the engine's properties.
    pub fn engine(&self) -> &dyn PlaybackEngine {
        self.engine.as_ref()
    }

    pub(crate) fn engine_mut(&mut self) -> &mut dyn PlaybackEngine {
        self.engine.as_mut()
    }

    /// Pushes the configured audio level to the engine and mirrors it.
    pub fn apply_audio_settings(&mut self, volume: Volume, muted: bool) {
        if self.failed {
            return;
        }
        self.engine.set_volume(volume.value());
        self.engine.set_muted(muted);
        self.snapshot = PlaybackSnapshot {
            volume,
            is_muted: muted,
            ..self.snapshot
        };
    }

    /// Asks the engine to start on its own, as an autoplaying element does.
    pub fn autoplay(&mut self) {
        if !self.failed {
            self.engine.play();
        }
    }

    /// Applies a user or timer intent.
    pub fn handle(&mut self, intent: Intent) -> Effect {
        match intent {
            Intent::TogglePlayPause => self.toggle_play_pause(),
            Intent::Seek(fraction) => self.seek_to_fraction(fraction),
            Intent::SeekBy(delta) => self.seek_by(delta),
            Intent::SetVolume(volume) => self.set_volume(volume),
            Intent::AdjustVolume(delta) => {
                let target = self.snapshot.volume.adjusted(delta);
                self.set_volume(target.value())
            }
            Intent::ToggleMute => self.toggle_mute(),
            Intent::ToggleFullscreen => self.toggle_fullscreen(),
            Intent::SetPlaybackRate(rate) => self.set_playback_rate(rate),
            Intent::ToggleSettingsMenu => {
                let open = !self.snapshot.is_settings_menu_open;
                self.log_action(UserAction::ToggleSettingsMenu);
                self.snapshot = PlaybackSnapshot {
                    is_settings_menu_open: open,
                    are_controls_visible: self.snapshot.are_controls_visible || open,
                    ..self.snapshot
                };
                Effect::None
            }
            Intent::RevealControls => {
                self.snapshot = PlaybackSnapshot {
                    are_controls_visible: true,
                    ..self.snapshot
                };
                Effect::None
            }
            Intent::HideControlsIfPlaying => {
                if self.snapshot.is_playing && self.snapshot.are_controls_visible {
                    self.snapshot = PlaybackSnapshot {
                        are_controls_visible: false,
                        is_settings_menu_open: false,
                        ..self.snapshot
                    };
                    self.log_state(PlayerStateEvent::ControlsHidden);
                }
                Effect::None
            }
            Intent::FullscreenChanged(active) => {
                if self.snapshot.is_fullscreen != active {
                    self.snapshot = PlaybackSnapshot {
                        is_fullscreen: active,
                        ..self.snapshot
                    };
                    self.log_state(PlayerStateEvent::FullscreenChanged { active });
                }
                Effect::None
            }
        }
    }

    /// Applies an event emitted by the engine.
    ///
    /// Events are applied in arrival order, each one overwriting what the
    /// previous one set.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Effect {
        if self.failed {
            return Effect::None;
        }

        match event {
            EngineEvent::LoadedMetadata {
                duration,
                width,
                height,
            } => {
                let duration = if duration.is_finite() {
                    duration.max(0.0)
                } else {
                    0.0
                };
                self.snapshot = PlaybackSnapshot {
                    duration,
                    current_time: self.snapshot.current_time.min(duration),
                    ..self.snapshot
                };
                if self.metadata_reported {
                    return Effect::None;
                }
                self.metadata_reported = true;
                self.log_state(PlayerStateEvent::MetadataLoaded {
                    duration_secs: duration,
                    width,
                    height,
                });
                Effect::MetadataLoaded(LoadedMetadata {
                    duration,
                    resolution: Resolution::new(width, height),
                })
            }
            EngineEvent::TimeUpdate { current_time } => {
                if current_time.is_finite() {
                    self.snapshot = PlaybackSnapshot {
                        current_time: self.clamp_to_duration(current_time),
                        ..self.snapshot
                    };
                }
                Effect::None
            }
            EngineEvent::Play => {
                self.snapshot = PlaybackSnapshot {
                    is_playing: true,
                    ..self.snapshot
                };
                self.log_state(PlayerStateEvent::PlaybackStarted {
                    position_secs: self.snapshot.current_time,
                });
                Effect::None
            }
            EngineEvent::Pause => {
                // Controls never stay hidden while paused.
                self.snapshot = PlaybackSnapshot {
                    is_playing: false,
                    are_controls_visible: true,
                    ..self.snapshot
                };
                self.log_state(PlayerStateEvent::PlaybackPaused {
                    position_secs: self.snapshot.current_time,
                });
                Effect::None
            }
            EngineEvent::Error { detail } => {
                self.failed = true;
                if let Some(diagnostics) = &self.diagnostics {
                    diagnostics.log_error(ErrorEvent::new(ErrorType::UnsupportedMedia, &detail));
                }
                Effect::Failed(VideoError::UnsupportedMedia(detail))
            }
        }
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn toggle_play_pause(&mut self) -> Effect {
        if self.failed {
            return Effect::None;
        }
        self.log_action(UserAction::TogglePlayback);
        // The snapshot flips when the engine confirms.
        if self.engine.is_paused() {
            self.engine.play();
        } else {
            self.engine.pause();
        }
        Effect::None
    }

    fn seek_to_fraction(&mut self, fraction: f64) -> Effect {
        if self.failed || !fraction.is_finite() || !self.snapshot.has_duration() {
            return Effect::None;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        self.log_action(UserAction::Seek { fraction });
        self.engine.seek(fraction * self.snapshot.duration);
        Effect::None
    }

    fn seek_by(&mut self, delta: f64) -> Effect {
        if self.failed || !delta.is_finite() {
            return Effect::None;
        }
        self.log_action(UserAction::SeekRelative { delta_secs: delta });
        let target = self.clamp_to_duration(self.engine.current_time() + delta);
        self.engine.seek(target);
        Effect::None
    }

    fn clamp_to_duration(&self, time: f64) -> f64 {
        if self.snapshot.has_duration() {
            time.clamp(0.0, self.snapshot.duration)
        } else {
            time.max(0.0)
        }
    }

    fn set_playback_rate(&mut self, rate: f64) -> Effect {
        if self.failed {
            return Effect::None;
        }
        let Some(rate) = PlaybackRate::from_preset(rate) else {
            if let Some(diagnostics) = &self.diagnostics {
                diagnostics.log_warning(WarningEvent::new(
                    WarningType::RejectedPlaybackRate,
                    format!("playback rate {rate} is not offered"),
                ));
            }
            return Effect::None;
        };
        self.log_action(UserAction::SetPlaybackRate { rate: rate.value() });
        self.engine.set_playback_rate(rate.value());
        self.snapshot = PlaybackSnapshot {
            playback_rate: rate,
            is_settings_menu_open: false,
            ..self.snapshot
        };
        Effect::None
    }

    // =========================================================================
    // Audio
    // =========================================================================

    fn set_volume(&mut self, volume: f64) -> Effect {
        if self.failed || !volume.is_finite() {
            return Effect::None;
        }
        let volume = Volume::new(volume);
        self.log_action(UserAction::SetVolume {
            volume: volume.value(),
        });
        self.engine.set_volume(volume.value());

        // An audible level always unmutes.
        let is_muted = if volume.is_zero() {
            self.snapshot.is_muted
        } else {
            if self.snapshot.is_muted {
                self.engine.set_muted(false);
            }
            false
        };

        self.snapshot = PlaybackSnapshot {
            volume,
            is_muted,
            ..self.snapshot
        };
        Effect::None
    }

    fn toggle_mute(&mut self) -> Effect {
        if self.failed {
            return Effect::None;
        }
        self.log_action(UserAction::ToggleMute);
        let is_muted = !self.snapshot.is_muted;
        self.engine.set_muted(is_muted);

        let volume = if !is_muted && self.snapshot.volume.is_zero() {
            let restored = Volume::restore_level();
            self.engine.set_volume(restored.value());
            restored
        } else {
            self.snapshot.volume
        };

        self.snapshot = PlaybackSnapshot {
            volume,
            is_muted,
            ..self.snapshot
        };
        Effect::None
    }

    // =========================================================================
    // Fullscreen
    // =========================================================================

    fn toggle_fullscreen(&mut self) -> Effect {
        self.log_action(UserAction::ToggleFullscreen);
        let (action, request) = if self.fullscreen.is_active() {
            (FullscreenAction::Exit, self.fullscreen.request_exit())
        } else {
            (FullscreenAction::Enter, self.fullscreen.request_enter())
        };

        match request {
            Ok(()) => Effect::None,
            Err(error) => {
                if let Some(diagnostics) = &self.diagnostics {
                    diagnostics.log_warning(WarningEvent::new(
                        WarningType::FullscreenRejected,
                        error.to_string(),
                    ));
                }
                Effect::Failed(VideoError::FullscreenRequest(action, error))
            }
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    fn log_action(&self, action: UserAction) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_action(action);
        }
    }

    fn log_state(&self, state: PlayerStateEvent) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_state(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use crate::test_utils::assert_abs_diff_eq;
    use crate::video_player::binding::SourceUrl;
    use crate::video_player::engine::EngineSubscription;
    use crate::video_player::fullscreen::FullscreenError;
    use crate::video_player::simulated::{
        EngineCommand, MediaProfile, SimulatedEngine, SimulatedFullscreen,
    };

    struct Harness {
        player: VideoPlayer,
        engine: SimulatedEngine,
        fullscreen: SimulatedFullscreen,
        events: EngineSubscription,
    }

    impl Harness {
        fn new(profile: MediaProfile, diagnostics: Option<DiagnosticsHandle>) -> Self {
            let mut engine = SimulatedEngine::new(profile);
            let events = engine.subscribe();
            engine.load(&SourceUrl::new("blob:uniview/test"));
            let fullscreen = SimulatedFullscreen::new();
            let player = VideoPlayer::new(
                Box::new(engine.clone()),
                Box::new(fullscreen.clone()),
                diagnostics,
            );
            Self {
                player,
                engine,
                fullscreen,
                events,
            }
        }

        /// Player for a 10 s clip whose metadata has been delivered.
        fn loaded() -> Self {
            let mut harness = Self::new(MediaProfile::default(), None);
            harness.engine.finish_loading();
            harness.pump();
            harness
        }

        fn pump(&mut self) -> Vec<Effect> {
            let mut effects = Vec::new();
            while let Some(event) = self.events.try_next() {
                let effect = self.player.handle_engine_event(event);
                if effect != Effect::None {
                    effects.push(effect);
                }
            }
            effects
        }

        fn snapshot(&self) -> PlaybackSnapshot {
            self.player.snapshot()
        }
    }

    // -------------------------------------------------------------------------
    // Play / pause
    // -------------------------------------------------------------------------

    #[test]
    fn toggle_play_pause_waits_for_engine_confirmation() {
        let mut h = Harness::loaded();

        h.player.handle(Intent::TogglePlayPause);
        assert!(!h.snapshot().is_playing);

        h.pump();
        assert!(h.snapshot().is_playing);
    }

    #[test]
    fn play_then_pause_events_flip_state_in_order() {
        let mut h = Harness::loaded();
        let mut observed = vec![h.snapshot().is_playing];

        h.player.handle_engine_event(EngineEvent::Play);
        observed.push(h.snapshot().is_playing);
        h.player.handle_engine_event(EngineEvent::Pause);
        observed.push(h.snapshot().is_playing);

        assert_eq!(observed, vec![false, true, false]);
    }

    #[test]
    fn toggle_play_pause_pauses_a_playing_engine() {
        let mut h = Harness::loaded();
        h.player.handle(Intent::TogglePlayPause);
        h.pump();

        h.player.handle(Intent::TogglePlayPause);
        assert!(h.snapshot().is_playing);
        h.pump();

        assert!(!h.snapshot().is_playing);
        assert_eq!(
            h.engine.commands().last(),
            Some(&EngineCommand::Pause)
        );
    }

    #[test]
    fn time_updates_are_last_write_wins() {
        let mut h = Harness::loaded();

        h.player
            .handle_engine_event(EngineEvent::TimeUpdate { current_time: 4.0 });
        h.player
            .handle_engine_event(EngineEvent::TimeUpdate { current_time: 2.5 });

        assert_abs_diff_eq!(h.snapshot().current_time, 2.5);
    }

    #[test]
    fn time_update_never_exceeds_duration() {
        let mut h = Harness::loaded();

        h.player
            .handle_engine_event(EngineEvent::TimeUpdate { current_time: 99.0 });

        assert_abs_diff_eq!(h.snapshot().current_time, 10.0);
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    #[test]
    fn metadata_is_reported_once() {
        let mut h = Harness::new(MediaProfile::new(10.0, 1280, 720), None);
        assert_abs_diff_eq!(h.snapshot().duration, 0.0);

        h.engine.finish_loading();
        let effects = h.pump();

        assert_eq!(
            effects,
            vec![Effect::MetadataLoaded(LoadedMetadata {
                duration: 10.0,
                resolution: Resolution::new(1280, 720),
            })]
        );
        assert_abs_diff_eq!(h.snapshot().duration, 10.0);

        let again = h.player.handle_engine_event(EngineEvent::LoadedMetadata {
            duration: 10.0,
            width: 1280,
            height: 720,
        });
        assert_eq!(again, Effect::None);
    }

    // -------------------------------------------------------------------------
    // Seeking
    // -------------------------------------------------------------------------

    #[test]
    fn seek_fraction_targets_share_of_duration() {
        let mut h = Harness::loaded();

        h.player.handle(Intent::Seek(0.25));
        h.pump();

        assert_eq!(h.engine.commands().last(), Some(&EngineCommand::Seek(2.5)));
        assert_abs_diff_eq!(h.snapshot().current_time, 2.5);
    }

    #[test]
    fn seek_outside_track_stays_within_duration() {
        let mut h = Harness::loaded();

        h.player.handle(Intent::Seek(-0.1));
        h.pump();
        assert_abs_diff_eq!(h.snapshot().current_time, 0.0);

        h.player.handle(Intent::Seek(1.5));
        h.pump();
        assert_abs_diff_eq!(h.snapshot().current_time, 10.0);
    }

    #[test]
    fn seek_without_duration_is_a_no_op() {
        let mut h = Harness::new(MediaProfile::default(), None);
        let before = h.engine.commands().len();

        h.player.handle(Intent::Seek(0.5));

        assert_eq!(h.engine.commands().len(), before);
    }

    #[test]
    fn seek_by_is_relative_to_engine_position() {
        let mut h = Harness::loaded();
        h.player.handle(Intent::Seek(0.2));
        h.pump();

        h.player.handle(Intent::SeekBy(5.0));
        h.pump();
        assert_abs_diff_eq!(h.snapshot().current_time, 7.0);

        h.player.handle(Intent::SeekBy(5.0));
        h.pump();
        assert_abs_diff_eq!(h.snapshot().current_time, 10.0);

        h.player.handle(Intent::SeekBy(-30.0));
        h.pump();
        assert_abs_diff_eq!(h.snapshot().current_time, 0.0);
    }

    // -------------------------------------------------------------------------
    // Volume and mute
    // -------------------------------------------------------------------------

    #[test]
    fn unmute_restores_previous_volume() {
        for level in [0.004, 0.05, 0.125, 0.3, 0.333, 0.5, 0.99, 1.0] {
            let mut h = Harness::loaded();

            h.player.handle(Intent::SetVolume(level));
            h.player.handle(Intent::ToggleMute);
            assert!(h.snapshot().is_muted);
            assert_eq!(h.snapshot().volume.value(), level);

            h.player.handle(Intent::ToggleMute);
            assert!(!h.snapshot().is_muted);
            assert_eq!(h.snapshot().volume.value(), level);
            assert_eq!(h.engine.volume(), level);
            assert!(!h.engine.is_muted());
        }
    }

    #[test]
    fn faint_volume_while_muted_unmutes() {
        let mut h = Harness::loaded();
        h.player.handle(Intent::ToggleMute);
        assert!(h.engine.is_muted());

        h.player.handle(Intent::SetVolume(0.004));

        assert!(!h.snapshot().is_muted);
        assert!(!h.engine.is_muted());
        assert_eq!(h.snapshot().volume.value(), 0.004);
        assert_eq!(h.engine.volume(), 0.004);
    }

    #[test]
    fn unmute_at_zero_volume_resets_to_full() {
        let mut h = Harness::loaded();

        h.player.handle(Intent::SetVolume(0.0));
        h.player.handle(Intent::ToggleMute);
        h.player.handle(Intent::ToggleMute);

        assert!(!h.snapshot().is_muted);
        assert_abs_diff_eq!(h.snapshot().volume.value(), 1.0);
        assert_abs_diff_eq!(h.engine.volume(), 1.0);
    }

    #[test]
    fn audible_volume_clears_mute_on_engine_too() {
        let mut h = Harness::loaded();
        h.player.handle(Intent::ToggleMute);
        assert!(h.engine.is_muted());

        h.player.handle(Intent::SetVolume(0.4));

        assert!(!h.snapshot().is_muted);
        assert!(!h.engine.is_muted());
    }

    #[test]
    fn zero_volume_keeps_mute_flag() {
        let mut h = Harness::loaded();
        h.player.handle(Intent::ToggleMute);

        h.player.handle(Intent::SetVolume(0.0));

        assert!(h.snapshot().is_muted);
    }

    #[test]
    fn adjust_volume_is_clamped() {
        let mut h = Harness::loaded();

        h.player.handle(Intent::AdjustVolume(0.1));
        assert_abs_diff_eq!(h.snapshot().volume.value(), 1.0);

        for _ in 0..12 {
            h.player.handle(Intent::AdjustVolume(-0.1));
        }
        assert_abs_diff_eq!(h.snapshot().volume.value(), 0.0);
        assert_abs_diff_eq!(h.engine.volume(), 0.0);
    }

    #[test]
    fn initial_audio_settings_reach_engine_and_snapshot() {
        let mut h = Harness::loaded();

        h.player.apply_audio_settings(Volume::new(0.35), true);

        assert_abs_diff_eq!(h.snapshot().volume.value(), 0.35);
        assert!(h.snapshot().is_muted);
        assert_abs_diff_eq!(h.engine.volume(), 0.35);
        assert!(h.engine.is_muted());
    }

    // -------------------------------------------------------------------------
    // Playback rate
    // -------------------------------------------------------------------------

    #[test]
    fn preset_rate_is_applied_and_closes_menu() {
        let mut h = Harness::loaded();
        h.player.handle(Intent::ToggleSettingsMenu);
        assert!(h.snapshot().is_settings_menu_open);

        h.player.handle(Intent::SetPlaybackRate(1.5));

        assert!(h.snapshot().is_active_rate(1.5));
        assert!(!h.snapshot().is_settings_menu_open);
        assert_abs_diff_eq!(h.engine.playback_rate(), 1.5);
    }

    #[test]
    fn off_preset_rate_is_ignored() {
        let mut h = Harness::loaded();
        h.player.handle(Intent::SetPlaybackRate(2.0));

        for rate in [0.0, 0.75, 3.0, -1.0, f64::NAN] {
            h.player.handle(Intent::SetPlaybackRate(rate));
            assert!(h.snapshot().is_active_rate(2.0));
            assert_abs_diff_eq!(h.engine.playback_rate(), 2.0);
        }
    }

    // -------------------------------------------------------------------------
    // Controls and settings menu
    // -------------------------------------------------------------------------

    #[test]
    fn hide_controls_is_ignored_while_paused() {
        let mut h = Harness::loaded();

        h.player.handle(Intent::HideControlsIfPlaying);

        assert!(h.snapshot().are_controls_visible);
    }

    #[test]
    fn hide_controls_while_playing_also_closes_menu() {
        let mut h = Harness::loaded();
        h.player.handle_engine_event(EngineEvent::Play);
        h.player.handle(Intent::ToggleSettingsMenu);

        h.player.handle(Intent::HideControlsIfPlaying);

        assert!(!h.snapshot().are_controls_visible);
        assert!(!h.snapshot().is_settings_menu_open);
    }

    #[test]
    fn opening_menu_reveals_controls() {
        let mut h = Harness::loaded();
        h.player.handle_engine_event(EngineEvent::Play);
        h.player.handle(Intent::HideControlsIfPlaying);

        h.player.handle(Intent::ToggleSettingsMenu);

        assert!(h.snapshot().is_settings_menu_open);
        assert!(h.snapshot().are_controls_visible);
    }

    #[test]
    fn pause_event_reveals_controls() {
        let mut h = Harness::loaded();
        h.player.handle_engine_event(EngineEvent::Play);
        h.player.handle(Intent::HideControlsIfPlaying);

        h.player.handle_engine_event(EngineEvent::Pause);

        assert!(h.snapshot().are_controls_visible);
    }

    // -------------------------------------------------------------------------
    // Fullscreen
    // -------------------------------------------------------------------------

    #[test]
    fn fullscreen_follows_notification_not_request() {
        let mut h = Harness::loaded();

        h.player.handle(Intent::ToggleFullscreen);
        assert!(!h.snapshot().is_fullscreen);

        let active = h.fullscreen.confirm().expect("request should be pending");
        h.player.handle(Intent::FullscreenChanged(active));
        assert!(h.snapshot().is_fullscreen);

        h.player.handle(Intent::ToggleFullscreen);
        let active = h.fullscreen.confirm().expect("request should be pending");
        h.player.handle(Intent::FullscreenChanged(active));
        assert!(!h.snapshot().is_fullscreen);
    }

    #[test]
    fn rejected_fullscreen_is_reported_but_not_fatal() {
        let mut h = Harness::loaded();
        h.fullscreen
            .refuse_with(FullscreenError::new("NotAllowedError", "Permissions check failed"));

        let effect = h.player.handle(Intent::ToggleFullscreen);

        match effect {
            Effect::Failed(error) => {
                assert!(!error.is_terminal());
                assert!(matches!(
                    error,
                    VideoError::FullscreenRequest(FullscreenAction::Enter, _)
                ));
            }
            other => panic!("expected Failed effect, got {:?}", other),
        }
        assert!(!h.snapshot().is_fullscreen);

        h.player.handle(Intent::TogglePlayPause);
        h.pump();
        assert!(h.snapshot().is_playing);
    }

    #[test]
    fn rejected_fullscreen_exit_is_reported_as_exit() {
        let mut h = Harness::loaded();
        h.player.handle(Intent::ToggleFullscreen);
        let active = h.fullscreen.confirm().expect("request should be pending");
        h.player.handle(Intent::FullscreenChanged(active));
        assert!(h.snapshot().is_fullscreen);

        h.fullscreen
            .refuse_with(FullscreenError::new("TypeError", "Not in fullscreen"));
        let effect = h.player.handle(Intent::ToggleFullscreen);

        match effect {
            Effect::Failed(error) => assert_eq!(
                error.user_message(),
                "Error attempting to exit full-screen mode: Not in fullscreen (TypeError)"
            ),
            other => panic!("expected Failed effect, got {:?}", other),
        }
        assert!(h.snapshot().is_fullscreen);
    }

    // -------------------------------------------------------------------------
    // Errors
    // -------------------------------------------------------------------------

    #[test]
    fn decode_error_is_terminal() {
        let mut h = Harness::new(MediaProfile::corrupted(), None);
        h.engine.finish_loading();

        let effects = h.pump();

        assert!(matches!(
            effects.as_slice(),
            [Effect::Failed(VideoError::UnsupportedMedia(_))]
        ));
        assert!(h.player.is_failed());
    }

    #[test]
    fn no_command_reaches_engine_after_error() {
        let mut h = Harness::loaded();
        h.engine.fail("truncated stream");
        h.pump();

        for intent in [
            Intent::TogglePlayPause,
            Intent::Seek(0.5),
            Intent::SeekBy(5.0),
            Intent::SetVolume(0.2),
            Intent::AdjustVolume(0.1),
            Intent::ToggleMute,
            Intent::SetPlaybackRate(2.0),
        ] {
            h.player.handle(intent);
        }
        h.player.autoplay();

        assert_eq!(h.engine.commands_after_error(), 0);
    }

    #[test]
    fn events_after_error_are_ignored() {
        let mut h = Harness::loaded();
        h.engine.fail("truncated stream");
        h.pump();

        let effect = h.player.handle_engine_event(EngineEvent::Play);

        assert_eq!(effect, Effect::None);
        assert!(!h.snapshot().is_playing);
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    #[test]
    fn intents_and_transitions_are_logged() {
        let mut collector = DiagnosticsCollector::default();
        let mut h = Harness::new(MediaProfile::default(), Some(collector.handle()));
        h.engine.finish_loading();
        h.pump();

        h.player.handle(Intent::TogglePlayPause);
        h.pump();
        h.player.handle(Intent::SetPlaybackRate(3.0));
        collector.process_pending();

        let kinds: Vec<DiagnosticEventKind> = collector.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&DiagnosticEventKind::UserAction {
            action: UserAction::TogglePlayback
        }));
        assert!(kinds.contains(&DiagnosticEventKind::PlayerState {
            state: PlayerStateEvent::PlaybackStarted { position_secs: 0.0 }
        }));
        assert!(kinds.iter().any(|kind| matches!(
            kind,
            DiagnosticEventKind::Warning { event } if event.warning_type == WarningType::RejectedPlaybackRate
        )));
    }
}
