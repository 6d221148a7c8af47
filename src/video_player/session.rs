// SPDX-License-Identifier: MPL-2.0
//! Scoped lifetime of one playing file.
//!
//! A [`PlayerSession`] owns everything tied to the selected file: the
//! [`MediaHandle`], the engine subscription, the controls countdown and the
//! state machine. Dropping the session tears all of it down in a fixed
//! order, whichever way it ends:
//!
//! 1. cancel the countdown
//! 2. detach the engine listener
//! 3. unload the engine
//! 4. revoke the source URL

use super::binding::{MediaHandle, SharedRegistry, SourceUrl};
use super::engine::{EngineEvent, EngineSubscription, PlaybackEngine};
use super::fullscreen::FullscreenSurface;
use super::state::{Effect, Intent, VideoPlayer};
use crate::config::PlayerSettings;
use crate::diagnostics::{DiagnosticsHandle, PlayerStateEvent};
use crate::domain::media::MediaFile;
use crate::domain::video::PlaybackSnapshot;
use crate::ui::{
    ControlsVisibilityTimer, FocusContext, InputDispatcher, KeyCode, PointerEvent, TimerAction,
};

/// Result of a key press routed through the session.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyResponse {
    /// The host must suppress the key's default action.
    pub prevent_default: bool,
    pub effect: Effect,
}

pub struct PlayerSession {
    player: VideoPlayer,
    events: EngineSubscription,
    events_closed: bool,
    timer: ControlsVisibilityTimer,
    dispatcher: InputDispatcher,
    diagnostics: Option<DiagnosticsHandle>,
    // Declared last: fields drop in order, so the URL is revoked only after
    // the engine has been unloaded and dropped.
    handle: MediaHandle,
}

impl PlayerSession {
    /// Binds `file` and starts a session on `engine`.
    ///
    /// The listener is attached before the source is loaded so no event is
    /// missed. Configured audio settings are applied right away and the
    /// engine is asked to play when autoplay is on.
    pub fn open(
        file: &MediaFile,
        registry: SharedRegistry,
        mut engine: Box<dyn PlaybackEngine>,
        fullscreen: Box<dyn FullscreenSurface>,
        settings: &PlayerSettings,
        diagnostics: Option<DiagnosticsHandle>,
    ) -> Self {
        let handle = MediaHandle::bind(registry, file);
        let events = engine.subscribe();
        engine.load(handle.url());

        let mut player = VideoPlayer::new(engine, fullscreen, diagnostics.clone());
        player.apply_audio_settings(settings.volume, settings.muted);

        if let Some(diagnostics) = &diagnostics {
            diagnostics.log_state(PlayerStateEvent::MediaBound);
        }

        let mut session = Self {
            player,
            events,
            events_closed: false,
            timer: ControlsVisibilityTimer::new(settings.controls_timeout),
            dispatcher: InputDispatcher::new(settings.keyboard_seek_step),
            diagnostics,
            handle,
        };
        if settings.autoplay {
            session.player.autoplay();
        }
        session
    }

    /// Applies an intent to the state machine.
    pub fn dispatch(&mut self, intent: Intent) -> Effect {
        self.player.handle(intent)
    }

    /// Applies one engine event and keeps the countdown in step with play
    /// state: armed when playback starts, dropped when it stops.
    pub fn on_engine_event(&mut self, event: EngineEvent) -> Effect {
        let was_playing = self.player.snapshot().is_playing;
        let effect = self.player.handle_engine_event(event);
        let is_playing = self.player.snapshot().is_playing;

        match (was_playing, is_playing) {
            (false, true) => self.timer.restart(),
            (true, false) => self.timer.cancel(),
            _ => {}
        }
        if self.player.is_failed() {
            self.timer.cancel();
        }
        effect
    }

    /// Drains queued engine events and returns the effects worth handling.
    pub fn pump_engine_events(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some(event) = self.events.try_next() {
            let effect = self.on_engine_event(event);
            if effect != Effect::None {
                effects.push(effect);
            }
        }
        effects
    }

    /// Hides the controls if the countdown has run out. Returns true when it
    /// fired.
    pub fn check_controls_timer(&mut self) -> bool {
        if self.timer.poll_expired() {
            self.player.handle(Intent::HideControlsIfPlaying);
            true
        } else {
            false
        }
    }

    /// Waits for the next engine event or countdown expiry and applies it.
    ///
    /// Returns `None` once the engine is gone and no countdown is pending,
    /// i.e. nothing can change anymore.
    pub async fn next_event(&mut self) -> Option<Effect> {
        loop {
            if self.events_closed {
                if !self.timer.is_pending() {
                    return None;
                }
                self.timer.expired().await;
                return Some(self.player.handle(Intent::HideControlsIfPlaying));
            }

            tokio::select! {
                event = self.events.next() => match event {
                    Some(event) => return Some(self.on_engine_event(event)),
                    None => self.events_closed = true,
                },
                () = self.timer.expired() => {
                    return Some(self.player.handle(Intent::HideControlsIfPlaying));
                }
            }
        }
    }

    /// Routes a global key press.
    pub fn on_key(&mut self, key: &KeyCode, focus: &dyn FocusContext) -> KeyResponse {
        let outcome = self.dispatcher.on_key(key, focus);
        let effect = outcome
            .intent
            .map_or(Effect::None, |intent| self.player.handle(intent));
        KeyResponse {
            prevent_default: outcome.prevent_default,
            effect,
        }
    }

    /// Routes a pointer event. Returns the first effect that needs handling.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Effect {
        let dispatch = self.dispatcher.on_pointer(event);
        match dispatch.timer {
            TimerAction::Restart => self.timer.restart(),
            TimerAction::Cancel => self.timer.cancel(),
            TimerAction::None => {}
        }

        let mut result = Effect::None;
        for intent in dispatch.intents {
            let effect = self.player.handle(intent);
            if result == Effect::None {
                result = effect;
            }
        }
        result
    }

    /// Feeds back the platform's fullscreen change notification.
    pub fn on_fullscreen_change(&mut self, active: bool) {
        self.player.handle(Intent::FullscreenChanged(active));
    }

    #[must_use]
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.player.snapshot()
    }

    /// The bound source, valid for the lifetime of the session.
    #[must_use]
    pub fn url(&self) -> &SourceUrl {
        self.handle.url()
    }

    #[must_use]
    pub fn volume_slider_revealed(&self) -> bool {
        self.dispatcher.volume_slider_revealed()
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.player.is_failed()
    }

    #[must_use]
    pub fn is_controls_timer_pending(&self) -> bool {
        self.timer.is_pending()
    }

    #[must_use]
    pub fn player(&self) -> &VideoPlayer {
        &self.player
    }

    /// Tears the session down now.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for PlayerSession {
    fn drop(&mut self) {
        self.timer.cancel();
        self.events.close();
        self.player.engine_mut().unload();
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_state(PlayerStateEvent::SessionClosed);
        }
    }
}

impl std::fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("url", self.handle.url())
            .field("snapshot", &self.player.snapshot())
            .field("failed", &self.player.is_failed())
            .finish_non_exhaustive()
    }
}
