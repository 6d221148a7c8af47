// SPDX-License-Identifier: MPL-2.0
//! Host of the player: file selection, metadata and error surfaces.
//!
//! The viewer owns at most one [`PlayerSession`]. Selecting a new file
//! replaces it, a decode failure tears it down, and [`Viewer::reset`] goes
//! back to the empty "select a video" state.

use crate::config::PlayerSettings;
use crate::diagnostics::{
    DiagnosticsHandle, FileNameAnonymizer, UserAction, WarningEvent, WarningType,
};
use crate::domain::media::{MediaFile, VideoMetadata};
use crate::domain::video::PlaybackSnapshot;
use crate::error::VideoError;
use crate::ui::{FocusContext, KeyCode, PointerEvent};
use crate::video_player::{Effect, MediaPlatform, PlayerSession};

pub struct Viewer {
    platform: Box<dyn MediaPlatform>,
    settings: PlayerSettings,
    diagnostics: Option<DiagnosticsHandle>,
    anonymizer: FileNameAnonymizer,
    session: Option<PlayerSession>,
    metadata: Option<VideoMetadata>,
    /// Set when the current file turned out to be unplayable.
    error: Option<String>,
    /// Non-fatal message, e.g. a refused fullscreen request.
    notice: Option<String>,
}

impl Viewer {
    #[must_use]
    pub fn new(platform: Box<dyn MediaPlatform>, settings: PlayerSettings) -> Self {
        Self {
            platform,
            settings,
            diagnostics: None,
            anonymizer: FileNameAnonymizer::new(),
            session: None,
            metadata: None,
            error: None,
            notice: None,
        }
    }

    /// Logs user actions and state changes to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Starts playing `file`, replacing the current session.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::UnsupportedFileType`] when the file is not a
    /// video. The current session, if any, keeps playing.
    pub fn select_file(&mut self, file: MediaFile) -> Result<(), VideoError> {
        if !file.is_playable_type() {
            let error = VideoError::UnsupportedFileType(file.mime_type().to_string());
            self.notice = Some(error.user_message());
            if let Some(diagnostics) = &self.diagnostics {
                diagnostics.log_warning(WarningEvent::new(
                    WarningType::UnplayableSelection,
                    error.to_string(),
                ));
            }
            return Err(error);
        }

        // Release the previous source before the new one is bound.
        self.session = None;
        self.error = None;
        self.notice = None;

        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_action(UserAction::LoadMedia {
                file: self.anonymizer.anonymize_name(file.name()),
                format: file.format(),
                size_bytes: file.size(),
            });
        }

        let engine = self.platform.create_engine(&file);
        let session = PlayerSession::open(
            &file,
            self.platform.registry(),
            engine,
            self.platform.fullscreen_surface(),
            &self.settings,
            self.diagnostics.clone(),
        );
        self.metadata = Some(VideoMetadata::from_file(&file));
        self.session = Some(session);
        Ok(())
    }

    /// Applies queued engine events and the controls countdown.
    pub fn pump(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let effects = session.pump_engine_events();
        session.check_controls_timer();
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    /// Waits for the next change of the current session.
    ///
    /// Returns false when there is no session or it can no longer change.
    pub async fn next_event(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let next = session.next_event().await;
        match next {
            Some(effect) => {
                self.apply_effect(effect);
                true
            }
            None => false,
        }
    }

    /// Routes a key press. Returns whether the default action must be
    /// suppressed.
    pub fn on_key(&mut self, key: &KeyCode, focus: &dyn FocusContext) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let response = session.on_key(key, focus);
        self.apply_effect(response.effect);
        response.prevent_default
    }

    pub fn on_pointer(&mut self, event: PointerEvent) {
        if let Some(session) = self.session.as_mut() {
            let effect = session.on_pointer(event);
            self.apply_effect(effect);
        }
    }

    pub fn on_fullscreen_change(&mut self, active: bool) {
        if let Some(session) = self.session.as_mut() {
            session.on_fullscreen_change(active);
        }
    }

    /// Back to the empty state, releasing the current file.
    pub fn reset(&mut self) {
        self.session = None;
        self.metadata = None;
        self.error = None;
        self.notice = None;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::MetadataLoaded(loaded) => {
                if let Some(metadata) = self.metadata.as_mut() {
                    metadata.apply_loaded(loaded);
                }
            }
            Effect::Failed(error) if error.is_terminal() => {
                self.error = Some(error.user_message());
                self.session = None;
                self.metadata = None;
            }
            Effect::Failed(error) => {
                self.notice = Some(error.user_message());
            }
        }
    }

    /// True while a file is bound but its metadata has not arrived.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.session.is_some()
            && self
                .metadata
                .as_ref()
                .is_some_and(|metadata| !metadata.is_complete())
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<PlaybackSnapshot> {
        self.session.as_ref().map(PlayerSession::snapshot)
    }

    #[must_use]
    pub fn session(&self) -> Option<&PlayerSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&VideoMetadata> {
        self.metadata.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }
}
