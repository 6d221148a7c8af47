// SPDX-License-Identifier: MPL-2.0
//! Deterministic in-process engine and platform.
//!
//! Nothing here decodes video. The engine follows the command/event contract
//! of a native media element closely enough to drive a session headlessly:
//! metadata arrives when [`SimulatedEngine::finish_loading`] is called and
//! time only moves through [`SimulatedEngine::advance`].
//!
//! Clones share state, so a test can keep a clone while the session owns
//! the boxed original.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::binding::{BlobRegistry, SharedRegistry, SourceUrl};
use super::engine::{EngineEvent, EngineSubscription, EventEmitter, PlaybackEngine};
use super::fullscreen::{FullscreenError, FullscreenSurface};
use super::platform::MediaPlatform;
use crate::domain::media::MediaFile;

/// What the simulated decoder finds inside a file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaProfile {
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    /// `false` makes loading end with an `Error` event.
    pub decodable: bool,
}

impl MediaProfile {
    #[must_use]
    pub fn new(duration: f64, width: u32, height: u32) -> Self {
        Self {
            duration,
            width,
            height,
            decodable: true,
        }
    }

    /// A file the decoder rejects.
    #[must_use]
    pub fn corrupted() -> Self {
        Self {
            decodable: false,
            ..Self::default()
        }
    }
}

impl Default for MediaProfile {
    fn default() -> Self {
        Self::new(10.0, 1280, 720)
    }
}

/// Commands received by the engine, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Load(SourceUrl),
    Unload,
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    SetMuted(bool),
    SetPlaybackRate(f64),
}

#[derive(Debug)]
struct EngineState {
    profile: MediaProfile,
    registry: Option<Arc<BlobRegistry>>,
    source: Option<SourceUrl>,
    loaded: bool,
    errored: bool,
    paused: bool,
    current_time: f64,
    volume: f64,
    muted: bool,
    rate: f64,
    emitter: EventEmitter,
    commands: Vec<EngineCommand>,
    commands_after_error: usize,
    commands_on_revoked_source: usize,
}

impl EngineState {
    fn duration(&self) -> f64 {
        if self.loaded {
            self.profile.duration
        } else {
            0.0
        }
    }

    fn record(&mut self, command: EngineCommand) {
        if self.errored {
            self.commands_after_error += 1;
        }
        if let (Some(registry), Some(source)) = (&self.registry, &self.source) {
            if registry.resolve(source).is_none() {
                self.commands_on_revoked_source += 1;
            }
        }
        self.commands.push(command);
    }

    fn emit(&mut self, event: EngineEvent) {
        self.emitter.emit(&event);
    }
}

/// Headless [`PlaybackEngine`].
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    state: Arc<Mutex<EngineState>>,
}

impl SimulatedEngine {
    #[must_use]
    pub fn new(profile: MediaProfile) -> Self {
        Self {
            state: Arc::new(Mutex::new(EngineState {
                profile,
                registry: None,
                source: None,
                loaded: false,
                errored: false,
                paused: true,
                current_time: 0.0,
                volume: 1.0,
                muted: false,
                rate: 1.0,
                emitter: EventEmitter::new(),
                commands: Vec::new(),
                commands_after_error: 0,
                commands_on_revoked_source: 0,
            })),
        }
    }

    /// Lets the engine notice commands issued against a revoked source.
    #[must_use]
    pub fn with_registry(self, registry: Arc<BlobRegistry>) -> Self {
        self.lock().registry = Some(registry);
        self
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Completes parsing of the loaded source: emits `LoadedMetadata`, or
    /// `Error` if the profile is not decodable.
    pub fn finish_loading(&self) {
        let mut state = self.lock();
        if state.source.is_none() || state.loaded || state.errored {
            return;
        }
        if state.profile.decodable {
            state.loaded = true;
            let event = EngineEvent::LoadedMetadata {
                duration: state.profile.duration,
                width: state.profile.width,
                height: state.profile.height,
            };
            state.emit(event);
        } else {
            state.errored = true;
            state.emit(EngineEvent::Error {
                detail: "no decodable video track".to_string(),
            });
        }
    }

    /// Plays `secs` of wall time at the current rate.
    ///
    /// Reaching the end pauses the engine, like a media element that ended.
    pub fn advance(&self, secs: f64) {
        let mut state = self.lock();
        if state.paused || !state.loaded || state.errored {
            return;
        }
        let duration = state.duration();
        let next = (state.current_time + secs * state.rate).min(duration);
        state.current_time = next;
        state.emit(EngineEvent::TimeUpdate { current_time: next });
        if next >= duration {
            state.paused = true;
            state.emit(EngineEvent::Pause);
        }
    }

    /// Fails mid-playback, as a truncated file would.
    pub fn fail(&self, detail: &str) {
        let mut state = self.lock();
        if state.source.is_none() || state.errored {
            return;
        }
        state.errored = true;
        state.emit(EngineEvent::Error {
            detail: detail.to_string(),
        });
    }

    #[must_use]
    pub fn source(&self) -> Option<SourceUrl> {
        self.lock().source.clone()
    }

    #[must_use]
    pub fn playback_rate(&self) -> f64 {
        self.lock().rate
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().emitter.listener_count()
    }

    #[must_use]
    pub fn commands(&self) -> Vec<EngineCommand> {
        self.lock().commands.clone()
    }

    /// Commands received after the `Error` event.
    #[must_use]
    pub fn commands_after_error(&self) -> usize {
        self.lock().commands_after_error
    }

    /// Commands received while the loaded source was already revoked.
    #[must_use]
    pub fn commands_on_revoked_source(&self) -> usize {
        self.lock().commands_on_revoked_source
    }
}

impl Default for SimulatedEngine {
    fn default() -> Self {
        Self::new(MediaProfile::default())
    }
}

impl PlaybackEngine for SimulatedEngine {
    fn load(&mut self, source: &SourceUrl) {
        let mut state = self.lock();
        state.errored = false;
        state.source = Some(source.clone());
        state.record(EngineCommand::Load(source.clone()));
        state.loaded = false;
        state.paused = true;
        state.current_time = 0.0;
    }

    fn unload(&mut self) {
        let mut state = self.lock();
        state.commands.push(EngineCommand::Unload);
        state.source = None;
        state.loaded = false;
        state.paused = true;
        state.current_time = 0.0;
    }

    fn play(&mut self) {
        let mut state = self.lock();
        state.record(EngineCommand::Play);
        if state.source.is_none() || state.errored || !state.paused {
            return;
        }
        let duration = state.duration();
        if duration > 0.0 && state.current_time >= duration {
            state.current_time = 0.0;
            state.emit(EngineEvent::TimeUpdate { current_time: 0.0 });
        }
        state.paused = false;
        state.emit(EngineEvent::Play);
    }

    fn pause(&mut self) {
        let mut state = self.lock();
        state.record(EngineCommand::Pause);
        if state.source.is_none() || state.paused {
            return;
        }
        state.paused = true;
        state.emit(EngineEvent::Pause);
    }

    fn seek(&mut self, time: f64) {
        let mut state = self.lock();
        state.record(EngineCommand::Seek(time));
        if state.source.is_none() || state.errored || !time.is_finite() {
            return;
        }
        let clamped = time.clamp(0.0, state.duration());
        state.current_time = clamped;
        state.emit(EngineEvent::TimeUpdate {
            current_time: clamped,
        });
    }

    fn set_volume(&mut self, volume: f64) {
        let mut state = self.lock();
        state.record(EngineCommand::SetVolume(volume));
        state.volume = volume.clamp(0.0, 1.0);
    }

    fn set_muted(&mut self, muted: bool) {
        let mut state = self.lock();
        state.record(EngineCommand::SetMuted(muted));
        state.muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        let mut state = self.lock();
        state.record(EngineCommand::SetPlaybackRate(rate));
        state.rate = rate;
    }

    fn current_time(&self) -> f64 {
        self.lock().current_time
    }

    fn duration(&self) -> f64 {
        self.lock().duration()
    }

    fn video_size(&self) -> (u32, u32) {
        let state = self.lock();
        if state.loaded {
            (state.profile.width, state.profile.height)
        } else {
            (0, 0)
        }
    }

    fn is_paused(&self) -> bool {
        self.lock().paused
    }

    fn volume(&self) -> f64 {
        self.lock().volume
    }

    fn is_muted(&self) -> bool {
        self.lock().muted
    }

    fn subscribe(&mut self) -> EngineSubscription {
        self.lock().emitter.subscribe()
    }
}

// =============================================================================
// Fullscreen
// =============================================================================

#[derive(Debug, Default)]
struct FullscreenState {
    active: bool,
    pending: Option<bool>,
    refusal: Option<FullscreenError>,
}

/// Fullscreen surface whose changes are confirmed explicitly.
///
/// Requests are queued until [`SimulatedFullscreen::confirm`] plays the
/// role of the platform's change notification.
#[derive(Debug, Clone, Default)]
pub struct SimulatedFullscreen {
    state: Arc<Mutex<FullscreenState>>,
}

impl SimulatedFullscreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FullscreenState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every following request fail with `error`.
    pub fn refuse_with(&self, error: FullscreenError) {
        self.lock().refusal = Some(error);
    }

    pub fn allow(&self) {
        self.lock().refusal = None;
    }

    /// Applies the pending request and returns the new state, if any.
    pub fn confirm(&self) -> Option<bool> {
        let mut state = self.lock();
        let next = state.pending.take()?;
        state.active = next;
        Some(next)
    }

    /// Leaves fullscreen without a request (Escape key, OS gesture).
    pub fn force_exit(&self) -> bool {
        let mut state = self.lock();
        let was_active = state.active;
        state.active = false;
        state.pending = None;
        was_active
    }

    fn request(&self, enter: bool) -> Result<(), FullscreenError> {
        let mut state = self.lock();
        if let Some(error) = &state.refusal {
            return Err(error.clone());
        }
        state.pending = Some(enter);
        Ok(())
    }
}

impl FullscreenSurface for SimulatedFullscreen {
    fn is_active(&self) -> bool {
        self.lock().active
    }

    fn request_enter(&mut self) -> Result<(), FullscreenError> {
        self.request(true)
    }

    fn request_exit(&mut self) -> Result<(), FullscreenError> {
        self.request(false)
    }
}

// =============================================================================
// Platform
// =============================================================================

#[derive(Debug, Default)]
struct PlatformState {
    profiles: HashMap<String, MediaProfile>,
    engines: Vec<SimulatedEngine>,
}

/// [`MediaPlatform`] handing out simulated engines.
///
/// Files get the profile registered for their name, or the default
/// 10 s 1280x720 profile.
#[derive(Debug, Clone)]
pub struct SimulatedPlatform {
    registry: Arc<BlobRegistry>,
    fullscreen: SimulatedFullscreen,
    state: Arc<Mutex<PlatformState>>,
}

impl SimulatedPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: BlobRegistry::shared(),
            fullscreen: SimulatedFullscreen::new(),
            state: Arc::new(Mutex::new(PlatformState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlatformState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers the profile used for files named `name`.
    #[must_use]
    pub fn with_profile(self, name: &str, profile: MediaProfile) -> Self {
        self.lock().profiles.insert(name.to_string(), profile);
        self
    }

    #[must_use]
    pub fn blob_registry(&self) -> Arc<BlobRegistry> {
        Arc::clone(&self.registry)
    }

    #[must_use]
    pub fn fullscreen(&self) -> SimulatedFullscreen {
        self.fullscreen.clone()
    }

    /// The engine created for the most recent file.
    #[must_use]
    pub fn last_engine(&self) -> Option<SimulatedEngine> {
        self.lock().engines.last().cloned()
    }

    /// Every engine created so far, oldest first.
    #[must_use]
    pub fn engines(&self) -> Vec<SimulatedEngine> {
        self.lock().engines.clone()
    }
}

impl Default for SimulatedPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPlatform for SimulatedPlatform {
    fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    fn create_engine(&self, file: &MediaFile) -> Box<dyn PlaybackEngine> {
        let mut state = self.lock();
        let profile = state
            .profiles
            .get(file.name())
            .cloned()
            .unwrap_or_default();
        let engine = SimulatedEngine::new(profile).with_registry(self.blob_registry());
        state.engines.push(engine.clone());
        Box::new(engine)
    }

    fn fullscreen_surface(&self) -> Box<dyn FullscreenSurface> {
        Box::new(self.fullscreen.clone())
    }
}
