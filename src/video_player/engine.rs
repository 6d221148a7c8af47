// SPDX-License-Identifier: MPL-2.0
//! Playback engine contract.
//!
//! Commands are fire-and-forget: they never touch the player snapshot.
//! Confirmation arrives later as an [`EngineEvent`] through an
//! [`EngineSubscription`].

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use super::binding::SourceUrl;

/// The fixed set of notifications an engine emits.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Container and track info parsed.
    LoadedMetadata {
        duration: f64,
        width: u32,
        height: u32,
    },
    /// Playback position advanced (engine-determined cadence).
    TimeUpdate { current_time: f64 },
    /// Engine transitioned to playing.
    Play,
    /// Engine transitioned to paused.
    Pause,
    /// Decode or container failure. Terminal for the current source.
    Error { detail: String },
}

/// A native decode/render facility bound to one source at a time.
pub trait PlaybackEngine: Send {
    /// Attaches the engine to `source`, replacing any previous one.
    fn load(&mut self, source: &SourceUrl);

    /// Detaches the current source.
    fn unload(&mut self);

    fn play(&mut self);
    fn pause(&mut self);

    /// Requests a new position; the engine clamps it to `[0, duration]`.
    fn seek(&mut self, time: f64);

    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_playback_rate(&mut self, rate: f64);

    fn current_time(&self) -> f64;

    /// `0.0` until metadata is loaded.
    fn duration(&self) -> f64;

    /// `(width, height)`, `(0, 0)` until metadata is loaded.
    fn video_size(&self) -> (u32, u32);

    fn is_paused(&self) -> bool;
    fn volume(&self) -> f64;
    fn is_muted(&self) -> bool;

    /// Registers a new listener.
    fn subscribe(&mut self) -> EngineSubscription;
}

/// Receiving end of an engine listener.
///
/// Events arrive in emission order. Closing (or dropping) the subscription
/// detaches the listener; the engine stops delivering to it.
#[derive(Debug)]
pub struct EngineSubscription {
    rx: UnboundedReceiver<EngineEvent>,
}

impl EngineSubscription {
    /// Returns the next queued event without waiting.
    pub fn try_next(&mut self) -> Option<EngineEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Waits for the next event. Returns `None` once the engine is gone or
    /// the subscription was closed and drained.
    pub async fn next(&mut self) -> Option<EngineEvent> {
        self.rx.recv().await
    }

    /// Detaches the listener and discards undelivered events.
    pub fn close(&mut self) {
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }
}

impl Drop for EngineSubscription {
    fn drop(&mut self) {
        self.rx.close();
    }
}

/// Fan-out of engine events to every live subscription.
#[derive(Debug, Default)]
pub struct EventEmitter {
    listeners: Vec<UnboundedSender<EngineEvent>>,
}

impl EventEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> EngineSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(tx);
        EngineSubscription { rx }
    }

    /// Delivers `event` to each listener, pruning the ones that went away.
    pub fn emit(&mut self, event: &EngineEvent) {
        self.listeners
            .retain(|listener| listener.send(event.clone()).is_ok());
    }

    /// Number of attached listeners.
    ///
    /// Closed subscriptions are not counted even before the next emit.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|listener| !listener.is_closed())
            .count()
    }
}
