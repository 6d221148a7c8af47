// SPDX-License-Identifier: MPL-2.0
//! Video playback for uniview.
//!
//! A [`PlayerSession`] ties one selected file to one engine: it binds the
//! file to a revocable source, subscribes to the engine's events and runs
//! the [`VideoPlayer`] state machine until the file is replaced or closed.

pub mod binding;
pub mod engine;
pub mod fullscreen;
pub mod platform;
pub mod session;
pub mod simulated;
mod state;

pub use binding::{BlobRegistry, MediaHandle, SharedRegistry, SourceRegistry, SourceUrl};
pub use engine::{EngineEvent, EngineSubscription, EventEmitter, PlaybackEngine};
pub use fullscreen::{FullscreenAction, FullscreenError, FullscreenSurface};
pub use platform::MediaPlatform;
pub use session::{KeyResponse, PlayerSession};
pub use simulated::{
    EngineCommand, MediaProfile, SimulatedEngine, SimulatedFullscreen, SimulatedPlatform,
};
pub use state::{Effect, Intent, VideoPlayer};
