// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects and records shared by the player.
//!
//! Nothing in here talks to an engine, a clock or the filesystem.
//!
//! # Modules
//!
//! - [`diagnostics`]: [`BufferCapacity`](diagnostics::BufferCapacity)
//! - [`media`]: [`MediaFile`](media::MediaFile), [`Resolution`](media::Resolution),
//!   [`VideoMetadata`](media::VideoMetadata)
//! - [`ui`]: [`ControlsTimeout`](ui::ControlsTimeout)
//! - [`video`]: [`PlaybackSnapshot`](video::PlaybackSnapshot), [`Volume`](video::Volume),
//!   [`PlaybackRate`](video::PlaybackRate)

pub mod diagnostics;
pub mod media;
pub mod ui;
pub mod video;
