// SPDX-License-Identifier: MPL-2.0
//! Factory for the platform collaborators a session needs.

use super::binding::SharedRegistry;
use super::engine::PlaybackEngine;
use super::fullscreen::FullscreenSurface;
use crate::domain::media::MediaFile;

/// Supplies the source registry, engines and the fullscreen surface.
///
/// A host creates one engine per selected file; the previous engine is
/// dropped with its session.
pub trait MediaPlatform: Send {
    fn registry(&self) -> SharedRegistry;

    /// Creates a fresh, unloaded engine for playing `file`.
    fn create_engine(&self, file: &MediaFile) -> Box<dyn PlaybackEngine>;

    fn fullscreen_surface(&self) -> Box<dyn FullscreenSurface>;
}
