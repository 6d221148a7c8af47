// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Every variant is serde-tagged so exported reports stay readable without
//! the crate at hand.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// User-initiated actions on the player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    /// A file was selected. The name is anonymized before logging.
    LoadMedia {
        file: String,
        format: String,
        size_bytes: u64,
    },

    TogglePlayback,

    /// Seek through the progress track.
    Seek {
        fraction: f64,
    },

    /// Seek by a signed offset (arrow keys).
    SeekRelative {
        delta_secs: f64,
    },

    SetVolume {
        volume: f64,
    },

    ToggleMute,

    SetPlaybackRate {
        rate: f64,
    },

    ToggleFullscreen,

    ToggleSettingsMenu,
}

/// Player state transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlayerStateEvent {
    /// A media handle was bound to the engine.
    MediaBound,

    MetadataLoaded {
        duration_secs: f64,
        width: u32,
        height: u32,
    },

    PlaybackStarted {
        position_secs: f64,
    },

    PlaybackPaused {
        position_secs: f64,
    },

    FullscreenChanged {
        active: bool,
    },

    ControlsHidden,

    /// The session released its handle and detached its listeners.
    SessionClosed,
}

/// Categories of non-fatal issues.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A playback rate outside the presets was requested.
    RejectedPlaybackRate,
    /// The platform refused a fullscreen request.
    FullscreenRejected,
    /// The selection pre-check refused a file.
    UnplayableSelection,
}

/// A non-fatal issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// Categories of failures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The engine could not decode the bound file.
    UnsupportedMedia,
}

/// An operation that failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// Monotonic capture time, converted to an offset on export.
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
    },
    PlayerState {
        state: PlayerStateEvent,
    },
    Warning {
        event: WarningEvent,
    },
    Error {
        event: ErrorEvent,
    },
}
