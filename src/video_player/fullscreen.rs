// SPDX-License-Identifier: MPL-2.0
//! Fullscreen platform surface.
//!
//! Requests may be refused. Acceptance is only known once the platform
//! reports the change, which the session feeds back as
//! `Intent::FullscreenChanged`.

use std::fmt;

/// Direction of a fullscreen request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenAction {
    Enter,
    Exit,
}

impl FullscreenAction {
    /// Verb used in user-facing messages.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            FullscreenAction::Enter => "enable",
            FullscreenAction::Exit => "exit",
        }
    }
}

/// Reason the platform refused a fullscreen request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenError {
    /// Platform error name, e.g. `NotAllowedError`.
    pub name: String,
    pub message: String,
}

impl FullscreenError {
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FullscreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.name)
    }
}

impl std::error::Error for FullscreenError {}

/// The player container's view of the platform fullscreen state.
pub trait FullscreenSurface: Send {
    /// Pure query: is the player container the current fullscreen owner?
    fn is_active(&self) -> bool;

    /// Asks the platform to make the container fullscreen.
    ///
    /// # Errors
    ///
    /// Returns the platform's refusal.
    fn request_enter(&mut self) -> Result<(), FullscreenError>;

    /// Asks the platform to leave fullscreen.
    ///
    /// # Errors
    ///
    /// Returns the platform's refusal.
    fn request_exit(&mut self) -> Result<(), FullscreenError>;
}
