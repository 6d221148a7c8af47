// SPDX-License-Identifier: MPL-2.0
//! Auto-hide countdown for the controls overlay.
//!
//! At most one countdown is pending. Restarting replaces the deadline and
//! cancelling clears it, so a superseded countdown can never fire.

use std::future;

use tokio::time::{self, Instant};

use crate::domain::ui::ControlsTimeout;

#[derive(Debug, Clone)]
pub struct ControlsVisibilityTimer {
    delay: ControlsTimeout,
    deadline: Option<Instant>,
}

impl ControlsVisibilityTimer {
    #[must_use]
    pub fn new(delay: ControlsTimeout) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> ControlsTimeout {
        self.delay
    }

    /// Starts a fresh countdown, discarding any pending one.
    pub fn restart(&mut self) {
        self.deadline = Some(Instant::now() + self.delay.as_duration());
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true once if the countdown has run out, clearing it.
    pub fn poll_expired(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Resolves when the pending countdown runs out.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future leaves the deadline in place.
    pub async fn expired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                time::sleep_until(deadline).await;
                self.deadline = None;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for ControlsVisibilityTimer {
    fn default() -> Self {
        Self::new(ControlsTimeout::default())
    }
}
