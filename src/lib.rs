// SPDX-License-Identifier: MPL-2.0
//! `uniview` is the core of a local video player.
//!
//! It binds a selected file to a playback engine, keeps the transport state
//! in sync with the engine's events, and maps keyboard and pointer input to
//! state transitions, hiding the controls overlay after an idle period.
//!
//! The engine and the fullscreen surface are platform collaborators behind
//! traits; [`video_player::simulated`] provides deterministic versions for
//! tests and headless shells.

#![doc(html_root_url = "https://docs.rs/uniview/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod ui;
pub mod video_player;
pub mod viewer;

#[cfg(test)]
mod test_utils;
