// SPDX-License-Identifier: MPL-2.0
//! UI value objects.

pub mod newtypes;

pub use newtypes::ControlsTimeout;
