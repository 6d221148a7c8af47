// SPDX-License-Identifier: MPL-2.0
//! Diagnostics: a bounded, in-memory record of what the player did.
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: cloneable, non-blocking producer
//! - [`DiagnosticsCollector`]: drains the channel into a [`CircularBuffer`]
//!   and exports JSON reports
//! - [`FileNameAnonymizer`]: keeps file names out of reports
//!
//! # Privacy
//!
//! File names are hashed before they are logged. Nothing is written to disk
//! or sent anywhere; export returns a string.

mod anonymizer;
mod buffer;
mod collector;
mod events;
mod report;

pub use anonymizer::FileNameAnonymizer;
pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, ErrorEvent, ErrorType, PlayerStateEvent, UserAction,
    WarningEvent, WarningType,
};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
