// SPDX-License-Identifier: MPL-2.0
//! Media domain types.

pub mod types;

pub use types::{LoadedMetadata, MediaFile, Resolution, VideoMetadata, NOT_AVAILABLE};
