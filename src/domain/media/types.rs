// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any engine or presentation
//! dependencies.

use std::fmt;
use std::sync::Arc;

/// Placeholder shown for metadata fields that are not known.
pub const NOT_AVAILABLE: &str = "N/A";

/// A file picked by the user, held entirely in memory.
///
/// Cloning is cheap: the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    name: String,
    mime_type: String,
    data: Arc<[u8]>,
}

impl MediaFile {
    /// Creates a new `MediaFile` from its name, declared MIME type and bytes.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: Arc::from(data),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Returns a shared reference to the raw bytes.
    #[must_use]
    pub fn data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    /// Selection pre-check: only `video/*` MIME types are handed to the engine.
    ///
    /// This does not guarantee the file decodes; the engine's error event
    /// covers that.
    #[must_use]
    pub fn is_playable_type(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    /// Upper-cased text after the last `.` of the name.
    ///
    /// A name without a dot yields the whole name (`README` gives
    /// `"README"`); a trailing dot yields `"N/A"`.
    #[must_use]
    pub fn format(&self) -> String {
        match self.name.rsplit('.').next() {
            Some(last) if !last.is_empty() => last.to_uppercase(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Pixel dimensions of a video track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// What the engine reports once the container has been parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedMetadata {
    pub duration: f64,
    pub resolution: Resolution,
}

/// Metadata shown next to the player.
///
/// `name`, `size` and `format` are known at selection time. `duration` and
/// `resolution` are filled once the engine has loaded the file and are never
/// retracted afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub name: String,
    pub size: u64,
    pub format: String,
    pub duration: f64,
    pub resolution: Option<Resolution>,
}

impl VideoMetadata {
    /// Partial metadata available as soon as a file is selected.
    #[must_use]
    pub fn from_file(file: &MediaFile) -> Self {
        Self {
            name: file.name().to_string(),
            size: file.size(),
            format: file.format(),
            duration: 0.0,
            resolution: None,
        }
    }

    /// Returns true once duration and resolution are known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.resolution.is_some()
    }

    /// Merges the engine's report.
    ///
    /// Only the first report is applied; returns false if metadata was
    /// already complete.
    pub fn apply_loaded(&mut self, loaded: LoadedMetadata) -> bool {
        if self.is_complete() {
            return false;
        }
        self.duration = loaded.duration.max(0.0);
        self.resolution = Some(loaded.resolution);
        true
    }

    /// Resolution as `"<width>x<height>"`, or `"N/A"` before it is known.
    #[must_use]
    pub fn resolution_label(&self) -> String {
        self.resolution
            .map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file(name: &str, mime: &str) -> MediaFile {
        MediaFile::new(name, mime, vec![0u8; 16])
    }

    #[test]
    fn format_is_uppercase_extension() {
        assert_eq!(sample_file("clip.mp4", "video/mp4").format(), "MP4");
        assert_eq!(
            sample_file("holiday.final.webm", "video/webm").format(),
            "WEBM"
        );
    }

    #[test]
    fn format_uses_last_dot_segment() {
        assert_eq!(sample_file("README", "video/mp4").format(), "README");
        assert_eq!(sample_file(".bashrc", "video/mp4").format(), "BASHRC");
    }

    #[test]
    fn format_of_trailing_dot_is_not_available() {
        assert_eq!(sample_file("trailing.", "video/mp4").format(), NOT_AVAILABLE);
        assert_eq!(sample_file("", "video/mp4").format(), NOT_AVAILABLE);
    }

    #[test]
    fn playable_type_requires_video_mime() {
        assert!(sample_file("a.mp4", "video/mp4").is_playable_type());
        assert!(sample_file("a.ogv", "video/ogg").is_playable_type());
        assert!(!sample_file("a.mp3", "audio/mpeg").is_playable_type());
        assert!(!sample_file("a.mp4", "").is_playable_type());
    }

    #[test]
    fn media_file_clone_shares_bytes() {
        let file = MediaFile::new("clip.mp4", "video/mp4", vec![1, 2, 3]);
        let copy = file.clone();
        assert!(Arc::ptr_eq(&file.data(), &copy.data()));
        assert_eq!(file.size(), 3);
    }

    #[test]
    fn resolution_displays_width_by_height() {
        assert_eq!(Resolution::new(1280, 720).to_string(), "1280x720");
    }

    #[test]
    fn metadata_starts_partial() {
        let metadata = VideoMetadata::from_file(&sample_file("clip.mp4", "video/mp4"));
        assert_eq!(metadata.name, "clip.mp4");
        assert_eq!(metadata.size, 16);
        assert_eq!(metadata.format, "MP4");
        assert!(!metadata.is_complete());
        assert_eq!(metadata.resolution_label(), NOT_AVAILABLE);
    }

    #[test]
    fn metadata_is_completed_once_and_never_retracted() {
        let mut metadata = VideoMetadata::from_file(&sample_file("clip.mp4", "video/mp4"));
        let first = LoadedMetadata {
            duration: 10.0,
            resolution: Resolution::new(1280, 720),
        };
        let second = LoadedMetadata {
            duration: 0.0,
            resolution: Resolution::new(0, 0),
        };

        assert!(metadata.apply_loaded(first));
        assert!(!metadata.apply_loaded(second));

        assert!((metadata.duration - 10.0).abs() < f64::EPSILON);
        assert_eq!(metadata.resolution_label(), "1280x720");
    }
}
