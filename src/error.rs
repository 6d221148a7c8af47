// SPDX-License-Identifier: MPL-2.0
use std::fmt;

use crate::video_player::{FullscreenAction, FullscreenError};

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Video(VideoError),
}

/// Failures surfaced to the user while selecting or playing a video.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoError {
    /// The selected file did not pass the `video/*` pre-check.
    UnsupportedFileType(String),

    /// The engine could not decode or render the bound resource.
    /// Terminal for the current media handle.
    UnsupportedMedia(String),

    /// The platform refused to enter or leave fullscreen. Non-fatal.
    FullscreenRequest(FullscreenAction, FullscreenError),
}

impl VideoError {
    /// Returns the message handed to the error reporting surface.
    pub fn user_message(&self) -> String {
        match self {
            VideoError::UnsupportedFileType(_) => {
                "Unsupported file type. Please select a video file.".to_string()
            }
            VideoError::UnsupportedMedia(_) => "Unsupported format or corrupted file.".to_string(),
            VideoError::FullscreenRequest(action, err) => format!(
                "Error attempting to {} full-screen mode: {} ({})",
                action.verb(),
                err.message,
                err.name
            ),
        }
    }

    /// Returns true if the error invalidates the current media handle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoError::UnsupportedMedia(_))
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::UnsupportedFileType(mime) => {
                write!(f, "Unsupported file type: {}", mime)
            }
            VideoError::UnsupportedMedia(detail) => write!(f, "Unsupported media: {}", detail),
            VideoError::FullscreenRequest(action, err) => write!(
                f,
                "Fullscreen {} request rejected: {} ({})",
                action.verb(),
                err.message,
                err.name
            ),
        }
    }
}

impl std::error::Error for VideoError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Video(e) => write!(f, "Video Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
