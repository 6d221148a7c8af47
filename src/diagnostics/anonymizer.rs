// SPDX-License-Identifier: MPL-2.0
//! File name anonymization for diagnostic reports.
//!
//! - Each anonymizer instance has its own session salt
//! - Same input + same instance = same hash
//! - Different instances produce different hashes
//! - The extension is kept, it carries diagnostic value

use std::time::{SystemTime, UNIX_EPOCH};

/// Hashes file name stems with a keyed blake3 hash.
#[derive(Debug, Clone)]
pub struct FileNameAnonymizer {
    salt: [u8; 32],
}

impl FileNameAnonymizer {
    /// Creates an anonymizer with a random session salt.
    ///
    /// Falls back to a clock-derived salt if the OS has no entropy to offer.
    #[must_use]
    pub fn new() -> Self {
        let mut salt = [0u8; 32];
        if getrandom::fill(&mut salt).is_err() {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_nanos());
            salt = Self::salt_from_bytes(&nanos.to_le_bytes());
        }
        Self { salt }
    }

    /// Creates an anonymizer with a deterministic salt, for reproducible tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            salt: Self::salt_from_bytes(&seed.to_le_bytes()),
        }
    }

    fn salt_from_bytes(bytes: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(bytes);
        hasher.update(b"uniview_file_name_anonymizer");
        *hasher.finalize().as_bytes()
    }

    /// Replaces the stem of `name` with an 8-character hash.
    ///
    /// `clip.mp4` becomes something like `3f9a0c21.mp4`; names without an
    /// extension (or dot-files) are hashed whole.
    #[must_use]
    pub fn anonymize_name(&self, name: &str) -> String {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
                format!("{}.{}", self.hash(stem), ext)
            }
            _ => self.hash(name),
        }
    }

    fn hash(&self, value: &str) -> String {
        let mut hasher = blake3::Hasher::new_keyed(&self.salt);
        hasher.update(value.as_bytes());
        hasher.finalize().to_hex()[..8].to_string()
    }
}

impl Default for FileNameAnonymizer {
    fn default() -> Self {
        Self::new()
    }
}
