// SPDX-License-Identifier: MPL-2.0
//! Media resource binding.
//!
//! A [`MediaHandle`] turns an in-memory [`MediaFile`] into a revocable
//! [`SourceUrl`] the engine can stream from. The handle owns the registry
//! entry: releasing it consumes the handle and dropping it revokes, so a URL
//! can neither leak nor be revoked twice.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::media::MediaFile;

/// Opaque locator of a registered byte source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(String);

impl SourceUrl {
    #[cfg(test)]
    pub(crate) fn new(url: &str) -> Self {
        Self(url.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform facility that allocates and revokes source URLs.
///
/// Entries live until revoked; forgetting to revoke leaks the file bytes for
/// the lifetime of the registry.
pub trait SourceRegistry: Send + Sync {
    /// Registers the file's bytes and returns a fresh URL.
    fn create(&self, file: &MediaFile) -> SourceUrl;

    /// Frees the entry behind `url`.
    fn revoke(&self, url: &SourceUrl);
}

pub type SharedRegistry = Arc<dyn SourceRegistry>;

/// In-process registry keeping file bytes behind `blob:` URLs.
#[derive(Debug, Default)]
pub struct BlobRegistry {
    entries: Mutex<HashMap<SourceUrl, Arc<[u8]>>>,
    next_id: AtomicU64,
    revoked: AtomicU64,
}

impl BlobRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns the bytes behind `url` while it is registered.
    #[must_use]
    pub fn resolve(&self, url: &SourceUrl) -> Option<Arc<[u8]>> {
        self.lock().get(url).cloned()
    }

    /// Number of URLs currently registered.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of successful revocations so far.
    #[must_use]
    pub fn revoked_count(&self) -> u64 {
        self.revoked.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SourceUrl, Arc<[u8]>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SourceRegistry for BlobRegistry {
    fn create(&self, file: &MediaFile) -> SourceUrl {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = SourceUrl(format!("blob:uniview/{id}"));
        self.lock().insert(url.clone(), file.data());
        url
    }

    fn revoke(&self, url: &SourceUrl) {
        let removed = self.lock().remove(url);
        debug_assert!(removed.is_some(), "revoking unknown source {url}");
        if removed.is_some() {
            self.revoked.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Exclusive owner of one registered source.
///
/// Created by [`MediaHandle::bind`], revoked exactly once by either
/// [`MediaHandle::release`] or `Drop`.
pub struct MediaHandle {
    registry: SharedRegistry,
    url: SourceUrl,
}

impl MediaHandle {
    /// Registers `file` with `registry`.
    #[must_use]
    pub fn bind(registry: SharedRegistry, file: &MediaFile) -> Self {
        let url = registry.create(file);
        Self { registry, url }
    }

    /// The URL to hand to the engine. Only reachable while the handle lives.
    #[must_use]
    pub fn url(&self) -> &SourceUrl {
        &self.url
    }

    /// Revokes the URL now.
    pub fn release(self) {
        // Drop does the revocation.
        drop(self);
    }
}

impl Drop for MediaHandle {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}

impl fmt::Debug for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaHandle").field("url", &self.url).finish()
    }
}
