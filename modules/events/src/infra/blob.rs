//! Content-addressed blob storage for event images.
//!
//! Hashes are hex-encoded SHA-256 of the content, so identical uploads
//! always resolve to the same hash and re-uploads are free. The store
//! degrades instead of failing: absent content maps to the default
//! image, and a hash that cannot be resolved fetches the default image
//! rather than erroring the page that referenced it.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::domain::ports::BlobStore;

/// Content served when an event has no image or its blob is gone.
pub const DEFAULT_IMAGE: &str = "default-event-image";

fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Process-local blob store keyed by content hash. Pre-seeded with the
/// default image so the default hash always resolves.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(content_hash(DEFAULT_IMAGE), DEFAULT_IMAGE.to_owned());
        Self {
            blobs: RwLock::new(blobs),
        }
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, content: Option<&str>) -> String {
        let content = content.unwrap_or(DEFAULT_IMAGE);
        let hash = content_hash(content);
        self.blobs
            .write()
            .entry(hash.clone())
            .or_insert_with(|| content.to_owned());
        hash
    }

    async fn fetch(&self, content_hash: &str) -> String {
        match self.blobs.read().get(content_hash) {
            Some(content) => content.clone(),
            None => {
                warn!(hash = %content_hash, "blob not found, serving default image");
                DEFAULT_IMAGE.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_is_idempotent_for_identical_content() {
        let store = InMemoryBlobStore::new();
        let first = store.upload(Some("poster")).await;
        let second = store.upload(Some("poster")).await;
        assert_eq!(first, second);
        assert_eq!(store.fetch(&first).await, "poster");
    }

    #[tokio::test]
    async fn absent_content_maps_to_the_default_hash() {
        let store = InMemoryBlobStore::new();
        let a = store.upload(None).await;
        let b = store.upload(None).await;
        assert_eq!(a, b);
        assert_eq!(store.fetch(&a).await, DEFAULT_IMAGE);
    }

    #[tokio::test]
    async fn unknown_hash_resolves_to_the_default_image() {
        let store = InMemoryBlobStore::new();
        assert_eq!(store.fetch("no-such-hash").await, DEFAULT_IMAGE);
    }

    #[tokio::test]
    async fn distinct_content_gets_distinct_hashes() {
        let store = InMemoryBlobStore::new();
        let a = store.upload(Some("a")).await;
        let b = store.upload(Some("b")).await;
        assert_ne!(a, b);
    }
}
