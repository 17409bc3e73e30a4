//! In-memory cache store with TTL expiry.
//!
//! A process-local stand-in for the shared Redis cache: useful in tests and
//! for single-node runs where an external store is not worth operating.
//! Expired entries are dropped lazily on lookup.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use voxd_core::domain::CacheKey;
use voxd_core::ports::{CacheStore, CacheStoreError};

/// In-process [`CacheStore`] backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    payload: Vec<u8>,
    expires_at: Instant,
}

impl MemoryCacheStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .map(|entries| entries.values().filter(|e| e.expires_at > now).count())
            .unwrap_or(0)
    }

    /// Whether the store holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheStoreError::Backend(e.to_string()))?;
        match entries.get(key.as_str()) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.payload.clone())),
            Some(_) => {
                entries.remove(key.as_str());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &CacheKey,
        payload: &[u8],
        ttl: Duration,
    ) -> Result<(), CacheStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheStoreError::Backend(e.to_string()))?;
        entries.insert(
            key.as_str().to_string(),
            Entry {
                payload: payload.to_vec(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
