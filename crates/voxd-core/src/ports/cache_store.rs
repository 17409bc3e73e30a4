//! Cache store port — TTL-bounded byte-blob cache.
//!
//! The store is a shared external service (Redis in production, in-memory in
//! tests). It is trusted as append/read-only from the pipeline's
//! perspective: a hit is returned unchanged, and entry lifecycle is entirely
//! governed by the store's TTL.
//!
//! Every error from this port is treated by the orchestrator as a miss.
//! Implementations must bound their own latency (asynchronous I/O with an
//! operation timeout) so a slow backend degrades instead of stalling
//! requests.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::CacheKey;

/// Errors from a cache store adapter. Never surfaced to callers.
#[derive(Debug, Error)]
pub enum CacheStoreError {
    /// The backend rejected or failed the operation.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// The operation exceeded the configured timeout.
    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Key-value cache with TTL-bounded writes and byte-blob reads.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a payload. `Ok(None)` is a miss.
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheStoreError>;

    /// Store a payload with the given time-to-live.
    async fn set(
        &self,
        key: &CacheKey,
        payload: &[u8],
        ttl: Duration,
    ) -> Result<(), CacheStoreError>;
}
