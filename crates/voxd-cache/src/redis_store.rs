//! Redis cache store adapter.
//!
//! Wraps a managed async connection (auto-reconnecting). Writes use
//! `SET … EX` so entry lifecycle is governed entirely by Redis's TTL; the
//! pipeline never deletes entries.
//!
//! Every operation is bounded by `op_timeout`. The orchestrator treats a
//! timeout the same as any other store error — a miss — so a slow backend
//! costs one synthesis, not a stalled request.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use voxd_core::domain::CacheKey;
use voxd_core::ports::{CacheStore, CacheStoreError};

/// Redis-backed [`CacheStore`].
pub struct RedisCacheStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisCacheStore {
    /// Connect to Redis at `url` (e.g., `redis://:pw@host:6379`).
    ///
    /// Fails fast if the initial connection cannot be established, so a
    /// misconfigured URL is caught at startup rather than on the first
    /// request.
    pub async fn connect(url: &str, op_timeout: Duration) -> Result<Self, CacheStoreError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheStoreError::Backend(e.to_string()))?;
        let conn = tokio::time::timeout(op_timeout.max(Duration::from_secs(2)), async {
            ConnectionManager::new(client).await
        })
        .await
        .map_err(|_| CacheStoreError::Timeout(op_timeout))?
        .map_err(|e| CacheStoreError::Backend(e.to_string()))?;

        tracing::info!(url, "connected to cache backend");
        Ok(Self { conn, op_timeout })
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, redis::RedisError>> + Send,
    ) -> Result<T, CacheStoreError> {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| CacheStoreError::Timeout(self.op_timeout))?
            .map_err(|e| CacheStoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CacheStoreError> {
        let mut conn = self.conn.clone();
        let key = key.as_str().to_string();
        self.bounded(async move { conn.get::<_, Option<Vec<u8>>>(key).await })
            .await
    }

    async fn set(
        &self,
        key: &CacheKey,
        payload: &[u8],
        ttl: Duration,
    ) -> Result<(), CacheStoreError> {
        let mut conn = self.conn.clone();
        let key = key.as_str().to_string();
        let payload = payload.to_vec();
        // TTL below one second would mean immediate expiry; clamp up.
        let ttl_secs = ttl.as_secs().max(1);
        self.bounded(async move { conn.set_ex::<_, _, ()>(key, payload, ttl_secs).await })
            .await
    }
}
