//! In-memory response cache.
//!
//! Holds raw response bodies keyed by URL. Callers opt in per fetch by
//! passing a TTL hint; fetches without a hint never touch the cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

/// Thread-safe body cache shared by all fetches of one provider client.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    inner: Arc<tokio::sync::RwLock<HashMap<String, CacheEntry>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `key` if it has not expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().await;
        map.get(key).and_then(|entry| {
            if Instant::now() < entry.expires_at {
                Some(entry.body.clone())
            } else {
                None
            }
        })
    }

    /// Stores `body` under `key` for `ttl`, replacing any previous entry.
    pub async fn put(&self, key: String, body: String, ttl: Duration) {
        let mut map = self.inner.write().await;
        map.insert(
            key,
            CacheEntry {
                body,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
