//! # Response Cache
//!
//! Time-based revalidation for upstream responses.
//!
//! Successful response bodies are stored by request URL together with the
//! revalidation window they were fetched with. A lookup is a hit only while
//! the entry is younger than both its own window and the window the caller
//! asks for. Stale entries are swept whenever a new body is stored, and the
//! oldest entry is evicted once the cache holds `max_entries` bodies.
//!
//! The cache uses a read-write lock to allow concurrent reads while serializing writes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Bodies kept before the oldest is evicted.
pub const DEFAULT_MAX_ENTRIES: usize = 256;

/// Represents a cached response body with its expiration.
struct CachedResponse {
    body: Arc<str>,
    stored_at: Instant,
    ttl: Duration,
}

impl CachedResponse {
    fn is_fresh(&self) -> bool {
        self.is_fresh_within(self.ttl)
    }

    fn is_fresh_within(&self, window: Duration) -> bool {
        self.stored_at.elapsed() < self.ttl.min(window)
    }
}

/// Thread-safe response cache keyed by full request URL.
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
    max_entries: usize,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `max_entries` bodies (at least one).
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Return the cached body for `url` if it is younger than `window` and
    /// still inside the window it was stored with.
    pub async fn get(&self, url: &str, window: Duration) -> Option<Arc<str>> {
        let entries = self.entries.read().await;
        match entries.get(url) {
            Some(cached) if cached.is_fresh_within(window) => Some(Arc::clone(&cached.body)),
            Some(_) => {
                debug!("Cache expired for {}", url);
                None
            }
            None => None,
        }
    }

    /// Store a body for `url`, valid for `ttl`.
    ///
    /// A zero `ttl` is ignored.
    pub async fn insert(&self, url: String, body: Arc<str>, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }

        let mut entries = self.entries.write().await;
        entries.retain(|_, cached| cached.is_fresh());

        while entries.len() >= self.max_entries && !entries.contains_key(&url) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, cached)| cached.stored_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    debug!("Cache full, evicting {}", key);
                    entries.remove(&key);
                }
                None => break,
            }
        }

        entries.insert(
            url,
            CachedResponse {
                body,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
