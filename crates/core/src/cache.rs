//! In-memory response cache with a fixed time-to-live.
//!
//! Entries are only visible while `now < expires_at`. Expired entries are
//! treated as absent and purged lazily on the next access for their key.
//! There is no size-based eviction.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::metrics::CACHE_LOOKUPS;

/// Default entry lifetime (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Generic key to value cache with a TTL fixed at construction.
///
/// Individual `get`/`set` calls are atomic with respect to each other.
/// `get_or_fetch` does not coalesce concurrent producers for the same key:
/// two callers racing on a missing key may both run their producer, and the
/// last one to finish wins.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// The lifetime given to every stored entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the value for `key` if it has not expired.
    ///
    /// A stale entry is removed as a side effect.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if now < entry.expires_at => {
                CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
                Some(entry.value.clone())
            }
            Some(_) => {
                CACHE_LOOKUPS.with_label_values(&["expired"]).inc();
                entries.remove(key);
                None
            }
            None => {
                CACHE_LOOKUPS.with_label_values(&["miss"]).inc();
                None
            }
        }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let expires_at = Instant::now() + self.ttl;
        self.lock()
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Whether a fresh entry exists for `key`.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove the entry for `key`, fresh or not.
    pub fn delete(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached value, or run `producer` once and cache its result.
    ///
    /// Producer errors are returned unchanged and nothing is stored.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss, fetching");
        let value = producer().await?;
        self.set(key, value.clone());
        Ok(value)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // The map holds no invariants a panicking writer could break.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
