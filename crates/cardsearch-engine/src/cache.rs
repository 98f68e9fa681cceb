//! Query result caching.
//!
//! An LRU cache with TTL expiration mapping normalized query text to the
//! bitmap of matching printings and the warnings raised while evaluating it.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use roaring::RoaringBitmap;

use crate::config::CacheConfig;

/// A cached evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedSearch {
    /// Indices of matching printings.
    pub matched: RoaringBitmap,
    /// Warnings raised during evaluation.
    pub warnings: Vec<String>,
    /// Whether the query asked for the all-printings view.
    pub all_printings: bool,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    search: CachedSearch,
    created_at: Instant,
}

impl CacheEntry {
    fn new(search: CachedSearch) -> Self {
        Self {
            search,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Thread-safe LRU cache with TTL expiration for search results.
///
/// - **LRU Eviction**: When the cache is full, the least recently used entry is evicted.
/// - **TTL Expiration**: Entries expire after the configured time-to-live.
/// - **Thread-Safe**: A `parking_lot` mutex guards the LRU list.
///
/// # Example
///
/// ```rust
/// use cardsearch_engine::{CacheConfig, CachedSearch, QueryCache};
///
/// let cache = QueryCache::new(CacheConfig::default());
/// let search = CachedSearch {
///     matched: [1, 5, 9].into_iter().collect(),
///     ..CachedSearch::default()
/// };
/// cache.set("t:forest".to_string(), search.clone());
/// assert_eq!(cache.get("t:forest"), Some(search));
/// ```
pub struct QueryCache {
    inner: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl QueryCache {
    /// Creates a new query cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_capacity(config.max_entries, config.ttl)
    }

    /// Creates a cache with custom capacity and TTL. A capacity of zero is treated as one.
    pub fn with_capacity(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Gets a cached result by key.
    ///
    /// Returns `None` if the key is missing or its entry has expired; an
    /// expired entry is dropped. On a hit the entry becomes most recently used.
    pub fn get(&self, key: &str) -> Option<CachedSearch> {
        let mut cache = self.inner.lock();
        let expired = cache.get(key)?.is_expired(self.ttl);
        if expired {
            cache.pop(key);
            return None;
        }
        cache.get(key).map(|entry| entry.search.clone())
    }

    /// Stores a result, evicting the least recently used entry when full.
    pub fn set(&self, key: String, search: CachedSearch) {
        self.inner.lock().put(key, CacheEntry::new(search));
    }

    /// Checks if a key exists in the cache without affecting LRU order.
    ///
    /// Expired entries that have not been cleaned up still count.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Number of entries, including expired ones not yet cleaned up.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Removes expired entries from the cache.
    pub fn cleanup_expired(&self) {
        let mut cache = self.inner.lock();
        let expired_keys: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired_keys {
            cache.pop(&key);
        }
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let cache = self.inner.lock();
        let total = cache.len();
        let expired = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .count();
        CacheStats {
            total_entries: total,
            expired_entries: expired,
            valid_entries: total.saturating_sub(expired),
        }
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("QueryCache")
            .field("entries", &stats.total_entries)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Statistics about the cache state.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Total number of entries in the cache.
    pub total_entries: usize,
    /// Number of expired entries (not yet cleaned up).
    pub expired_entries: usize,
    /// Number of valid (non-expired) entries.
    pub valid_entries: usize,
}

/// Normalizes query text for consistent cache keys.
///
/// Whitespace runs outside double quotes collapse to one space and the
/// ends are trimmed. Quoted text and case are kept as written.
///
/// ```rust
/// use cardsearch_engine::normalize_cache_key;
///
/// assert_eq!(normalize_cache_key("  t:forest   e:lea "), "t:forest e:lea");
/// assert_eq!(normalize_cache_key("o:\"deals  3\""), "o:\"deals  3\"");
/// ```
pub fn normalize_cache_key(query: &str) -> String {
    let mut key = String::with_capacity(query.len());
    let mut quoted = false;
    let mut pending_space = false;
    for c in query.chars() {
        if !quoted && c.is_whitespace() {
            pending_space = !key.is_empty();
            continue;
        }
        if pending_space {
            key.push(' ');
            pending_space = false;
        }
        if c == '"' {
            quoted = !quoted;
        }
        key.push(c);
    }
    key
}
