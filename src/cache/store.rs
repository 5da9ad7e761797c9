//! TTL Cache Module
//!
//! Generic key-value storage where every entry carries an absolute expiration.
//! Expired entries are evicted lazily on read, or eagerly through `cleanup`.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::cache::entry::secs_to_ms;
use crate::cache::{CacheEntry, Clock, SystemClock, TtlCacheStats, DEFAULT_TTL_SECS};

// == TTL Cache ==
/// In-memory cache with per-entry expiration.
///
/// No operation fails: missing keys, double deletes and clearing an empty
/// cache all return a falsy default.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// TTL applied when `set` is called without one
    default_ttl_ms: i64,
    /// Time source for expiration checks
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates a cache whose entries default to `default_ttl_secs`.
    pub fn new(default_ttl_secs: u64) -> Self {
        Self::with_clock(default_ttl_secs, Arc::new(SystemClock))
    }

    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(default_ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        let secs = i64::try_from(default_ttl_secs).unwrap_or(i64::MAX);
        Self {
            entries: HashMap::new(),
            default_ttl_ms: secs_to_ms(secs),
            clock,
        }
    }

    // == Set ==
    /// Inserts or overwrites `key`.
    ///
    /// The previous value and expiration are replaced wholesale.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl_secs` - Optional TTL in seconds (uses the default if None)
    pub fn set(&mut self, key: K, value: V, ttl_secs: Option<i64>) {
        let ttl_ms = ttl_secs.map_or(self.default_ttl_ms, secs_to_ms);
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl_ms);
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns the value for `key` if it is still live.
    ///
    /// An expired entry found here is removed before returning `None`.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();
        let live = self.entries.get(key)?.is_live(now);

        if !live {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Has ==
    /// Same as `get(key).is_some()`, including lazy eviction.
    pub fn has<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes `key`, returning whether an entry was present.
    ///
    /// An expired entry that had not been evicted yet still counts as present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries, live or expired.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Cleanup Expired ==
    /// Removes every entry whose expiration is in the past.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| entry.is_live(now));

        before - self.entries.len()
    }

    // == Stats ==
    /// Returns a snapshot without evicting anything.
    pub fn stats(&self) -> TtlCacheStats {
        let now = self.clock.now_ms();
        TtlCacheStats {
            size: self.entries.len(),
            expired: self
                .entries
                .values()
                .filter(|entry| entry.is_expired(now))
                .count(),
        }
    }

    // == Time To Live ==
    /// Remaining lifetime of `key` in milliseconds, or None if absent or expired.
    ///
    /// Diagnostic only: does not evict.
    pub fn ttl_remaining_ms<Q>(&self, key: &Q) -> Option<i64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.ttl_remaining_ms(now))
    }

    /// Iterates over stored keys, including expired ones not yet cleaned up.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Default TTL in milliseconds.
    pub fn default_ttl_ms(&self) -> i64 {
        self.default_ttl_ms
    }

    /// Returns the current number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}
