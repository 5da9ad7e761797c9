//! Cache Manager Module
//!
//! Wraps a [`TtlCache`] with a tag → keys secondary index so related entries
//! (every post listing, the home page, ...) can be dropped in one call.
//!
//! The index is eventually consistent with the cache: a key can expire
//! silently while still listed under its tags. `cleanup` and `delete` repair
//! that drift; nothing else does.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{Clock, ManagerStats, TtlCache, DEFAULT_TTL_SECS};

// == Cache Manager ==
/// Tag-aware cache for memoized route data.
#[derive(Debug)]
pub struct CacheManager<V = Value> {
    /// Underlying expiring storage
    cache: TtlCache<String, V>,
    /// Tag to the keys stored under it
    tag_index: HashMap<String, HashSet<String>>,
}

impl<V> CacheManager<V> {
    // == Constructor ==
    /// Creates a manager whose entries default to `default_ttl_secs`.
    pub fn new(default_ttl_secs: u64) -> Self {
        Self {
            cache: TtlCache::new(default_ttl_secs),
            tag_index: HashMap::new(),
        }
    }

    /// Creates a manager that reads time from `clock`.
    pub fn with_clock(default_ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: TtlCache::with_clock(default_ttl_secs, clock),
            tag_index: HashMap::new(),
        }
    }

    // == Set ==
    /// Stores `value` under `key` and indexes the key under every tag.
    ///
    /// With no tags the entry is reachable only by key. Overwriting a key
    /// adds to its tag memberships; previous tags are not dropped.
    pub fn set<T: AsRef<str>>(
        &mut self,
        key: impl Into<String>,
        value: V,
        tags: &[T],
        ttl_secs: Option<i64>,
    ) {
        let key = key.into();
        self.cache.set(key.clone(), value, ttl_secs);

        for tag in tags {
            self.tag_index
                .entry(tag.as_ref().to_string())
                .or_default()
                .insert(key.clone());
        }
    }

    // == Get ==
    /// Returns the value for `key` if it is still live.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.cache.get(key)
    }

    // == Has ==
    /// Whether `key` is live. Evicts it if expired.
    pub fn has(&mut self, key: &str) -> bool {
        self.cache.has(key)
    }

    // == Invalidate By Tag ==
    /// Deletes every key indexed under `tag` and forgets the tag.
    ///
    /// Returns how many entries were actually removed from the cache. Keys
    /// that had already been evicted do not count, but the tag is dropped
    /// regardless. Removed keys are also scrubbed from any co-occurring tags.
    pub fn invalidate_by_tag(&mut self, tag: &str) -> usize {
        let Some(keys) = self.tag_index.remove(tag) else {
            debug!("Invalidate tag '{}': not indexed", tag);
            return 0;
        };

        let deleted = keys.iter().filter(|key| self.cache.delete(*key)).count();
        self.scrub_keys(&keys);

        info!(
            "Invalidated tag '{}': {} of {} indexed keys deleted",
            tag,
            deleted,
            keys.len()
        );
        deleted
    }

    // == Invalidate By Tags ==
    /// Invalidates each tag in order and sums the results.
    ///
    /// A key shared by several tags is counted once, by the first tag that
    /// reaches it.
    pub fn invalidate_by_tags<T: AsRef<str>>(&mut self, tags: &[T]) -> usize {
        tags.iter()
            .map(|tag| self.invalidate_by_tag(tag.as_ref()))
            .sum()
    }

    // == Delete ==
    /// Removes `key` from the cache and from every tag that lists it.
    ///
    /// Tags left empty are dropped. Returns the underlying cache's result.
    pub fn delete(&mut self, key: &str) -> bool {
        let deleted = self.cache.delete(key);

        self.tag_index.retain(|_, keys| {
            keys.remove(key);
            !keys.is_empty()
        });

        deleted
    }

    // == Clear ==
    /// Removes every entry and every tag.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.tag_index.clear();
        info!("Cache cleared");
    }

    // == Cleanup ==
    /// Evicts expired entries, then prunes tag index entries pointing at them.
    ///
    /// Returns the number of cache entries removed.
    pub fn cleanup(&mut self) -> usize {
        let removed = self.cache.cleanup();
        let tags_before = self.tag_index.len();

        let cache = &mut self.cache;
        self.tag_index.retain(|_, keys| {
            keys.retain(|key| cache.has(key));
            !keys.is_empty()
        });

        let tags_dropped = tags_before - self.tag_index.len();
        if removed > 0 || tags_dropped > 0 {
            info!(
                "Cleanup: removed {} expired entries, dropped {} empty tags",
                removed, tags_dropped
            );
        } else {
            debug!("Cleanup: nothing to remove");
        }

        removed
    }

    // == Stats ==
    /// Returns a snapshot of cache occupancy and tag count.
    pub fn stats(&self) -> ManagerStats {
        let cache_stats = self.cache.stats();
        ManagerStats {
            cache_size: cache_stats.size,
            tag_count: self.tag_index.len(),
            expired_count: cache_stats.expired,
        }
    }

    // == Tag Introspection ==
    /// Indexed tag names, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tag_index.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Keys indexed under `tag`, sorted. May include keys that silently expired.
    pub fn keys_for_tag(&self, tag: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .tag_index
            .get(tag)
            .map(|keys| keys.iter().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Removes `removed` from every tag set, dropping tags left empty.
    fn scrub_keys(&mut self, removed: &HashSet<String>) {
        self.tag_index.retain(|_, keys| {
            keys.retain(|key| !removed.contains(key));
            !keys.is_empty()
        });
    }
}

impl<V> Default for CacheManager<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}
