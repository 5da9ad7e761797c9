//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiration.

// == Cache Entry ==
/// A stored value together with the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, opaque to the cache
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expire_at: i64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl_ms` after `now_ms`.
    ///
    /// Negative TTLs are accepted and produce an entry that is already expired.
    pub fn new(value: V, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            value,
            expire_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Live ==
    /// Returns true while `now_ms <= expire_at`.
    ///
    /// The expiration millisecond itself still counts as live, so a zero TTL
    /// serves the value for the rest of the tick it was written in.
    pub fn is_live(&self, now_ms: i64) -> bool {
        now_ms <= self.expire_at
    }

    // == Is Expired ==
    /// Complement of [`CacheEntry::is_live`]: `expire_at < now_ms`.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        !self.is_live(now_ms)
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds, clamped at 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: i64) -> i64 {
        self.expire_at.saturating_sub(now_ms).max(0)
    }
}

/// Converts a TTL in seconds to milliseconds without overflowing.
pub fn secs_to_ms(secs: i64) -> i64 {
    secs.saturating_mul(1000)
}
