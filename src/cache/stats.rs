//! Cache Statistics Module
//!
//! Point-in-time snapshots of cache and tag index occupancy.

use serde::Serialize;

// == TTL Cache Stats ==
/// Snapshot of a [`TtlCache`](super::TtlCache).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TtlCacheStats {
    /// Total stored entries, including expired ones not yet cleaned up
    pub size: usize,
    /// Entries whose expiration is already in the past
    pub expired: usize,
}

impl TtlCacheStats {
    /// Number of entries that would still be served.
    pub fn live(&self) -> usize {
        self.size.saturating_sub(self.expired)
    }
}

// == Manager Stats ==
/// Snapshot of a [`CacheManager`](super::CacheManager).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    /// Total stored entries in the underlying cache
    pub cache_size: usize,
    /// Distinct tags currently indexed (may include tags whose keys silently expired)
    pub tag_count: usize,
    /// Entries whose expiration is already in the past
    pub expired_count: usize,
}
