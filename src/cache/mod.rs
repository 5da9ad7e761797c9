//! Cache Module
//!
//! In-memory caching with per-entry TTL expiration and tag-based group invalidation.

mod clock;
mod entry;
mod keys;
mod manager;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use keys::{generate_cache_key, CACHE_TAGS, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use manager::CacheManager;
pub use stats::{ManagerStats, TtlCacheStats};
pub use store::TtlCache;

// == Public Constants ==
/// Default entry lifetime in seconds when none is configured
pub const DEFAULT_TTL_SECS: u64 = 3600;
