//! Blog Cache - tag-indexed in-memory TTL cache
//!
//! Memoizes expensive per-request blog computations (post listings, home page
//! data) with explicit expiration and invalidation by semantic tag, and serves
//! the cache over a small HTTP API for content-mutation hooks.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{generate_cache_key, CacheManager, TtlCache, CACHE_TAGS};
pub use config::Config;
pub use error::ApiError;
pub use tasks::spawn_cleanup_task;
