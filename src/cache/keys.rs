//! Cache key naming and the shared tag vocabulary.
//!
//! Producers (route loaders calling `set`) and consumers (mutation hooks
//! calling `invalidate_by_tags`) must agree on these strings. Changing a format
//! here does not fail loudly: old lookups simply miss.

/// Page used when a listing is requested without one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when a listing is requested without one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Placeholder for "no tag filter" inside listing keys.
const ALL: &str = "all";

/// Deterministic key builders for each cached blog computation.
pub mod generate_cache_key {
    use super::{ALL, DEFAULT_LIMIT, DEFAULT_PAGE};

    /// Post listing, optionally filtered by tag: `posts:{tag|all}:{page}:{limit}`.
    pub fn posts(tag: Option<&str>, page: Option<u32>, limit: Option<u32>) -> String {
        format!(
            "posts:{}:{}:{}",
            tag.unwrap_or(ALL),
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_LIMIT)
        )
    }

    /// Single rendered post: `post:{slug}`.
    pub fn post_detail(slug: &str) -> String {
        format!("post:{}", slug)
    }

    /// Tag cloud with post counts.
    pub fn tags() -> String {
        format!("tags:{}", ALL)
    }

    /// Home page payload.
    pub fn home() -> String {
        "home".to_string()
    }

    /// Page count metadata for a listing: `pagination:{tag|all}:{limit}`.
    pub fn pagination(tag: Option<&str>, limit: Option<u32>) -> String {
        format!(
            "pagination:{}:{}",
            tag.unwrap_or(ALL),
            limit.unwrap_or(DEFAULT_LIMIT)
        )
    }
}

/// Fixed vocabulary of invalidation groups.
#[allow(non_snake_case)]
pub mod CACHE_TAGS {
    pub const POSTS: &str = "posts";
    pub const TAGS: &str = "tags";
    pub const HOME: &str = "home";
    pub const PAGINATION: &str = "pagination";

    /// Every tag, for "content changed, drop everything derived from it".
    pub const ALL: &[&str] = &[POSTS, TAGS, HOME, PAGINATION];
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_key_defaults() {
        assert_eq!(generate_cache_key::posts(None, None, None), "posts:all:1:10");
    }

    #[test]
    fn test_posts_key_with_params() {
        assert_eq!(
            generate_cache_key::posts(Some("svelte"), Some(2), Some(20)),
            "posts:svelte:2:20"
        );
        assert_eq!(
            generate_cache_key::posts(Some("rust"), None, Some(5)),
            "posts:rust:1:5"
        );
    }

    #[test]
    fn test_post_detail_key() {
        assert_eq!(generate_cache_key::post_detail("my-post"), "post:my-post");
    }

    #[test]
    fn test_fixed_keys() {
        assert_eq!(generate_cache_key::tags(), "tags:all");
        assert_eq!(generate_cache_key::home(), "home");
        assert_eq!(generate_cache_key::pagination(None, None), "pagination:all:10");
        assert_eq!(
            generate_cache_key::pagination(Some("svelte"), Some(20)),
            "pagination:svelte:20"
        );
    }

    #[test]
    fn test_cache_tags_vocabulary() {
        assert_eq!(CACHE_TAGS::POSTS, "posts");
        assert_eq!(CACHE_TAGS::TAGS, "tags");
        assert_eq!(CACHE_TAGS::HOME, "home");
        assert_eq!(CACHE_TAGS::PAGINATION, "pagination");
        assert_eq!(CACHE_TAGS::ALL.len(), 4);
    }
}
