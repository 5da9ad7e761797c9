//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{CacheManager, ManagerStats};
use crate::error::{ApiError, Result};
use crate::models::{
    validate_key, CleanupResponse, ClearResponse, DeleteResponse, ExistsResponse, GetResponse,
    HealthResponse, InvalidateRequest, InvalidateResponse, SetRequest, SetResponse, TagEntry,
    TagsResponse,
};

/// Application state shared across all handlers.
///
/// The manager is injected here rather than living in a global, so tests and
/// embedders can run independent caches side by side.
#[derive(Clone)]
pub struct AppState {
    /// Shared tag-aware cache
    pub cache: Arc<RwLock<CacheManager>>,
}

impl AppState {
    /// Creates a new AppState around the given manager.
    pub fn new(cache: CacheManager) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(CacheManager::new(config.default_ttl))
    }
}

/// Handler for PUT /cache
///
/// Stores a value under a key and indexes it under the given tags.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state
        .cache
        .write()
        .await
        .set(req.key.as_str(), req.value, req.tags.as_slice(), req.ttl);

    Ok(Json(SetResponse::new(req.key, req.tags)))
}

/// Handler for GET /cache/:key
///
/// Returns 404 on a miss so callers can fall back to recomputing.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    // Write lock: an expired entry is evicted on read
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /cache/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ExistsResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let exists = state.cache.write().await.has(&key);
    Ok(Json(ExistsResponse { key, exists }))
}

/// Handler for DELETE /cache/:key
///
/// Removes the key and scrubs it from the tag index.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let deleted = state.cache.write().await.delete(&key);
    Ok(Json(DeleteResponse { key, deleted }))
}

/// Handler for POST /invalidate
///
/// Entry point for content-mutation hooks: drops every entry under the tags.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let invalidated = state.cache.write().await.invalidate_by_tags(req.tags.as_slice());
    info!(
        "Invalidated {} entries for tags {:?}",
        invalidated, req.tags
    );

    Ok(Json(InvalidateResponse {
        tags: req.tags,
        invalidated,
    }))
}

/// Handler for POST /cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    let removed = state.cache.write().await.cleanup();
    Json(CleanupResponse { removed })
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.write().await.clear();
    Json(ClearResponse::cleared())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<ManagerStats> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for GET /tags
///
/// Dumps the tag index, which may still list keys that silently expired.
pub async fn tags_handler(State(state): State<AppState>) -> Json<TagsResponse> {
    let cache = state.cache.read().await;
    let tags = cache
        .tags()
        .into_iter()
        .map(|tag| TagEntry {
            tag: tag.to_string(),
            keys: cache
                .keys_for_tag(tag)
                .into_iter()
                .map(String::from)
                .collect(),
        })
        .collect();

    Json(TagsResponse { tags })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_KEY_LENGTH;
    use serde_json::{json, Value};

    fn test_state() -> AppState {
        AppState::new(CacheManager::new(300))
    }

    fn set_req(key: &str, value: Value, tags: &[&str]) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ttl: None,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = set_req("post:hello", json!({"title": "Hello"}), &["posts"]);
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state.clone()), Path("post:hello".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"title": "Hello"}));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_exists_handler() {
        let state = test_state();
        set_handler(State(state.clone()), Json(set_req("k", json!(1), &[])))
            .await
            .unwrap();

        let response = exists_handler(State(state.clone()), Path("k".to_string()))
            .await
            .unwrap();
        assert!(response.exists);

        let response = exists_handler(State(state), Path("other".to_string()))
            .await
            .unwrap();
        assert!(!response.exists);
    }

    #[tokio::test]
    async fn test_read_handlers_reject_oversized_key() {
        let state = test_state();
        let long_key = "k".repeat(MAX_KEY_LENGTH + 1);

        let result = get_handler(State(state.clone()), Path(long_key.clone())).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));

        let result = exists_handler(State(state.clone()), Path(long_key.clone())).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));

        let result = delete_handler(State(state), Path(long_key)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_read_handlers_accept_max_length_key() {
        let state = test_state();
        let key = "k".repeat(MAX_KEY_LENGTH);
        set_handler(State(state.clone()), Json(set_req(&key, json!(1), &[])))
            .await
            .unwrap();

        let response = exists_handler(State(state.clone()), Path(key.clone()))
            .await
            .unwrap();
        assert!(response.exists);
        assert!(get_handler(State(state), Path(key)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();
        set_handler(State(state.clone()), Json(set_req("k", json!(1), &["t"])))
            .await
            .unwrap();

        let response = delete_handler(State(state.clone()), Path("k".to_string()))
            .await
            .unwrap();
        assert!(response.deleted);

        let response = delete_handler(State(state.clone()), Path("k".to_string()))
            .await
            .unwrap();
        assert!(!response.deleted);

        assert_eq!(stats_handler(State(state)).await.tag_count, 0);
    }

    #[tokio::test]
    async fn test_invalidate_handler() {
        let state = test_state();
        for (key, tag) in [("a", "t"), ("b", "t"), ("c", "u")] {
            set_handler(State(state.clone()), Json(set_req(key, json!(key), &[tag])))
                .await
                .unwrap();
        }

        let req = InvalidateRequest {
            tags: vec!["t".to_string()],
        };
        let response = invalidate_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(response.invalidated, 2);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.cache_size, 1);
        assert_eq!(stats.tag_count, 1);
    }

    #[tokio::test]
    async fn test_invalidate_requires_tags() {
        let state = test_state();

        let req = InvalidateRequest { tags: vec![] };
        let result = invalidate_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_cleanup_and_clear_handlers() {
        let state = test_state();
        let mut req = set_req("expired", json!(1), &["t"]);
        req.ttl = Some(-1);
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let response = cleanup_handler(State(state.clone())).await;
        assert_eq!(response.removed, 1);

        set_handler(State(state.clone()), Json(set_req("k", json!(1), &["t"])))
            .await
            .unwrap();
        clear_handler(State(state.clone())).await;

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.cache_size, 0);
        assert_eq!(stats.tag_count, 0);
    }

    #[tokio::test]
    async fn test_tags_handler() {
        let state = test_state();
        set_handler(
            State(state.clone()),
            Json(set_req("posts:all:1:10", json!([]), &["posts", "home"])),
        )
        .await
        .unwrap();

        let response = tags_handler(State(state)).await;
        let tags: Vec<&str> = response.tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["home", "posts"]);
        assert_eq!(response.tags[0].keys, vec!["posts:all:1:10".to_string()]);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let result = set_handler(State(state), Json(set_req("", json!(1), &[]))).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
