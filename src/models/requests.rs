//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for storing an entry (PUT /cache)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `tags`: Invalidation groups the key belongs to
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Tags to index the key under
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional TTL in seconds; zero and negative values are accepted
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(msg) = validate_key(&self.key) {
            return Some(msg);
        }
        validate_tags(&self.tags)
    }
}

/// Request body for tag invalidation (POST /invalidate)
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    /// Tags to invalidate, processed in order
    pub tags: Vec<String>,
}

impl InvalidateRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.tags.is_empty() {
            return Some("At least one tag is required".to_string());
        }
        validate_tags(&self.tags)
    }
}

/// Checks a key against the length limits.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

fn validate_tags(tags: &[String]) -> Option<String> {
    if tags.iter().any(String::is_empty) {
        return Some("Tags cannot be empty".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "post:hello", "value": {"title": "Hello"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "post:hello");
        assert_eq!(req.value, json!({"title": "Hello"}));
        assert!(req.tags.is_empty());
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_with_tags_and_ttl() {
        let json = r#"{"key": "home", "value": [1, 2], "tags": ["home", "posts"], "ttl": -1}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.tags, vec!["home", "posts"]);
        assert_eq!(req.ttl, Some(-1));
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: Value::Null,
            tags: vec![],
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_key_too_long() {
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH + 1)).is_some());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH)).is_none());
    }

    #[test]
    fn test_validate_empty_tag() {
        let req = SetRequest {
            key: "valid_key".to_string(),
            value: Value::Null,
            tags: vec!["posts".to_string(), "".to_string()],
            ttl: Some(60),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            key: "valid_key".to_string(),
            value: json!("test"),
            tags: vec!["posts".to_string()],
            ttl: Some(60),
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_invalidate_request_requires_tags() {
        let req: InvalidateRequest = serde_json::from_str(r#"{"tags": []}"#).unwrap();
        assert!(req.validate().is_some());

        let req: InvalidateRequest = serde_json::from_str(r#"{"tags": ["home"]}"#).unwrap();
        assert!(req.validate().is_none());
    }
}
