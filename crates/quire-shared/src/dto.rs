//! Data Transfer Objects - request/response types for the posts API.
//!
//! Unknown fields in request bodies are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /posts`. Required fields are checked by the domain layer so
/// that a missing title and an empty one produce the same message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Body of `PUT /posts/{id}`. The outer `Option` is "was the key present",
/// the inner one is "was it null".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub content: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Query string of `GET /posts`. `search` is accepted as an alias of `term`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, alias = "search")]
    pub term: Option<String>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let req: UpdatePostRequest =
            serde_json::from_value(json!({"category": null, "title": "Hi"})).unwrap();

        assert_eq!(req.title, Some(Some("Hi".to_string())));
        assert_eq!(req.category, Some(None));
        assert_eq!(req.content, None);
        assert_eq!(req.tags, None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let req: CreatePostRequest =
            serde_json::from_value(json!({"title": "a", "content": "b", "author": "x"})).unwrap();
        assert_eq!(req.title.as_deref(), Some("a"));
        assert_eq!(req.tags, None);
    }

    #[test]
    fn test_wrong_field_type_is_an_error() {
        let res = serde_json::from_value::<CreatePostRequest>(json!({"title": 5}));
        assert!(res.is_err());
    }

    #[test]
    fn test_post_response_uses_camel_case() {
        let at = DateTime::parse_from_rfc3339("2025-04-29T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let body = serde_json::to_value(PostResponse {
            id: 1,
            title: "Hello".to_string(),
            content: "World".to_string(),
            category: None,
            tags: vec![],
            created_at: at,
            updated_at: at,
        })
        .unwrap();

        assert_eq!(body["category"], json!(null));
        assert_eq!(body["tags"], json!([]));
        assert_eq!(body["createdAt"], json!("2025-04-29T10:00:00Z"));
        assert!(body.get("created_at").is_none());
    }
}
