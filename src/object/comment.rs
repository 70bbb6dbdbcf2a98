//! Threaded comments on objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{Checker, ValidationResult};

/// A remark on an object, optionally threaded under a parent comment.
///
/// Threading forms a forest: a parent must belong to the same object and
/// have been created earlier, which the persistence collaborator enforces
/// when resolving parentId.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub object_id: String,
    pub user_id: String,
    pub content: String,
    /// Required but nullable: top-level comments carry null.
    pub parent_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Comment {
    /// Validates untyped input into a full comment record.
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let comment = Self {
            id: c.require_str("id"),
            object_id: c.require_str("objectId"),
            user_id: c.require_str("userId"),
            content: c.require_str("content"),
            parent_id: c.nullable_str("parentId"),
            created_at: c.require_datetime("createdAt"),
            updated_at: c.require_datetime("updatedAt"),
        };
        c.finish()?;
        Ok(comment)
    }
}

/// Creation payload: id, createdAt, and updatedAt are server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub object_id: String,
    pub user_id: String,
    pub content: String,
    pub parent_id: Option<String>,
}

impl CreateComment {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let create = Self {
            object_id: c.require_str("objectId"),
            user_id: c.require_str("userId"),
            content: c.require_str("content"),
            parent_id: c.nullable_str("parentId"),
        };
        c.finish()?;
        Ok(create)
    }
}

/// Edit payload: only the content may change; authorship and threading
/// are immutable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateComment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdateComment {
    pub fn parse(value: &Value) -> ValidationResult<Self> {
        let mut c = Checker::root(value)?;
        let update = Self {
            content: c.optional_str("content"),
        };
        c.finish()?;
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_comment() {
        let comment = Comment::parse(&json!({
            "id": "c1",
            "objectId": "o1",
            "userId": "u1",
            "content": "Ship it",
            "parentId": null,
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(comment.parent_id, None);
    }

    #[test]
    fn test_threaded_comment() {
        let comment = Comment::parse(&json!({
            "id": "c2",
            "objectId": "o1",
            "userId": "u2",
            "content": "Agreed",
            "parentId": "c1",
            "createdAt": "2024-03-01T12:05:00Z",
            "updatedAt": "2024-03-01T12:05:00Z"
        }))
        .unwrap();
        assert_eq!(comment.parent_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_missing_parent_id_rejected() {
        let err = Comment::parse(&json!({
            "id": "c1",
            "objectId": "o1",
            "userId": "u1",
            "content": "Ship it",
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap_err();
        assert!(err.violations().iter().any(|v| v.path == "parentId"));
    }

    #[test]
    fn test_create_comment_rejects_id() {
        let err = CreateComment::parse(&json!({
            "id": "c1",
            "objectId": "o1",
            "userId": "u1",
            "content": "Ship it",
            "parentId": null
        }))
        .unwrap_err();
        assert!(err.violations().iter().any(|v| v.path == "id"));
    }

    #[test]
    fn test_update_comment_content_only() {
        let update = UpdateComment::parse(&json!({ "content": "Edited" })).unwrap();
        assert_eq!(update.content.as_deref(), Some("Edited"));
        assert!(UpdateComment::parse(&json!({})).unwrap().is_empty());
        assert!(UpdateComment::parse(&json!({ "userId": "u2" })).is_err());
    }
}
