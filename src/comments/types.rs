//! Comment records and their display form.

use crate::hierarchy::HierarchyNode;
use crate::serde_helpers::{key_as_string, optional_key_as_string, timestamp_millis};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A comment row as stored, e.g. on an article or announcement.
///
/// Only `id`, `parent_id` and `created_at` drive threading. Every other column
/// (author, body, reactions, ...) is kept in `payload` and passed through as is.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Unique identifier.
    #[serde(deserialize_with = "key_as_string")]
    pub id: String,
    /// Comment being replied to; `None` for a root comment.
    #[serde(default, deserialize_with = "optional_key_as_string")]
    pub parent_id: Option<String>,
    /// Creation timestamp in milliseconds since Unix epoch.
    ///
    /// Read from either integer milliseconds or an RFC 3339 `timestamptz`
    /// string; always written back as milliseconds.
    #[serde(deserialize_with = "timestamp_millis")]
    pub created_at: u64,
    /// Remaining columns, untouched.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl fmt::Debug for CommentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentRecord")
            .field("id", &self.id)
            .field("parent_id", &self.parent_id)
            .field("created_at", &self.created_at)
            .field("payload_fields", &self.payload.len())
            .finish()
    }
}

impl CommentRecord {
    /// Creates a comment without payload.
    pub fn new(id: impl Into<String>, parent_id: Option<&str>, created_at: u64) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            created_at,
            payload: Map::new(),
        }
    }

    /// Adds a passthrough payload field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Returns true if this comment starts a thread.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl HierarchyNode for CommentRecord {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

/// A comment ready for rendering.
///
/// Root comments carry every reply of their thread in `replies`, flattened and
/// in chronological order. Replies carry `replying_to_id` (the comment they
/// answer, for "@mention" rendering) and never have replies of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayComment {
    #[serde(flatten)]
    pub comment: CommentRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replying_to_id: Option<String>,
    #[serde(default)]
    pub replies: Vec<DisplayComment>,
}

impl DisplayComment {
    /// Returns the comment id.
    pub fn id(&self) -> &str {
        &self.comment.id
    }

    /// Returns the creation timestamp in milliseconds.
    pub fn created_at(&self) -> u64 {
        self.comment.created_at
    }
}

/// Where the UI should scroll to reveal a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollTarget {
    /// The comment to reveal.
    pub comment_id: String,
    /// The root comment of its thread (equal to `comment_id` for roots).
    pub root_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_passthrough() {
        let json = r#"{
            "id": "c1",
            "parent_id": null,
            "created_at": 1700000000000,
            "author": "Dana",
            "body": "Welcome to the new wiki"
        }"#;
        let comment: CommentRecord = serde_json::from_str(json).unwrap();

        assert!(comment.is_root());
        assert_eq!(comment.payload.len(), 2);
        assert_eq!(comment.payload["author"], "Dana");

        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["body"], "Welcome to the new wiki");
    }

    #[test]
    fn test_created_at_accepts_rfc3339_and_millis() {
        let json = r#"[
            {"id": "a", "parent_id": null, "created_at": "2024-05-01T10:00:00+00:00"},
            {"id": "b", "parent_id": "a", "created_at": 1714557599000},
            {"id": "c", "parent_id": "a", "created_at": "2024-05-01T12:00:01+02:00"}
        ]"#;
        let mut comments: Vec<CommentRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(comments[0].created_at, 1_714_557_600_000);
        assert_eq!(comments[2].created_at, 1_714_557_601_000);

        comments.sort_by_key(|c| c.created_at);
        let order: Vec<&str> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);

        let value = serde_json::to_value(&comments[1]).unwrap();
        assert_eq!(value["created_at"], 1_714_557_600_000u64);
    }

    #[test]
    fn test_rejects_malformed_created_at() {
        let json = r#"{"id": "a", "created_at": "last tuesday"}"#;
        assert!(serde_json::from_str::<CommentRecord>(json).is_err());
    }

    #[test]
    fn test_integer_comment_keys() {
        let json = r#"{"id": 12, "parent_id": 3, "created_at": 5}"#;
        let comment: CommentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(comment.id, "12");
        assert_eq!(comment.parent_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_display_comment_serialization() {
        let reply = DisplayComment {
            comment: CommentRecord::new("c2", Some("c1"), 2).with_field("body", "+1"),
            replying_to_id: Some("c1".to_string()),
            replies: Vec::new(),
        };
        let value = serde_json::to_value(&reply).unwrap();

        assert_eq!(value["id"], "c2");
        assert_eq!(value["body"], "+1");
        assert_eq!(value["replying_to_id"], "c1");
        assert!(value["replies"].as_array().unwrap().is_empty());
    }
}
