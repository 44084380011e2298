//! Task comment types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};
use crate::user::User;

/// A comment on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier.
    pub id: String,
    /// The task this comment belongs to.
    #[serde(default)]
    pub task_id: Option<String>,
    /// Comment body (GitHub Flavored Markdown).
    #[serde(default)]
    pub content: String,
    /// Author of the comment.
    #[serde(default)]
    pub creator: Option<User>,
    /// When the comment was posted.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    /// When the comment was last edited.
    #[serde(default)]
    pub updated_time: Option<DateTime<Utc>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for `POST /comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreate {
    /// Task to comment on.
    pub task_id: String,
    /// Comment body.
    pub content: String,
}

impl CommentCreate {
    /// Creates comment parameters.
    #[must_use]
    pub fn new(task_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            content: content.into(),
        }
    }

    /// Checks that both fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingField`] if either field is empty.
    pub fn validate(&self) -> Result<()> {
        ProtocolError::require("taskId", &self.task_id)?;
        ProtocolError::require("content", &self.content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_deserializes_api_payload() {
        let json = r#"{
            "id": "c_1",
            "taskId": "t_1",
            "content": "Looks good",
            "creator": {"id": "u_1", "name": "Ada", "email": "ada@example.com"},
            "createdTime": "2024-02-01T08:00:00Z"
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.task_id.as_deref(), Some("t_1"));
        assert_eq!(comment.creator.unwrap().display_name(), "Ada");
        assert!(comment.updated_time.is_none());
    }

    #[test]
    fn comment_create_validation() {
        assert!(CommentCreate::new("t_1", "hi").validate().is_ok());
        assert!(CommentCreate::new("t_1", "").validate().is_err());
        assert!(CommentCreate::new("", "hi").validate().is_err());
    }
}
