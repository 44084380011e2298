//! Comment endpoints.

use motion_protocol::{Comment, CommentCreate, Page};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::{Query, segment};
use crate::client::MotionClient;
use crate::error::Result;

/// Filters for `GET /comments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListOptions {
    /// Task whose comments to list.
    pub task_id: String,
    /// Cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl CommentListOptions {
    /// Query parameters for these filters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        Query::default()
            .opt("taskId", Some(self.task_id.as_str()))
            .opt("cursor", self.cursor.as_deref())
            .build()
    }
}

impl MotionClient {
    /// Lists the comments of a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_comments(&self, options: &CommentListOptions) -> Result<Page<Comment>> {
        self.list("/comments", options.to_query(), "comments").await
    }

    /// Adds a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, params), fields(task_id = %params.task_id))]
    pub async fn create_comment(&self, params: &CommentCreate) -> Result<Comment> {
        self.post("/comments", params).await
    }

    /// Fetches one comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_comment(&self, comment_id: &str) -> Result<Comment> {
        self.get(&format!("/comments/{}", segment(comment_id)))
            .await
    }

    /// Replaces the content of a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, content))]
    pub async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment> {
        self.patch(
            &format!("/comments/{}", segment(comment_id)),
            &json!({ "content": content }),
        )
        .await
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.delete(&format!("/comments/{}", segment(comment_id)))
            .await
    }
}
