//! Task endpoints.

use motion_protocol::{Page, Task, TaskCreate, TaskUpdate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Query, segment};
use crate::client::MotionClient;
use crate::error::Result;

/// Filters for `GET /tasks`.
///
/// Deserializes from the same camelCase names the API uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListOptions {
    /// Only tasks assigned to this user.
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Include tasks in every status, resolved ones too.
    #[serde(default)]
    pub include_all_statuses: Option<bool>,
    /// Only tasks carrying this label.
    #[serde(default)]
    pub label: Option<String>,
    /// Only tasks whose name contains this text.
    #[serde(default)]
    pub name: Option<String>,
    /// Only tasks in this project.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Only tasks in one of these statuses.
    #[serde(default)]
    pub status: Vec<String>,
    /// Only tasks in this workspace.
    #[serde(default)]
    pub workspace_id: Option<String>,
}

impl TaskListOptions {
    /// Query parameters for these filters. Statuses repeat the `status` key.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        Query::default()
            .opt("assigneeId", self.assignee_id.as_deref())
            .opt("cursor", self.cursor.as_deref())
            .opt("includeAllStatuses", self.include_all_statuses)
            .opt("label", self.label.as_deref())
            .opt("name", self.name.as_deref())
            .opt("projectId", self.project_id.as_deref())
            .each("status", &self.status)
            .opt("workspaceId", self.workspace_id.as_deref())
            .build()
    }
}

/// Body of `PATCH /tasks/{id}/move`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMove {
    /// Destination workspace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// Destination project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl MotionClient {
    /// Lists tasks matching `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, options: &TaskListOptions) -> Result<Page<Task>> {
        self.list("/tasks", options.to_query(), "tasks").await
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.get(&format!("/tasks/{}", segment(task_id))).await
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_task(&self, params: &TaskCreate) -> Result<Task> {
        self.post("/tasks", params).await
    }

    /// Updates the fields set in `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, params))]
    pub async fn update_task(&self, task_id: &str, params: &TaskUpdate) -> Result<Task> {
        self.patch(&format!("/tasks/{}", segment(task_id)), params)
            .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.delete(&format!("/tasks/{}", segment(task_id))).await
    }

    /// Moves a task to another workspace or project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn move_task(&self, task_id: &str, target: &TaskMove) -> Result<Task> {
        self.patch(&format!("/tasks/{}/move", segment(task_id)), target)
            .await
    }

    /// Removes the assignee of a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn unassign_task(&self, task_id: &str) -> Result<()> {
        self.delete(&format!("/tasks/{}/assignee", segment(task_id)))
            .await
    }

    /// Marks a task completed or not completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn set_task_completed(&self, task_id: &str, completed: bool) -> Result<Task> {
        self.update_task(task_id, &TaskUpdate::completed(completed))
            .await
    }
}

