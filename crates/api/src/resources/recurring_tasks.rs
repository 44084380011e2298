//! Recurring task endpoints.

use motion_protocol::{Page, RecurringTask, RecurringTaskCreate, RecurringTaskUpdate};
use serde::Deserialize;
use tracing::instrument;

use super::{Query, segment};
use crate::client::MotionClient;
use crate::error::Result;

/// Filters for `GET /recurring-tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTaskListOptions {
    /// Only templates in this workspace.
    #[serde(default)]
    pub workspace_id: Option<String>,
    /// Cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl RecurringTaskListOptions {
    /// Query parameters for these filters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        Query::default()
            .opt("workspaceId", self.workspace_id.as_deref())
            .opt("cursor", self.cursor.as_deref())
            .build()
    }
}

impl MotionClient {
    /// Lists recurring task templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_recurring_tasks(
        &self,
        options: &RecurringTaskListOptions,
    ) -> Result<Page<RecurringTask>> {
        self.list("/recurring-tasks", options.to_query(), "tasks")
            .await
    }

    /// Creates a recurring task template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_recurring_task(&self, params: &RecurringTaskCreate) -> Result<RecurringTask> {
        self.post("/recurring-tasks", params).await
    }

    /// Fetches one recurring task template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_recurring_task(&self, recurring_task_id: &str) -> Result<RecurringTask> {
        self.get(&format!("/recurring-tasks/{}", segment(recurring_task_id)))
            .await
    }

    /// Updates the fields set in `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, params))]
    pub async fn update_recurring_task(
        &self,
        recurring_task_id: &str,
        params: &RecurringTaskUpdate,
    ) -> Result<RecurringTask> {
        self.patch(
            &format!("/recurring-tasks/{}", segment(recurring_task_id)),
            params,
        )
        .await
    }

    /// Deletes a recurring task template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_recurring_task(&self, recurring_task_id: &str) -> Result<()> {
        self.delete(&format!("/recurring-tasks/{}", segment(recurring_task_id)))
            .await
    }
}
