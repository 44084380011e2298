//! Project endpoints.

use motion_protocol::{Page, Project, ProjectCreate, ProjectUpdate};
use serde::Deserialize;
use tracing::instrument;

use super::{Query, segment};
use crate::client::MotionClient;
use crate::error::Result;

/// Filters for `GET /projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListOptions {
    /// Only projects in this workspace.
    #[serde(default)]
    pub workspace_id: Option<String>,
    /// Cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl ProjectListOptions {
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
    /// Lists projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_projects(&self, options: &ProjectListOptions) -> Result<Page<Project>> {
        self.list("/projects", options.to_query(), "projects").await
    }

    /// Fetches one project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.get(&format!("/projects/{}", segment(project_id)))
            .await
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_project(&self, params: &ProjectCreate) -> Result<Project> {
        self.post("/projects", params).await
    }

    /// Updates the fields set in `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, params))]
    pub async fn update_project(&self, project_id: &str, params: &ProjectUpdate) -> Result<Project> {
        self.patch(&format!("/projects/{}", segment(project_id)), params)
            .await
    }

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        self.delete(&format!("/projects/{}", segment(project_id)))
            .await
    }
}
