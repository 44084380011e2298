//! Workspace endpoints.

use motion_protocol::{Page, Workspace};
use tracing::instrument;

use super::{Query, segment};
use crate::client::MotionClient;
use crate::error::Result;

impl MotionClient {
    /// Lists the workspaces the API key can see.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_workspaces(&self, cursor: Option<&str>) -> Result<Page<Workspace>> {
        let query = Query::default().opt("cursor", cursor).build();
        self.list("/workspaces", query, "workspaces").await
    }

    /// Fetches one workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_workspace(&self, workspace_id: &str) -> Result<Workspace> {
        self.get(&format!("/workspaces/{}", segment(workspace_id)))
            .await
    }
}
