//! Status endpoints.

use motion_protocol::Status;
use tracing::instrument;

use super::{Query, segment};
use crate::client::MotionClient;
use crate::error::Result;

impl MotionClient {
    /// Lists the task statuses available in a workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_statuses(&self, workspace_id: Option<&str>) -> Result<Vec<Status>> {
        let query = Query::default().opt("workspaceId", workspace_id).build();
        let page = self.list("/statuses", query, "statuses").await?;
        Ok(page.items)
    }

    /// Fetches one status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_status(&self, status_id: &str) -> Result<Status> {
        self.get(&format!("/statuses/{}", segment(status_id))).await
    }
}
