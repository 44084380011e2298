//! User endpoints.

use motion_protocol::{Page, User};
use serde::Deserialize;
use tracing::instrument;

use super::{Query, segment};
use crate::client::MotionClient;
use crate::error::Result;

/// Filters for `GET /users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListOptions {
    /// Only members of this workspace.
    #[serde(default)]
    pub workspace_id: Option<String>,
    /// Only members of this team.
    #[serde(default)]
    pub team_id: Option<String>,
    /// Cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl UserListOptions {
    /// Query parameters for these filters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        Query::default()
            .opt("workspaceId", self.workspace_id.as_deref())
            .opt("teamId", self.team_id.as_deref())
            .opt("cursor", self.cursor.as_deref())
            .build()
    }
}

impl MotionClient {
    /// Fetches the user owning the API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<User> {
        self.get("/users/me").await
    }

    /// Fetches one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.get(&format!("/users/{}", segment(user_id))).await
    }

    /// Lists users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_users(&self, options: &UserListOptions) -> Result<Page<User>> {
        self.list("/users", options.to_query(), "users").await
    }
}
