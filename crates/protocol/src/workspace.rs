//! Workspace, status and label types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A task or project status defined by a workspace.
///
/// # Examples
///
/// ```
/// use motion_protocol::Status;
///
/// let status: Status = serde_json::from_str(
///     r#"{"name": "Completed", "isDefaultStatus": false, "isResolvedStatus": true}"#,
/// ).unwrap();
/// assert!(status.is_resolved());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Display name of the status, also used as its identifier in requests.
    pub name: String,
    /// Whether new tasks receive this status by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default_status: Option<bool>,
    /// Whether tasks in this status count as resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resolved_status: Option<bool>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Status {
    /// Returns `true` if tasks in this status are considered done.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.is_resolved_status.unwrap_or(false)
    }

    /// Returns `true` if this is the workspace's default status.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default_status.unwrap_or(false)
    }
}

/// A label that can be attached to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The label name.
    pub name: String,
}

/// A Motion workspace.
///
/// Workspaces own projects, tasks, labels and statuses. Individual
/// workspaces belong to a single user; team workspaces are shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Unique workspace identifier.
    pub id: String,
    /// Workspace display name.
    pub name: String,
    /// Owning team, if this is a team workspace.
    #[serde(default)]
    pub team_id: Option<String>,
    /// Workspace kind (`TEAM` or `INDIVIDUAL`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Labels defined in this workspace.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Statuses available to tasks in this workspace.
    #[serde(default)]
    pub task_statuses: Vec<Status>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workspace {
    /// Returns the status new tasks receive, if the workspace defines one.
    #[must_use]
    pub fn default_status(&self) -> Option<&Status> {
        self.task_statuses.iter().find(|s| s.is_default())
    }
}
