//! Project types and project parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};
use crate::task::Priority;
use crate::workspace::Status;

/// A Motion project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Description (HTML or Markdown).
    #[serde(default)]
    pub description: Option<String>,
    /// Owning workspace.
    #[serde(default)]
    pub workspace_id: Option<String>,
    /// Current status.
    #[serde(default)]
    pub status: Option<Status>,
    /// When the project was created.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    /// When the project was last updated.
    #[serde(default)]
    pub updated_time: Option<DateTime<Utc>>,
    /// Custom field values keyed by field name.
    #[serde(default)]
    pub custom_field_values: Option<Map<String, Value>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for `POST /projects`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreate {
    /// Project name.
    pub name: String,
    /// Workspace to create the project in.
    pub workspace_id: String,
    /// Description (HTML or Markdown).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial status; must exist in the workspace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// ISO 8601 due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Labels to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Custom field values as key-value pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field_values: Option<Map<String, Value>>,
}

impl ProjectCreate {
    /// Creates parameters with only the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, workspace_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workspace_id: workspace_id.into(),
            ..Default::default()
        }
    }

    /// Checks the fields the API requires.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingField`] if `name` or `workspaceId`
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        ProtocolError::require("name", &self.name)?;
        ProtocolError::require("workspaceId", &self.workspace_id)?;
        Ok(())
    }
}

/// Parameters for `PATCH /projects/{id}`. Only set fields are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_deserializes_api_payload() {
        let json = r#"{
            "id": "proj_1",
            "name": "Launch",
            "description": "<p>Q3 launch</p>",
            "workspaceId": "ws_1",
            "status": {"name": "Active"},
            "createdTime": "2024-01-15T10:30:00Z",
            "customFieldValues": {"Budget": {"type": "number", "value": 12}}
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.workspace_id.as_deref(), Some("ws_1"));
        assert_eq!(project.status.map(|s| s.name), Some("Active".to_string()));
        assert!(project.custom_field_values.unwrap().contains_key("Budget"));
    }

    #[test]
    fn project_create_validation_and_wire_form() {
        let params = ProjectCreate {
            description: Some("Docs".to_string()),
            ..ProjectCreate::new("Website", "ws_1")
        };
        assert!(params.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"name": "Website", "workspaceId": "ws_1", "description": "Docs"})
        );

        assert!(ProjectCreate::new("", "ws_1").validate().is_err());
    }
}
