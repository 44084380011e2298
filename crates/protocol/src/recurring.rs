//! Recurring task templates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};
use crate::project::Project;
use crate::task::{DeadlineType, Priority, TaskDuration};
use crate::user::User;
use crate::workspace::{Label, Status, Workspace};

/// A recurring task template. Motion generates concrete tasks from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTask {
    /// Unique template identifier.
    pub id: String,
    /// Name given to generated tasks.
    pub name: String,
    /// Description given to generated tasks.
    #[serde(default)]
    pub description: Option<String>,
    /// Who created the template.
    #[serde(default)]
    pub creator: Option<User>,
    /// Who generated tasks are assigned to.
    #[serde(default)]
    pub assignee: Option<User>,
    /// Project generated tasks belong to.
    #[serde(default)]
    pub project: Option<Project>,
    /// Owning workspace.
    #[serde(default)]
    pub workspace: Option<Workspace>,
    /// Status of the template.
    #[serde(default)]
    pub status: Option<Status>,
    /// Priority of generated tasks.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Labels of generated tasks.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for `POST /recurring-tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTaskCreate {
    /// Name given to generated tasks.
    pub name: String,
    /// Workspace to create the template in.
    pub workspace_id: String,
    /// Recurrence frequency (e.g. `DAILY`, `WEEKLY_MONDAY`, `MONTHLY_LAST`).
    pub frequency: String,
    /// User generated tasks are assigned to.
    pub assignee_id: String,
    /// Custom recurrence rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    /// Duration of generated tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TaskDuration>,
    /// Description of generated tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Project generated tasks belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Deadline enforcement (`HARD` or `SOFT`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_type: Option<DeadlineType>,
    /// ISO 8601 date when generation starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_on: Option<String>,
    /// Preferred time of day (`HH:mm`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_time: Option<String>,
    /// Schedule name (default `"Work Hours"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Priority (`HIGH` or `MEDIUM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Label names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl RecurringTaskCreate {
    /// Checks the required fields and the restricted enum values.
    ///
    /// Recurring tasks only accept `HARD`/`SOFT` deadlines and
    /// `HIGH`/`MEDIUM` priorities.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        ProtocolError::require("name", &self.name)?;
        ProtocolError::require("workspaceId", &self.workspace_id)?;
        ProtocolError::require("frequency", &self.frequency)?;
        ProtocolError::require("assigneeId", &self.assignee_id)?;

        if self.deadline_type == Some(DeadlineType::None) {
            return Err(ProtocolError::InvalidField {
                field: "deadlineType",
                reason: "must be HARD or SOFT".to_string(),
            });
        }
        if matches!(self.priority, Some(Priority::Asap | Priority::Low)) {
            return Err(ProtocolError::InvalidField {
                field: "priority",
                reason: "must be HIGH or MEDIUM".to_string(),
            });
        }
        if let Some(time) = &self.ideal_time {
            if chrono::NaiveTime::parse_from_str(time, "%H:%M").is_err() {
                return Err(ProtocolError::InvalidField {
                    field: "idealTime",
                    reason: format!("expected HH:mm, got \"{time}\""),
                });
            }
        }
        Ok(())
    }
}

/// Parameters for `PATCH /recurring-tasks/{id}`. Only set fields are sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTaskUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New frequency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// New assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}
