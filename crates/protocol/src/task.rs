//! Task types and task parameters.
//!
//! This module defines the Motion task resource as returned by the API, the
//! small enums used in its fields, and the parameter structs accepted by the
//! create and update endpoints.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};
use crate::project::Project;
use crate::user::User;
use crate::workspace::{Label, Status, Workspace};

/// Task priority.
///
/// # Examples
///
/// ```
/// use motion_protocol::Priority;
///
/// assert_eq!(serde_json::to_string(&Priority::Asap).unwrap(), "\"ASAP\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Scheduled ahead of everything else.
    Asap,
    /// High priority.
    High,
    /// Medium priority (the API default).
    Medium,
    /// Low priority.
    Low,
}

/// How strictly a task's due date is enforced by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeadlineType {
    /// The task must finish before its due date.
    Hard,
    /// The due date is a target.
    Soft,
    /// The task has no deadline.
    None,
}

/// How long a task takes.
///
/// The API encodes this either as one of the strings `"NONE"` and
/// `"REMINDER"`, or as a number of minutes.
///
/// # Examples
///
/// ```
/// use motion_protocol::TaskDuration;
///
/// let d: TaskDuration = serde_json::from_str("45").unwrap();
/// assert_eq!(d, TaskDuration::Minutes(45));
///
/// let d: TaskDuration = serde_json::from_str("\"REMINDER\"").unwrap();
/// assert_eq!(d, TaskDuration::Reminder);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskDuration {
    /// The task takes no time on the calendar.
    None,
    /// The task is a reminder only.
    Reminder,
    /// The task takes this many minutes.
    Minutes(u32),
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("NONE"),
            Self::Reminder => f.write_str("REMINDER"),
            Self::Minutes(m) => write!(f, "{m}"),
        }
    }
}

impl std::str::FromStr for TaskDuration {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "NONE" => Ok(Self::None),
            "REMINDER" => Ok(Self::Reminder),
            other => other
                .parse::<u32>()
                .map(Self::Minutes)
                .map_err(|_| ProtocolError::InvalidField {
                    field: "duration",
                    reason: format!("expected \"NONE\", \"REMINDER\" or minutes, got \"{other}\""),
                }),
        }
    }
}

impl Serialize for TaskDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Minutes(m) => serializer.serialize_u32(*m),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for TaskDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Minutes(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Minutes(m) => Ok(Self::Minutes(m)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Auto-scheduling settings for a new or updated task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScheduled {
    /// ISO 8601 date the scheduler may start placing the task.
    pub start_date: String,
    /// Deadline enforcement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_type: Option<DeadlineType>,
    /// Name of the schedule to place the task on (e.g. `"Work Hours"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// A Motion task, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Task title.
    pub name: String,
    /// Description (GitHub Flavored Markdown or HTML).
    #[serde(default)]
    pub description: Option<String>,
    /// How long the task takes.
    #[serde(default)]
    pub duration: Option<TaskDuration>,
    /// When the task is due.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Deadline enforcement.
    #[serde(default)]
    pub deadline_type: Option<DeadlineType>,
    /// The recurring template that generated this task, if any.
    #[serde(default)]
    pub parent_recurring_task_id: Option<String>,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// When the task was completed.
    #[serde(default)]
    pub completed_time: Option<DateTime<Utc>>,
    /// Who created the task.
    #[serde(default)]
    pub creator: Option<User>,
    /// The project the task belongs to.
    #[serde(default)]
    pub project: Option<Project>,
    /// The workspace the task belongs to.
    #[serde(default)]
    pub workspace: Option<Workspace>,
    /// Current status.
    #[serde(default)]
    pub status: Option<Status>,
    /// Priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Attached labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Assigned users.
    #[serde(default)]
    pub assignees: Vec<User>,
    /// Start of the scheduled block.
    #[serde(default)]
    pub scheduled_start: Option<DateTime<Utc>>,
    /// End of the scheduled block.
    #[serde(default)]
    pub scheduled_end: Option<DateTime<Utc>>,
    /// Whether the scheduler could not place the task.
    #[serde(default)]
    pub scheduling_issue: Option<bool>,
    /// When the task was created.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    /// When the task was last updated.
    #[serde(default)]
    pub updated_time: Option<DateTime<Utc>>,
    /// Fields not modelled above (chunks, custom field values, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Returns `true` if the task is completed or sits in a resolved status.
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_protocol::Task;
    ///
    /// let task: Task = serde_json::from_str(r#"{"id": "t", "name": "n", "completed": true}"#).unwrap();
    /// assert!(task.is_done());
    /// ```
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.completed || self.status.as_ref().is_some_and(Status::is_resolved)
    }
}

/// Parameters for `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    /// Task title.
    pub name: String,
    /// Workspace to create the task in.
    pub workspace_id: String,
    /// ISO 8601 due date. Required by the API for scheduled tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// How long the task takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TaskDuration>,
    /// Initial status. Defaults to the workspace default status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Auto-scheduling settings. `Some(None)` sends `null` to disable.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::nullable"
    )]
    pub auto_scheduled: Option<Option<AutoScheduled>>,
    /// Project to associate the task with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Description (GitHub Flavored Markdown).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Label names to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// User to assign the task to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

impl TaskCreate {
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

/// Parameters for `PATCH /tasks/{id}`. Only set fields are sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New ISO 8601 due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// New duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TaskDuration>,
    /// New status name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Mark as completed or uncompleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// New assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Replacement label names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Auto-scheduling settings. `Some(None)` sends `null` to disable.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::nullable"
    )]
    pub auto_scheduled: Option<Option<AutoScheduled>>,
}

impl TaskUpdate {
    /// Update that only flips the completion flag.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Returns `true` if no field would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
