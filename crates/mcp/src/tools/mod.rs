//! Motion tools served over MCP.
//!
//! Each submodule covers one resource: it lists the [`ToolDefinition`]s for
//! that resource and adds the matching handlers to [`MotionTools`]. A
//! handler validates its arguments, makes one client call and shapes the
//! reply; list tools answer `{<items>, meta?, count}` and delete tools
//! answer `{success, message}`.

mod comments;
mod custom_fields;
mod projects;
mod recurring_tasks;
mod schedules;
mod statuses;
mod tasks;
mod users;
mod workspaces;

use async_trait::async_trait;
use motion_api::{FieldTarget, MotionClient};
use motion_protocol::{Page, ProtocolError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::instrument;

use crate::error::ToolError;
use crate::protocol::ToolDefinition;
use crate::server::ToolHandler;

/// Outcome of a tool handler.
pub(crate) type ToolResult = std::result::Result<Value, ToolError>;

/// The Motion tool set, backed by one shared [`MotionClient`].
///
/// Cloning is cheap; clones share the client's request queue.
#[derive(Debug, Clone)]
pub struct MotionTools {
    client: MotionClient,
}

impl MotionTools {
    /// Creates the tool set around `client`.
    #[must_use]
    pub fn new(client: MotionClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &MotionClient {
        &self.client
    }
}

/// Every tool, in the order `tools/list` reports them.
#[must_use]
pub fn definitions() -> Vec<ToolDefinition> {
    [
        workspaces::definitions(),
        tasks::definitions(),
        projects::definitions(),
        users::definitions(),
        schedules::definitions(),
        comments::definitions(),
        custom_fields::definitions(),
        recurring_tasks::definitions(),
        statuses::definitions(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[async_trait]
impl ToolHandler for MotionTools {
    fn tools(&self) -> Vec<ToolDefinition> {
        definitions()
    }

    #[instrument(skip(self, arguments))]
    async fn call(&self, name: &str, arguments: Value) -> ToolResult {
        match name {
            "motion_list_workspaces" => self.list_workspaces(arguments).await,
            "motion_get_workspace" => self.get_workspace(arguments).await,

            "motion_list_tasks" => self.list_tasks(arguments).await,
            "motion_get_task" => self.get_task(arguments).await,
            "motion_create_task" => self.create_task(arguments).await,
            "motion_update_task" => self.update_task(arguments).await,
            "motion_delete_task" => self.delete_task(arguments).await,
            "motion_move_task" => self.move_task(arguments).await,
            "motion_complete_task" => self.set_task_completed(arguments, true).await,
            "motion_uncomplete_task" => self.set_task_completed(arguments, false).await,
            "motion_unassign_task" => self.unassign_task(arguments).await,

            "motion_list_projects" => self.list_projects(arguments).await,
            "motion_get_project" => self.get_project(arguments).await,
            "motion_create_project" => self.create_project(arguments).await,

            "motion_get_current_user" => self.get_current_user().await,
            "motion_get_user" => self.get_user(arguments).await,
            "motion_list_users" => self.list_users(arguments).await,

            "motion_get_schedule" => self.get_schedule(arguments).await,

            "motion_list_comments" => self.list_comments(arguments).await,
            "motion_create_comment" => self.create_comment(arguments).await,
            "motion_get_comment" => self.get_comment(arguments).await,
            "motion_update_comment" => self.update_comment(arguments).await,
            "motion_delete_comment" => self.delete_comment(arguments).await,

            "motion_list_custom_fields" => self.list_custom_fields(arguments).await,
            "motion_create_custom_field" => self.create_custom_field(arguments).await,
            "motion_delete_custom_field" => self.delete_custom_field(arguments).await,
            "motion_add_custom_field_to_task" => {
                self.add_custom_field(arguments, FieldTarget::Task)
                    .await
            }
            "motion_add_custom_field_to_project" => {
                self.add_custom_field(arguments, FieldTarget::Project)
                    .await
            }
            "motion_remove_custom_field_from_task" => {
                self.remove_custom_field(arguments, FieldTarget::Task)
                    .await
            }
            "motion_remove_custom_field_from_project" => {
                self.remove_custom_field(arguments, FieldTarget::Project)
                    .await
            }

            "motion_list_recurring_tasks" => self.list_recurring_tasks(arguments).await,
            "motion_create_recurring_task" => self.create_recurring_task(arguments).await,
            "motion_get_recurring_task" => self.get_recurring_task(arguments).await,
            "motion_delete_recurring_task" => self.delete_recurring_task(arguments).await,

            "motion_list_statuses" => self.list_statuses(arguments).await,

            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

/// Decodes tool arguments into `T`.
pub(crate) fn parse<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    if !args.is_object() {
        return Err(ToolError::invalid("arguments must be a JSON object"));
    }
    serde_json::from_value(args).map_err(|e| ToolError::invalid(e.to_string()))
}

/// Reads a required, non-blank string argument.
pub(crate) fn id_arg(args: &Value, field: &'static str) -> Result<String, ToolError> {
    let args = args
        .as_object()
        .ok_or_else(|| ToolError::invalid("arguments must be a JSON object"))?;

    match args.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        None | Some(Value::Null | Value::String(_)) => {
            Err(ProtocolError::MissingField { field }.into())
        }
        Some(other) => Err(ToolError::invalid(format!(
            "{field} must be a string, got {other}"
        ))),
    }
}

/// Fails with a missing-field error when `value` is blank.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ProtocolError::MissingField { field }.into());
    }
    Ok(())
}

/// Encodes a tool reply.
pub(crate) fn to_json<T: Serialize>(value: T) -> ToolResult {
    serde_json::to_value(value).map_err(ToolError::Output)
}

/// Shapes a page as `{<key>: items, meta?, count}`.
pub(crate) fn page_reply<T: Serialize>(key: &str, page: Page<T>) -> ToolResult {
    let count = page.len();
    let mut reply = Map::new();
    reply.insert(key.to_string(), to_json(page.items)?);
    if let Some(meta) = page.meta {
        reply.insert("meta".to_string(), to_json(meta)?);
    }
    reply.insert("count".to_string(), count.into());
    Ok(Value::Object(reply))
}

/// Shapes a full list as `{<key>: items, count}`.
pub(crate) fn list_reply<T: Serialize>(key: &str, items: Vec<T>) -> ToolResult {
    let count = items.len();
    Ok(json!({ key: to_json(items)?, "count": count }))
}

/// The reply of tools that only acknowledge.
pub(crate) fn success(message: impl Into<String>) -> ToolResult {
    Ok(json!({ "success": true, "message": message.into() }))
}

/// Input schema of a tool taking a single required ID.
pub(crate) fn id_schema(field: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            field: { "type": "string", "description": description },
        },
        "required": [field],
    })
}

/// Input schema shared by `priority` arguments.
pub(crate) fn priority_schema(values: &[&str], description: &str) -> Value {
    json!({ "type": "string", "enum": values, "description": description })
}

/// Input schema shared by `duration` arguments.
pub(crate) fn duration_schema() -> Value {
    json!({
        "type": ["string", "number"],
        "description": "Duration: \"NONE\", \"REMINDER\", or minutes as integer",
    })
}
