//! Recurring task tools.

use motion_api::RecurringTaskListOptions;
use motion_protocol::RecurringTaskCreate;
use serde_json::{Value, json};

use super::{
    MotionTools, ToolResult, duration_schema, id_arg, id_schema, page_reply, parse,
    priority_schema, require, success, to_json,
};
use crate::protocol::ToolDefinition;

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "motion_list_recurring_tasks",
            "List all recurring tasks for a specific workspace. Supports pagination via cursor.",
            json!({
                "type": "object",
                "properties": {
                    "workspaceId": { "type": "string", "description": "Workspace ID (required)" },
                    "cursor": { "type": "string", "description": "Pagination cursor from previous response" },
                },
                "required": ["workspaceId"],
            }),
        ),
        ToolDefinition::new(
            "motion_create_recurring_task",
            "Create a new recurring task template that will generate tasks automatically",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Recurring task name" },
                    "workspaceId": { "type": "string", "description": "Workspace ID" },
                    "frequency": {
                        "type": "string",
                        "description": "Recurrence frequency (e.g., DAILY, WEEKLY_MONDAY, MONTHLY_1, MONTHLY_LAST)",
                    },
                    "recurrenceRule": { "type": "string", "description": "Custom recurrence rule (optional)" },
                    "duration": duration_schema(),
                    "description": { "type": "string", "description": "Task description" },
                    "projectId": { "type": "string", "description": "Project ID to associate with" },
                    "assigneeId": { "type": "string", "description": "User ID to assign to (required)" },
                    "deadlineType": {
                        "type": "string",
                        "enum": ["HARD", "SOFT"],
                        "description": "Deadline type (default: SOFT)",
                    },
                    "startingOn": { "type": "string", "description": "ISO 8601 date when to start generating tasks" },
                    "idealTime": { "type": "string", "description": "Preferred time of day (HH:mm format)" },
                    "schedule": { "type": "string", "description": "Schedule name (default: \"Work Hours\")" },
                    "priority": priority_schema(&["HIGH", "MEDIUM"], "Task priority (default: MEDIUM)"),
                    "labels": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of label names",
                    },
                },
                "required": ["name", "workspaceId", "frequency", "assigneeId"],
            }),
        ),
        ToolDefinition::new(
            "motion_get_recurring_task",
            "Get details of a specific recurring task",
            id_schema("recurringTaskId", "Recurring task ID to retrieve"),
        ),
        ToolDefinition::new(
            "motion_delete_recurring_task",
            "Delete a recurring task permanently",
            id_schema("recurringTaskId", "Recurring task ID to delete"),
        ),
    ]
}

impl MotionTools {
    pub(super) async fn list_recurring_tasks(&self, args: Value) -> ToolResult {
        let options: RecurringTaskListOptions = parse(args)?;
        require("workspaceId", options.workspace_id.as_deref().unwrap_or_default())?;
        page_reply(
            "recurringTasks",
            self.client.list_recurring_tasks(&options).await?,
        )
    }

    pub(super) async fn create_recurring_task(&self, args: Value) -> ToolResult {
        let params: RecurringTaskCreate = parse(args)?;
        params.validate()?;
        to_json(self.client.create_recurring_task(&params).await?)
    }

    pub(super) async fn get_recurring_task(&self, args: Value) -> ToolResult {
        let id = id_arg(&args, "recurringTaskId")?;
        to_json(self.client.get_recurring_task(&id).await?)
    }

    pub(super) async fn delete_recurring_task(&self, args: Value) -> ToolResult {
        let id = id_arg(&args, "recurringTaskId")?;
        self.client.delete_recurring_task(&id).await?;
        success(format!("Recurring task {id} deleted successfully"))
    }
}
