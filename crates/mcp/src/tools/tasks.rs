//! Task tools.

use motion_api::{TaskListOptions, TaskMove};
use motion_protocol::{TaskCreate, TaskUpdate};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{
    MotionTools, ToolResult, duration_schema, id_arg, id_schema, page_reply, parse,
    priority_schema, require, success, to_json,
};
use crate::error::ToolError;
use crate::protocol::ToolDefinition;

const PRIORITIES: [&str; 4] = ["ASAP", "HIGH", "MEDIUM", "LOW"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveArgs {
    task_id: String,
    #[serde(flatten)]
    target: TaskMove,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "motion_list_tasks",
            "List tasks with optional filters. Supports pagination via cursor.",
            json!({
                "type": "object",
                "properties": {
                    "assigneeId": { "type": "string", "description": "Filter by assignee ID" },
                    "cursor": { "type": "string", "description": "Pagination cursor from previous response" },
                    "includeAllStatuses": { "type": "boolean", "description": "Include all task statuses" },
                    "label": { "type": "string", "description": "Filter by label name" },
                    "name": { "type": "string", "description": "Filter by task name (case-insensitive)" },
                    "projectId": { "type": "string", "description": "Filter by project ID" },
                    "status": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Filter by specific statuses",
                    },
                    "workspaceId": { "type": "string", "description": "Filter by workspace ID" },
                },
                "required": [],
            }),
        ),
        ToolDefinition::new(
            "motion_get_task",
            "Get detailed information about a specific task",
            id_schema("taskId", "The ID of the task to retrieve"),
        ),
        ToolDefinition::new(
            "motion_create_task",
            "Create a new task in Motion",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Task title" },
                    "workspaceId": { "type": "string", "description": "Workspace ID" },
                    "dueDate": {
                        "type": "string",
                        "description": "ISO 8601 due date (required for scheduled tasks)",
                    },
                    "duration": duration_schema(),
                    "status": { "type": "string", "description": "Task status (defaults to workspace default)" },
                    "autoScheduled": {
                        "type": ["object", "null"],
                        "properties": {
                            "startDate": { "type": "string", "description": "ISO 8601 start date" },
                            "deadlineType": {
                                "type": "string",
                                "enum": ["HARD", "SOFT", "NONE"],
                                "description": "Deadline type",
                            },
                            "schedule": {
                                "type": "string",
                                "description": "Schedule name (must be \"Work Hours\" for other users)",
                            },
                        },
                        "description": "Auto-scheduling configuration (null to disable)",
                    },
                    "projectId": { "type": "string", "description": "Project ID to associate with" },
                    "description": {
                        "type": "string",
                        "description": "Task description (GitHub Flavored Markdown)",
                    },
                    "priority": priority_schema(&PRIORITIES, "Task priority"),
                    "labels": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Label names to add",
                    },
                    "assigneeId": { "type": "string", "description": "User ID to assign to" },
                },
                "required": ["name", "workspaceId"],
            }),
        ),
        ToolDefinition::new(
            "motion_update_task",
            "Update an existing task",
            json!({
                "type": "object",
                "properties": {
                    "taskId": { "type": "string", "description": "Task ID to update" },
                    "name": { "type": "string", "description": "New task title" },
                    "dueDate": { "type": "string", "description": "New due date (ISO 8601)" },
                    "duration": duration_schema(),
                    "status": { "type": "string", "description": "New status" },
                    "priority": priority_schema(&PRIORITIES, "New priority"),
                    "description": { "type": "string", "description": "New description" },
                    "completed": { "type": "boolean", "description": "Mark as completed/uncompleted" },
                    "assigneeId": { "type": "string", "description": "New assignee ID" },
                    "labels": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "New labels (replaces existing)",
                    },
                },
                "required": ["taskId"],
            }),
        ),
        ToolDefinition::new(
            "motion_delete_task",
            "Delete a task permanently",
            id_schema("taskId", "Task ID to delete"),
        ),
        ToolDefinition::new(
            "motion_move_task",
            "Move a task to a different project or workspace",
            json!({
                "type": "object",
                "properties": {
                    "taskId": { "type": "string", "description": "Task ID to move" },
                    "projectId": { "type": "string", "description": "Target project ID" },
                    "workspaceId": { "type": "string", "description": "Target workspace ID" },
                },
                "required": ["taskId"],
            }),
        ),
        ToolDefinition::new(
            "motion_complete_task",
            "Mark a task as completed",
            id_schema("taskId", "Task ID to complete"),
        ),
        ToolDefinition::new(
            "motion_uncomplete_task",
            "Mark a task as not completed",
            id_schema("taskId", "Task ID to uncomplete"),
        ),
        ToolDefinition::new(
            "motion_unassign_task",
            "Remove the assignee from a task",
            id_schema("taskId", "Task ID to unassign"),
        ),
    ]
}

impl MotionTools {
    pub(super) async fn list_tasks(&self, args: Value) -> ToolResult {
        let options: TaskListOptions = parse(args)?;
        page_reply("tasks", self.client.list_tasks(&options).await?)
    }

    pub(super) async fn get_task(&self, args: Value) -> ToolResult {
        let task_id = id_arg(&args, "taskId")?;
        to_json(self.client.get_task(&task_id).await?)
    }

    pub(super) async fn create_task(&self, args: Value) -> ToolResult {
        let params: TaskCreate = parse(args)?;
        params.validate()?;
        to_json(self.client.create_task(&params).await?)
    }

    pub(super) async fn update_task(&self, mut args: Value) -> ToolResult {
        let task_id = id_arg(&args, "taskId")?;
        if let Some(fields) = args.as_object_mut() {
            fields.remove("taskId");
        }

        let update: TaskUpdate = parse(args)?;
        if update.is_empty() {
            return Err(ToolError::invalid("at least one field to update is required"));
        }
        to_json(self.client.update_task(&task_id, &update).await?)
    }

    pub(super) async fn delete_task(&self, args: Value) -> ToolResult {
        let task_id = id_arg(&args, "taskId")?;
        self.client.delete_task(&task_id).await?;
        success(format!("Task {task_id} deleted successfully"))
    }

    pub(super) async fn move_task(&self, args: Value) -> ToolResult {
        let MoveArgs { task_id, target } = parse(args)?;
        require("taskId", &task_id)?;

        let blank = |id: &Option<String>| id.as_deref().is_none_or(|id| id.trim().is_empty());
        if blank(&target.project_id) && blank(&target.workspace_id) {
            return Err(ToolError::invalid(
                "projectId or workspaceId is required to move a task",
            ));
        }
        to_json(self.client.move_task(&task_id, &target).await?)
    }

    pub(super) async fn set_task_completed(&self, args: Value, completed: bool) -> ToolResult {
        let task_id = id_arg(&args, "taskId")?;
        to_json(self.client.set_task_completed(&task_id, completed).await?)
    }

    pub(super) async fn unassign_task(&self, args: Value) -> ToolResult {
        let task_id = id_arg(&args, "taskId")?;
        self.client.unassign_task(&task_id).await?;
        success(format!("Task {task_id} unassigned successfully"))
    }
}
