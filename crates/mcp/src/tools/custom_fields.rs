//! Custom field tools.

use motion_api::FieldTarget;
use motion_protocol::{CustomFieldCreate, CustomFieldType, CustomFieldValueAssignment};
use serde_json::{Value, json};

use super::{MotionTools, ToolResult, id_arg, list_reply, parse, require, success, to_json};
use crate::protocol::ToolDefinition;

/// Argument naming the task or project a value is attached to.
fn target_field(target: FieldTarget) -> &'static str {
    match target {
        FieldTarget::Task => "taskId",
        FieldTarget::Project => "projectId",
    }
}

fn target_description(target: FieldTarget) -> &'static str {
    match target {
        FieldTarget::Task => "Task ID",
        FieldTarget::Project => "Project ID",
    }
}

fn add_schema(target: FieldTarget) -> Value {
    let field = target_field(target);
    json!({
        "type": "object",
        "properties": {
            field: { "type": "string", "description": target_description(target) },
            "customFieldInstanceId": { "type": "string", "description": "Custom field instance ID" },
            "value": { "description": "Custom field value (type depends on field type)" },
        },
        "required": [field, "customFieldInstanceId", "value"],
    })
}

fn remove_schema(target: FieldTarget) -> Value {
    let field = target_field(target);
    json!({
        "type": "object",
        "properties": {
            field: { "type": "string", "description": target_description(target) },
            "valueId": { "type": "string", "description": "Custom field value ID to remove" },
        },
        "required": [field, "valueId"],
    })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let types: Vec<&str> = CustomFieldType::CREATABLE
        .iter()
        .map(|t| t.as_str())
        .collect();

    vec![
        ToolDefinition::new(
            "motion_list_custom_fields",
            "List all custom fields for a workspace",
            json!({
                "type": "object",
                "properties": {
                    "workspaceId": { "type": "string", "description": "Workspace ID (required)" },
                },
                "required": ["workspaceId"],
            }),
        ),
        ToolDefinition::new(
            "motion_create_custom_field",
            "Create a new custom field",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Custom field name" },
                    "type": { "type": "string", "enum": types, "description": "Custom field type" },
                    "workspaceId": { "type": "string", "description": "Workspace ID" },
                    "metadata": {
                        "type": "object",
                        "description": "Metadata for the field (e.g., options for select fields)",
                    },
                },
                "required": ["name", "type", "workspaceId"],
            }),
        ),
        ToolDefinition::new(
            "motion_delete_custom_field",
            "Delete a custom field",
            json!({
                "type": "object",
                "properties": {
                    "workspaceId": { "type": "string", "description": "Workspace ID" },
                    "customFieldId": { "type": "string", "description": "Custom field ID" },
                },
                "required": ["workspaceId", "customFieldId"],
            }),
        ),
        ToolDefinition::new(
            "motion_add_custom_field_to_task",
            "Add a custom field value to a task",
            add_schema(FieldTarget::Task),
        ),
        ToolDefinition::new(
            "motion_add_custom_field_to_project",
            "Add a custom field value to a project",
            add_schema(FieldTarget::Project),
        ),
        ToolDefinition::new(
            "motion_remove_custom_field_from_task",
            "Remove a custom field value from a task",
            remove_schema(FieldTarget::Task),
        ),
        ToolDefinition::new(
            "motion_remove_custom_field_from_project",
            "Remove a custom field value from a project",
            remove_schema(FieldTarget::Project),
        ),
    ]
}

impl MotionTools {
    pub(super) async fn list_custom_fields(&self, args: Value) -> ToolResult {
        let workspace_id = id_arg(&args, "workspaceId")?;
        list_reply(
            "customFields",
            self.client.list_custom_fields(&workspace_id).await?,
        )
    }

    pub(super) async fn create_custom_field(&self, args: Value) -> ToolResult {
        let workspace_id = id_arg(&args, "workspaceId")?;
        let params: CustomFieldCreate = parse(args)?;
        params.validate()?;
        to_json(
            self.client
                .create_custom_field(&workspace_id, &params)
                .await?,
        )
    }

    pub(super) async fn delete_custom_field(&self, args: Value) -> ToolResult {
        let workspace_id = id_arg(&args, "workspaceId")?;
        let field_id = id_arg(&args, "customFieldId")?;
        self.client
            .delete_custom_field(&workspace_id, &field_id)
            .await?;
        success("Custom field deleted successfully")
    }

    pub(super) async fn add_custom_field(&self, args: Value, target: FieldTarget) -> ToolResult {
        let id = id_arg(&args, target_field(target))?;
        let assignment: CustomFieldValueAssignment = parse(args)?;
        require("customFieldInstanceId", &assignment.custom_field_instance_id)?;
        self.client
            .add_custom_field_value(target, &id, &assignment)
            .await?;
        success(format!("Custom field added to {target} successfully"))
    }

    pub(super) async fn remove_custom_field(&self, args: Value, target: FieldTarget) -> ToolResult {
        let id = id_arg(&args, target_field(target))?;
        let value_id = id_arg(&args, "valueId")?;
        self.client
            .remove_custom_field_value(target, &id, &value_id)
            .await?;
        success(format!("Custom field removed from {target} successfully"))
    }
}
