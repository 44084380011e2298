//! Project tools.
//!
//! Motion does not let projects be edited or removed through the API, so
//! only listing, reading and creating are exposed.

use motion_api::ProjectListOptions;
use motion_protocol::ProjectCreate;
use serde_json::{Value, json};

use super::{MotionTools, ToolResult, id_arg, id_schema, page_reply, parse, require, to_json};
use crate::protocol::ToolDefinition;

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "motion_list_projects",
            "List all projects in a workspace",
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
            "motion_get_project",
            "Get detailed information about a specific project",
            id_schema("projectId", "The ID of the project to retrieve"),
        ),
        ToolDefinition::new(
            "motion_create_project",
            "Create a new project in Motion",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Project name" },
                    "workspaceId": { "type": "string", "description": "Workspace ID" },
                    "description": {
                        "type": "string",
                        "description": "Project description (supports HTML/Markdown)",
                    },
                    "status": {
                        "type": "string",
                        "description": "Initial project status (must be valid for workspace)",
                    },
                    "customFieldValues": {
                        "type": "object",
                        "description": "Custom field values as key-value pairs",
                        "additionalProperties": true,
                    },
                },
                "required": ["name", "workspaceId"],
            }),
        ),
    ]
}

impl MotionTools {
    pub(super) async fn list_projects(&self, args: Value) -> ToolResult {
        let options: ProjectListOptions = parse(args)?;
        require("workspaceId", options.workspace_id.as_deref().unwrap_or_default())?;
        page_reply("projects", self.client.list_projects(&options).await?)
    }

    pub(super) async fn get_project(&self, args: Value) -> ToolResult {
        let project_id = id_arg(&args, "projectId")?;
        to_json(self.client.get_project(&project_id).await?)
    }

    pub(super) async fn create_project(&self, args: Value) -> ToolResult {
        let params: ProjectCreate = parse(args)?;
        params.validate()?;
        to_json(self.client.create_project(&params).await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::offline;
    use crate::server::ToolHandler;

    #[tokio::test]
    async fn list_projects_requires_workspace() {
        for args in [json!({}), json!({"workspaceId": ""})] {
            let err = offline()
                .call("motion_list_projects", args)
                .await
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "invalid arguments: workspaceId is required and cannot be empty"
            );
        }
    }
}
