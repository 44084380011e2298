//! Workspace tools.

use motion_protocol::Workspace;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{MotionTools, ToolResult, id_arg, id_schema, page_reply, parse, to_json};
use crate::protocol::ToolDefinition;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    #[serde(default)]
    cursor: Option<String>,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "motion_list_workspaces",
            "List all workspaces accessible to the authenticated user",
            json!({
                "type": "object",
                "properties": {
                    "cursor": { "type": "string", "description": "Pagination cursor from previous response" },
                },
                "required": [],
            }),
        ),
        ToolDefinition::new(
            "motion_get_workspace",
            "Get details of a specific workspace by ID",
            id_schema("workspaceId", "The ID of the workspace to retrieve"),
        ),
    ]
}

impl MotionTools {
    pub(super) async fn list_workspaces(&self, args: Value) -> ToolResult {
        let args: ListArgs = parse(args)?;
        let page = self.client.list_workspaces(args.cursor.as_deref()).await?;
        page_reply::<Workspace>("workspaces", page)
    }

    pub(super) async fn get_workspace(&self, args: Value) -> ToolResult {
        let workspace_id = id_arg(&args, "workspaceId")?;
        to_json(self.client.get_workspace(&workspace_id).await?)
    }
}
