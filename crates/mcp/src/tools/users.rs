//! User tools.

use motion_api::UserListOptions;
use serde_json::{Value, json};

use super::{MotionTools, ToolResult, id_arg, id_schema, page_reply, parse, require, to_json};
use crate::protocol::ToolDefinition;

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "motion_get_current_user",
            "Get information about the currently authenticated user",
            json!({ "type": "object", "properties": {}, "required": [] }),
        ),
        ToolDefinition::new(
            "motion_get_user",
            "Get information about a specific user by ID",
            id_schema("userId", "The ID of the user to retrieve"),
        ),
        ToolDefinition::new(
            "motion_list_users",
            "List all users in a workspace",
            json!({
                "type": "object",
                "properties": {
                    "workspaceId": { "type": "string", "description": "Workspace ID (required)" },
                    "teamId": { "type": "string", "description": "Only users in this team" },
                    "cursor": { "type": "string", "description": "Pagination cursor from previous response" },
                },
                "required": ["workspaceId"],
            }),
        ),
    ]
}

impl MotionTools {
    pub(super) async fn get_current_user(&self) -> ToolResult {
        to_json(self.client.get_current_user().await?)
    }

    pub(super) async fn get_user(&self, args: Value) -> ToolResult {
        let user_id = id_arg(&args, "userId")?;
        to_json(self.client.get_user(&user_id).await?)
    }

    pub(super) async fn list_users(&self, args: Value) -> ToolResult {
        let options: UserListOptions = parse(args)?;
        require("workspaceId", options.workspace_id.as_deref().unwrap_or_default())?;
        page_reply("users", self.client.list_users(&options).await?)
    }
}
