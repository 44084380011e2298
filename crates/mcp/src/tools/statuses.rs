//! Status tools.

use serde::Deserialize;
use serde_json::{Value, json};

use super::{MotionTools, ToolResult, list_reply, parse};
use crate::protocol::ToolDefinition;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    #[serde(default)]
    workspace_id: Option<String>,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition::new(
        "motion_list_statuses",
        "List all available statuses, optionally filtered by workspace",
        json!({
            "type": "object",
            "properties": {
                "workspaceId": { "type": "string", "description": "Filter by workspace ID (optional)" },
            },
            "required": [],
        }),
    )]
}

impl MotionTools {
    pub(super) async fn list_statuses(&self, args: Value) -> ToolResult {
        let args: ListArgs = parse(args)?;
        let workspace_id = args.workspace_id.as_deref().filter(|id| !id.trim().is_empty());
        list_reply("statuses", self.client.list_statuses(workspace_id).await?)
    }
}
