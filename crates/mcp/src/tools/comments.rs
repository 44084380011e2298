//! Comment tools.

use motion_api::CommentListOptions;
use motion_protocol::CommentCreate;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{MotionTools, ToolResult, id_schema, id_arg, page_reply, parse, require, success, to_json};
use crate::protocol::ToolDefinition;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    comment_id: String,
    content: String,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "motion_list_comments",
            "List all comments for a specific task",
            json!({
                "type": "object",
                "properties": {
                    "taskId": { "type": "string", "description": "Task ID to get comments for" },
                    "cursor": { "type": "string", "description": "Pagination cursor from previous response" },
                },
                "required": ["taskId"],
            }),
        ),
        ToolDefinition::new(
            "motion_create_comment",
            "Add a new comment to a task",
            json!({
                "type": "object",
                "properties": {
                    "taskId": { "type": "string", "description": "Task ID to comment on" },
                    "content": { "type": "string", "description": "Comment content" },
                },
                "required": ["taskId", "content"],
            }),
        ),
        ToolDefinition::new(
            "motion_get_comment",
            "Get details of a specific comment",
            id_schema("commentId", "Comment ID to retrieve"),
        ),
        ToolDefinition::new(
            "motion_update_comment",
            "Update the content of an existing comment",
            json!({
                "type": "object",
                "properties": {
                    "commentId": { "type": "string", "description": "Comment ID to update" },
                    "content": { "type": "string", "description": "New comment content" },
                },
                "required": ["commentId", "content"],
            }),
        ),
        ToolDefinition::new(
            "motion_delete_comment",
            "Delete a comment permanently",
            id_schema("commentId", "Comment ID to delete"),
        ),
    ]
}

impl MotionTools {
    pub(super) async fn list_comments(&self, args: Value) -> ToolResult {
        let options: CommentListOptions = parse(args)?;
        require("taskId", &options.task_id)?;
        page_reply("comments", self.client.list_comments(&options).await?)
    }

    pub(super) async fn create_comment(&self, args: Value) -> ToolResult {
        let params: CommentCreate = parse(args)?;
        params.validate()?;
        to_json(self.client.create_comment(&params).await?)
    }

    pub(super) async fn get_comment(&self, args: Value) -> ToolResult {
        let comment_id = id_arg(&args, "commentId")?;
        to_json(self.client.get_comment(&comment_id).await?)
    }

    pub(super) async fn update_comment(&self, args: Value) -> ToolResult {
        let UpdateArgs { comment_id, content } = parse(args)?;
        require("commentId", &comment_id)?;
        require("content", &content)?;
        to_json(self.client.update_comment(&comment_id, &content).await?)
    }

    pub(super) async fn delete_comment(&self, args: Value) -> ToolResult {
        let comment_id = id_arg(&args, "commentId")?;
        self.client.delete_comment(&comment_id).await?;
        success(format!("Comment {comment_id} deleted successfully"))
    }
}
