//! Schedule tools.

use chrono::NaiveDate;
use motion_api::ScheduleQuery;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{MotionTools, ToolResult, list_reply, parse};
use crate::error::ToolError;
use crate::protocol::ToolDefinition;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleArgs {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

impl ScheduleArgs {
    fn into_query(self) -> Result<ScheduleQuery, ToolError> {
        let start_date = parse_date("startDate", self.start_date.as_deref())?;
        let end_date = parse_date("endDate", self.end_date.as_deref())?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(ToolError::invalid(format!(
                    "endDate {end} is before startDate {start}"
                )));
            }
        }

        Ok(ScheduleQuery {
            user_id: self.user_id.filter(|id| !id.trim().is_empty()),
            start_date,
            end_date,
        })
    }
}

fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ToolError> {
    raw.map(|raw| {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            ToolError::invalid(format!("{field} must be a date in YYYY-MM-DD format, got \"{raw}\""))
        })
    })
    .transpose()
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition::new(
        "motion_get_schedule",
        "Get schedule information for a user within a date range",
        json!({
            "type": "object",
            "properties": {
                "userId": { "type": "string", "description": "User ID to get schedule for" },
                "startDate": { "type": "string", "description": "Start date in YYYY-MM-DD format" },
                "endDate": { "type": "string", "description": "End date in YYYY-MM-DD format" },
            },
            "required": [],
        }),
    )]
}

impl MotionTools {
    pub(super) async fn get_schedule(&self, args: Value) -> ToolResult {
        let query = parse::<ScheduleArgs>(args)?.into_query()?;
        list_reply("schedules", self.client.get_schedules(&query).await?)
    }
}
