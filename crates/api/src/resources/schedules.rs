//! Schedule endpoint.

use chrono::NaiveDate;
use motion_protocol::Schedule;
use serde::Deserialize;
use tracing::instrument;

use super::Query;
use crate::client::MotionClient;
use crate::error::Result;

/// Parameters for `GET /schedules`. Dates are sent as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    /// Whose schedules to fetch; the key owner when unset.
    #[serde(default)]
    pub user_id: Option<String>,
    /// First day of the range.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the range.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ScheduleQuery {
    /// Query parameters for this range.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        Query::default()
            .opt("userId", self.user_id.as_deref())
            .opt("startDate", self.start_date)
            .opt("endDate", self.end_date)
            .build()
    }
}

impl MotionClient {
    /// Fetches work schedules.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_schedules(&self, query: &ScheduleQuery) -> Result<Vec<Schedule>> {
        let page = self.list("/schedules", query.to_query(), "schedules").await?;
        Ok(page.items)
    }
}
