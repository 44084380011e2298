//! Work schedule types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A block of working time within a day, as `HH:mm` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the block.
    pub start: String,
    /// End of the block.
    pub end: String,
}

/// A named work schedule, as returned by `GET /schedules`.
///
/// The weekly hours map day names (`monday` ... `sunday`) to the working
/// blocks of that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Schedule name (e.g. `"Work Hours"`).
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the schedule follows the user's default timezone.
    #[serde(default)]
    pub is_default_timezone: Option<bool>,
    /// IANA timezone name.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Working blocks per day of the week.
    #[serde(default)]
    pub schedule: Option<BTreeMap<String, Vec<TimeRange>>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schedule {
    /// Returns the working blocks for `day` (lowercase English day name).
    #[must_use]
    pub fn hours_on(&self, day: &str) -> &[TimeRange] {
        self.schedule
            .as_ref()
            .and_then(|s| s.get(day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
