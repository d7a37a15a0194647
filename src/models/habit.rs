use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_relapse_date: Option<DateTime<Utc>>,
}

impl Habit {
    /// The instant the current streak is measured from.
    pub fn streak_start(&self) -> DateTime<Utc> {
        self.last_relapse_date.unwrap_or(self.start_date)
    }
}
