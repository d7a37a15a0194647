use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasbeehEvent {
    pub id: String,
    pub name: String,
    pub daily_goal: u32,
    pub daily_count: u32,
    pub total_count: u64,
    pub last_updated: DateTime<Utc>,
}

impl TasbeehEvent {
    /// Share of the daily goal reached, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.daily_goal == 0 {
            return 0.0;
        }
        (self.daily_count as f64 / self.daily_goal as f64 * 100.0).min(100.0)
    }

    pub fn goal_reached(&self) -> bool {
        self.daily_count >= self.daily_goal
    }
}
