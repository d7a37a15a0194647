use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::ClockTime;

pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: String,
    pub time: ClockTime,
    pub label: String,
    pub enabled: bool,
    /// Repeat mask indexed Sunday = 0 .. Saturday = 6.
    pub days_of_week: [bool; 7],
}

impl Alarm {
    /// An empty mask rings every day.
    pub fn rings_on(&self, day: Weekday) -> bool {
        self.days_of_week.iter().all(|d| !d)
            || self.days_of_week[day.num_days_from_sunday() as usize]
    }

    pub fn days_label(&self) -> String {
        if self.days_of_week.iter().all(|d| *d) || self.days_of_week.iter().all(|d| !d) {
            return "Every day".to_string();
        }
        if self.days_of_week == [false, true, true, true, true, true, false] {
            return "Weekdays".to_string();
        }
        if self.days_of_week == [true, false, false, false, false, false, true] {
            return "Weekends".to_string();
        }
        self.days_of_week
            .iter()
            .zip(DAY_LABELS)
            .filter(|(on, _)| **on)
            .map(|(_, label)| label)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
