use serde::{Deserialize, Serialize};

use crate::models::ClockTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTime {
    pub id: String,
    pub name: String,
    pub time: ClockTime,
    pub enabled: bool,
}

/// The five daily prayers seeded on first run.
pub fn default_prayer_times() -> Vec<PrayerTime> {
    [
        ("1", "Fajr", 5, 30),
        ("2", "Dhuhr", 12, 30),
        ("3", "Asr", 16, 0),
        ("4", "Maghrib", 18, 30),
        ("5", "Isha", 20, 0),
    ]
    .into_iter()
    .filter_map(|(id, name, h, m)| {
        ClockTime::from_hm(h, m).map(|time| PrayerTime {
            id: id.to_string(),
            name: name.to_string(),
            time,
            enabled: true,
        })
    })
    .collect()
}
