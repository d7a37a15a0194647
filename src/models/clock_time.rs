use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::features::FeatureError;

/// A wall-clock time of day persisted as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    /// Truncates seconds.
    pub fn from_time(t: NaiveTime) -> Self {
        ClockTime(NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t))
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(ClockTime)
            .map_err(|_| FeatureError::InvalidTime(s.to_string()))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_hh_mm() {
        let t: ClockTime = "07:05".parse().unwrap();
        assert_eq!((t.time().hour(), t.time().minute()), (7, 5));
        assert_eq!(t.to_string(), "07:05");
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:05\"");
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert_eq!(
            "noon".parse::<ClockTime>().unwrap_err(),
            FeatureError::InvalidTime("noon".into())
        );
        assert!(serde_json::from_str::<ClockTime>("\"25:10\"").is_err());
    }

    #[test]
    fn from_time_drops_seconds() {
        let t = ClockTime::from_time(NaiveTime::from_hms_opt(5, 30, 59).unwrap());
        assert_eq!(t, ClockTime::from_hm(5, 30).unwrap());
    }
}
