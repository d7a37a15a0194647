use serde::{Deserialize, Serialize};

/// Persisted stopwatch. While running, `time` is 0 and `start_time` holds the
/// epoch-millisecond instant the stopwatch would have started from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchState {
    pub time: i64,
    pub is_running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
}
