use chrono::{DateTime, Local, NaiveTime, Utc};

/// Format a duration in seconds to "Xh Ym" or "Ym" string
pub fn format_duration_secs(secs: i64) -> String {
    if secs <= 0 {
        return "now".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        "<1m".to_string()
    }
}

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Clock face time with seconds, 12- or 24-hour.
pub fn format_clock(t: NaiveTime, hour12: bool) -> String {
    if hour12 {
        t.format("%I:%M:%S %p").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

/// e.g. "Sunday, March 10, 2024"
pub fn format_long_date(now: DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// e.g. "Mar 10, 2024, 02:15 PM" in local time.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration_secs(0), "now");
        assert_eq!(format_duration_secs(30), "<1m");
        assert_eq!(format_duration_secs(90), "1m");
        assert_eq!(format_duration_secs(3 * 3600 + 5 * 60), "3h 5m");
    }

    #[test]
    fn clock_faces() {
        let t = NaiveTime::from_hms_milli_opt(14, 5, 9, 250).unwrap();
        assert_eq!(format_clock(t, true), "02:05:09 PM");
        assert_eq!(format_clock(t, false), "14:05:09");
        assert_eq!(format_time(t), "14:05");
    }

    #[test]
    fn progress_bars() {
        assert_eq!(progress_bar(0, 0, 4), "░░░░");
        assert_eq!(progress_bar(33, 33, 4), "████");
        assert_eq!(progress_bar(50, 33, 4), "████");
        assert_eq!(progress_bar(1, 2, 4), "██░░");
    }
}
