use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

/// Hijri date string for `date`, shifted by `offset_days` for local moon
/// sighting (e.g. -1 where the month starts a day later than in Saudi Arabia).
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> Result<String> {
    let adjusted = date + Duration::days(offset_days as i64);
    let hd = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;
    Ok(format!("{} {} {}", hd.day(), hijri_month_name(hd.month()), hd.year()))
}

/// Hijri date for today; empty when the conversion fails.
pub fn today_hijri_string(offset_days: i32) -> String {
    let today = chrono::Local::now().date_naive();
    hijri_string(today, offset_days).unwrap_or_else(|e| {
        log::warn!("{}", e);
        String::new()
    })
}
