use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc, Weekday};

use crate::db::{Storage, StorageKey};
use crate::features::collection::Collection;
use crate::features::error::FeatureError;
use crate::models::{Alarm, ClockTime, id};

pub struct AlarmClock {
    alarms: Collection<Alarm>,
}

impl AlarmClock {
    pub fn load(storage: &Storage) -> Self {
        Self {
            alarms: Collection::open(storage, StorageKey::Alarms, Vec::new()),
        }
    }

    pub fn alarms(&self) -> &[Alarm] {
        self.alarms.items()
    }

    pub fn add(
        &mut self,
        time: ClockTime,
        label: &str,
        days_of_week: [bool; 7],
        now: DateTime<Utc>,
    ) -> &Alarm {
        let label = match label.trim() {
            "" => "Alarm".to_string(),
            l => l.to_string(),
        };
        self.alarms.push(Alarm {
            id: id::next_id(now),
            time,
            label,
            enabled: true,
            days_of_week,
        })
    }

    pub fn toggle(&mut self, id: &str) -> Result<&Alarm, FeatureError> {
        self.alarms
            .update(id, |a| a.enabled = !a.enabled)
            .ok_or_else(|| FeatureError::not_found("alarm", id))
    }

    pub fn toggle_day(&mut self, id: &str, day: Weekday) -> Result<&Alarm, FeatureError> {
        let idx = day.num_days_from_sunday() as usize;
        self.alarms
            .update(id, |a| a.days_of_week[idx] = !a.days_of_week[idx])
            .ok_or_else(|| FeatureError::not_found("alarm", id))
    }

    pub fn delete(&mut self, id: &str) -> Result<Alarm, FeatureError> {
        self.alarms
            .remove(id)
            .ok_or_else(|| FeatureError::not_found("alarm", id))
    }

    pub fn next_occurrence(&self, now: NaiveDateTime) -> Option<(&Alarm, NaiveDateTime)> {
        next_occurrence(self.alarms.items(), now)
    }
}

/// The enabled alarm that rings soonest after `now`.
///
/// Today only times strictly later than `now` count; after that the scan
/// walks forward day by day (up to the same weekday next week) looking at
/// each alarm's weekday mask.
pub fn next_occurrence(alarms: &[Alarm], now: NaiveDateTime) -> Option<(&Alarm, NaiveDateTime)> {
    let now_time = now.time();
    for offset in 0..=7 {
        let date = now.date() + Duration::days(offset);
        let candidate = alarms
            .iter()
            .filter(|a| a.enabled && a.rings_on(date.weekday()))
            .filter(|a| offset > 0 || a.time.time() > now_time)
            .min_by_key(|a| a.time);
        if let Some(alarm) = candidate {
            return Some((alarm, date.and_time(alarm.time.time())));
        }
    }
    None
}

/// Parse a repeat mask: `daily`, `weekdays`, `weekends`, `none`, or a comma
/// list of day names such as `mon,wed,fri`.
pub fn parse_days(spec: &str) -> Result<[bool; 7], FeatureError> {
    let spec = spec.trim().to_lowercase();
    match spec.as_str() {
        "" | "none" | "once" => return Ok([false; 7]),
        "daily" | "everyday" | "all" => return Ok([true; 7]),
        "weekdays" => return Ok([false, true, true, true, true, true, false]),
        "weekends" => return Ok([true, false, false, false, false, false, true]),
        _ => {}
    }
    let mut mask = [false; 7];
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day = parse_weekday(part)?;
        mask[day.num_days_from_sunday() as usize] = true;
    }
    Ok(mask)
}

pub fn parse_weekday(s: &str) -> Result<Weekday, FeatureError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| FeatureError::InvalidWeekday(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    // 2024-06-05 is a Wednesday.
    fn wed(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn clock() -> AlarmClock {
        AlarmClock::load(&Storage::new(MemoryStore::new()))
    }

    #[test]
    fn picks_the_earliest_later_time_today() {
        let mut clock = clock();
        let now = Utc::now();
        clock.add(t(22, 0), "Bed", [true; 7], now);
        clock.add(t(7, 0), "Wake", [true; 7], now);
        clock.add(t(18, 30), "Gym", [true; 7], now);

        let (alarm, at) = clock.next_occurrence(wed(12, 0)).unwrap();
        assert_eq!(alarm.label, "Gym");
        assert_eq!(at, wed(18, 30));
    }

    #[test]
    fn equal_time_is_not_strictly_later() {
        let mut clock = clock();
        clock.add(t(12, 0), "Noon", [true; 7], Utc::now());
        let (_, at) = clock.next_occurrence(wed(12, 0)).unwrap();
        assert_eq!(at, wed(12, 0) + Duration::days(1));
    }

    #[test]
    fn wraps_to_the_nearest_day_with_the_bit_set() {
        let mut clock = clock();
        let now = Utc::now();
        let fri = parse_days("fri").unwrap();
        let mon = parse_days("mon").unwrap();
        clock.add(t(6, 0), "Friday run", fri, now);
        clock.add(t(5, 0), "Monday standup", mon, now);

        let (alarm, at) = clock.next_occurrence(wed(9, 0)).unwrap();
        assert_eq!(alarm.label, "Friday run");
        assert_eq!(at, wed(6, 0) + Duration::days(2));
    }

    #[test]
    fn same_weekday_next_week_and_disabled_alarms() {
        let mut clock = clock();
        let id = clock.add(t(8, 0), "Weekly", parse_days("wed").unwrap(), Utc::now()).id.clone();

        let (_, at) = clock.next_occurrence(wed(9, 0)).unwrap();
        assert_eq!(at, wed(8, 0) + Duration::days(7));

        clock.toggle(&id).unwrap();
        assert!(clock.next_occurrence(wed(9, 0)).is_none());
    }

    #[test]
    fn empty_mask_rings_daily_and_toggle_day_edits_mask() {
        let mut clock = clock();
        let id = clock.add(t(6, 0), "", [false; 7], Utc::now()).id.clone();
        assert_eq!(clock.alarms()[0].label, "Alarm");
        assert_eq!(clock.next_occurrence(wed(7, 0)).unwrap().1, wed(6, 0) + Duration::days(1));

        let alarm = clock.toggle_day(&id, Weekday::Sat).unwrap();
        assert_eq!(alarm.days_of_week, [false, false, false, false, false, false, true]);
        assert_eq!(alarm.days_label(), "Sat");
        assert_eq!(clock.next_occurrence(wed(7, 0)).unwrap().1, wed(6, 0) + Duration::days(3));
    }

    #[test]
    fn parses_day_specs() {
        assert_eq!(parse_days("weekdays").unwrap(), [false, true, true, true, true, true, false]);
        assert_eq!(parse_days("Sun, sat").unwrap(), [true, false, false, false, false, false, true]);
        assert_eq!(parse_days("daily").unwrap(), [true; 7]);
        assert_eq!(
            parse_days("mon,funday").unwrap_err(),
            FeatureError::InvalidWeekday("funday".into())
        );
    }
}
