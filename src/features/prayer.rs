use chrono::NaiveTime;

use crate::db::{Storage, StorageKey};
use crate::features::collection::Collection;
use crate::features::error::FeatureError;
use crate::models::{ClockTime, PrayerTime, default_prayer_times};
use crate::prayer_times::calculator::PrayerTimesLocal;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

pub struct PrayerTimetable {
    prayers: Collection<PrayerTime>,
}

impl PrayerTimetable {
    /// Seeds the five default prayers when nothing has been stored yet.
    pub fn load(storage: &Storage) -> Self {
        Self {
            prayers: Collection::open(storage, StorageKey::PrayerTimes, default_prayer_times()),
        }
    }

    pub fn prayers(&self) -> &[PrayerTime] {
        self.prayers.items()
    }

    /// Match by id first, then by case-insensitive name.
    pub fn resolve(&self, key: &str) -> Result<String, FeatureError> {
        self.prayers
            .get(key)
            .or_else(|| {
                self.prayers
                    .items()
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(key.trim()))
            })
            .map(|p| p.id.clone())
            .ok_or_else(|| FeatureError::not_found("prayer", key))
    }

    pub fn set_time(&mut self, id: &str, time: ClockTime) -> Result<&PrayerTime, FeatureError> {
        self.prayers
            .update(id, |p| p.time = time)
            .ok_or_else(|| FeatureError::not_found("prayer", id))
    }

    pub fn toggle(&mut self, id: &str) -> Result<&PrayerTime, FeatureError> {
        self.prayers
            .update(id, |p| p.enabled = !p.enabled)
            .ok_or_else(|| FeatureError::not_found("prayer", id))
    }

    pub fn reset_defaults(&mut self) {
        self.prayers.replace_all(default_prayer_times());
    }

    /// Overwrite stored times with calculated ones, matching by prayer name.
    /// Enabled flags are kept. Returns how many prayers changed.
    pub fn sync_from_location(&mut self, computed: &PrayerTimesLocal) -> usize {
        let mut updated: Vec<PrayerTime> = self.prayers.items().to_vec();
        let mut changed = 0;
        for prayer in &mut updated {
            if let Some(t) = computed.time_for(&prayer.name) {
                let t = ClockTime::from_time(t);
                if prayer.time != t {
                    prayer.time = t;
                    changed += 1;
                }
            }
        }
        if changed > 0 {
            self.prayers.replace_all(updated);
        }
        changed
    }

    pub fn next_prayer(&self, now: NaiveTime) -> Option<&PrayerTime> {
        next_prayer(self.prayers.items(), now)
    }
}

/// The enabled prayer with the earliest time strictly after `now`. Once every
/// enabled prayer has passed, falls back to the earliest enabled one.
pub fn next_prayer(prayers: &[PrayerTime], now: NaiveTime) -> Option<&PrayerTime> {
    let enabled = || prayers.iter().filter(|p| p.enabled);
    enabled()
        .filter(|p| p.time.time() > now)
        .min_by_key(|p| p.time)
        .or_else(|| enabled().min_by_key(|p| p.time))
}

/// Seconds from `now` until `at`, counting into tomorrow when `at` is not later.
pub fn seconds_until(at: ClockTime, now: NaiveTime) -> i64 {
    let secs = at.time().signed_duration_since(now).num_seconds();
    if secs > 0 { secs } else { secs + SECS_PER_DAY }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn timetable() -> (Storage, PrayerTimetable) {
        let storage = Storage::new(MemoryStore::new());
        let table = PrayerTimetable::load(&storage);
        (storage, table)
    }

    #[test]
    fn first_run_has_five_defaults() {
        let (_, table) = timetable();
        let names: Vec<&str> = table.prayers().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Fajr", "Dhuhr", "Asr", "Maghrib", "Isha"]);
        assert!(table.prayers().iter().all(|p| p.enabled));
    }

    #[test]
    fn next_prayer_is_smallest_positive_delta() {
        let (_, table) = timetable();
        assert_eq!(table.next_prayer(hm(4, 0)).unwrap().name, "Fajr");
        assert_eq!(table.next_prayer(hm(13, 0)).unwrap().name, "Asr");
        assert_eq!(table.next_prayer(hm(16, 0)).unwrap().name, "Maghrib");
    }

    #[test]
    fn wraps_to_earliest_enabled_after_isha() {
        let (_, mut table) = timetable();
        assert_eq!(table.next_prayer(hm(21, 0)).unwrap().name, "Fajr");

        let fajr = table.resolve("fajr").unwrap();
        table.toggle(&fajr).unwrap();
        assert_eq!(table.next_prayer(hm(21, 0)).unwrap().name, "Dhuhr");
        assert_eq!(table.next_prayer(hm(4, 0)).unwrap().name, "Dhuhr");
    }

    #[test]
    fn nothing_enabled_means_no_next_prayer() {
        let (_, mut table) = timetable();
        for id in ["1", "2", "3", "4", "5"] {
            table.toggle(id).unwrap();
        }
        assert!(table.next_prayer(hm(12, 0)).is_none());
    }

    #[test]
    fn edits_persist_and_reset_restores_defaults() {
        let (storage, mut table) = timetable();
        let id = table.resolve("Isha").unwrap();
        table.set_time(&id, ClockTime::from_hm(21, 15).unwrap()).unwrap();

        let reloaded = PrayerTimetable::load(&storage);
        assert_eq!(reloaded.prayers()[4].time.to_string(), "21:15");

        table.reset_defaults();
        assert_eq!(PrayerTimetable::load(&storage).prayers(), default_prayer_times().as_slice());
    }

    #[test]
    fn seconds_until_never_negative() {
        let fajr = ClockTime::from_hm(5, 30).unwrap();
        assert_eq!(seconds_until(fajr, hm(5, 0)), 30 * 60);
        assert_eq!(seconds_until(fajr, hm(5, 30)), SECS_PER_DAY);
        assert_eq!(seconds_until(fajr, hm(23, 30)), 6 * 3600);
    }

    #[test]
    fn sync_overwrites_matching_names() {
        let (_, mut table) = timetable();
        let computed = PrayerTimesLocal {
            fajr: hm(4, 51),
            sunrise: hm(6, 10),
            zuhr: hm(12, 30),
            asr: hm(15, 48),
            maghrib: hm(18, 33),
            isha: hm(19, 52),
        };
        assert_eq!(table.sync_from_location(&computed), 4);
        assert_eq!(table.prayers()[0].time.to_string(), "04:51");
        assert_eq!(table.sync_from_location(&computed), 0);
    }
}
