use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::BTreeSet;

use crate::db::{Storage, StorageKey};
use crate::features::collection::Collection;
use crate::features::error::{FeatureError, optional, required};
use crate::models::{CalendarEvent, id};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub const RECENT_EVENTS: usize = 5;

pub struct CalendarBook {
    events: Collection<CalendarEvent>,
}

impl CalendarBook {
    pub fn load(storage: &Storage) -> Self {
        Self {
            events: Collection::open(storage, StorageKey::CalendarEvents, Vec::new()),
        }
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events
            .items()
            .iter()
            .filter(|e| e.date == date)
            .collect()
    }

    /// The last `n` events added, newest first.
    pub fn recent(&self, n: usize) -> Vec<&CalendarEvent> {
        self.events.items().iter().rev().take(n).collect()
    }

    /// Days of `grid`'s month that have at least one event.
    pub fn marked_days(&self, grid: &MonthGrid) -> BTreeSet<u32> {
        self.events
            .items()
            .iter()
            .filter(|e| e.date.year() == grid.year() && e.date.month() == grid.month())
            .map(|e| e.date.day())
            .collect()
    }

    pub fn add(
        &mut self,
        date: NaiveDate,
        title: &str,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&CalendarEvent, FeatureError> {
        let title = required(title, "an event title")?;
        let event = CalendarEvent {
            id: id::next_id(now),
            date,
            title,
            description: optional(description),
            created_at: now,
        };
        Ok(self.events.push(event))
    }

    pub fn delete(&mut self, id: &str) -> Result<CalendarEvent, FeatureError> {
        self.events
            .remove(id)
            .ok_or_else(|| FeatureError::not_found("calendar event", id))
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, FeatureError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| FeatureError::InvalidDate(s.to_string()))
}

/// One month of the calendar view, Sunday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    first: NaiveDate,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.first.month0() as usize], self.year())
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first;
        next.signed_duration_since(self.first).num_days() as u32
    }

    /// Blank cells before the 1st (Sunday = 0).
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// `YYYY-MM-DD` for a day of this month.
    pub fn date_key(&self, day: u32) -> String {
        format!("{}-{:02}-{:02}", self.year(), self.month(), day)
    }

    pub fn prev(&self) -> Self {
        let (y, m) = if self.month() == 1 {
            (self.year() - 1, 12)
        } else {
            (self.year(), self.month() - 1)
        };
        Self::new(y, m).unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        let (y, m) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::new(y, m).unwrap_or(*self)
    }

    /// Weeks of cells, `None` for padding.
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let mut cells: Vec<Option<u32>> = vec![None; self.leading_blanks() as usize];
        cells.extend((1..=self.days_in_month()).map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells
            .chunks(7)
            .map(|w| {
                let mut week = [None; 7];
                week.copy_from_slice(w);
                week
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_handles_leap_years_and_year_boundaries() {
        let feb = MonthGrid::new(2024, 2).unwrap();
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.leading_blanks(), 4); // 2024-02-01 was a Thursday
        assert_eq!(feb.title(), "February 2024");

        assert_eq!(feb.date_key(9), "2024-02-09");

        let dec = MonthGrid::new(2023, 12).unwrap();
        assert_eq!(dec.next(), MonthGrid::new(2024, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(MonthGrid::new(2023, 2).unwrap().days_in_month(), 28);
    }

    #[test]
    fn weeks_pad_to_full_rows() {
        let sept = MonthGrid::new(2024, 9).unwrap(); // starts on a Sunday
        let weeks = sept.weeks();
        assert_eq!(weeks[0][0], Some(1));
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[4], [Some(29), Some(30), None, None, None, None, None]);
    }

    #[test]
    fn events_group_by_date_and_recent_is_newest_first() {
        let storage = Storage::new(MemoryStore::new());
        let mut cal = CalendarBook::load(&storage);
        let now = Utc::now();

        for i in 1..=7 {
            cal.add(date(2024, 3, i), &format!("Event {}", i), None, now).unwrap();
        }
        cal.add(date(2024, 3, 2), "Second on the 2nd", Some("  "), now).unwrap();

        assert_eq!(cal.events_on(date(2024, 3, 2)).len(), 2);
        assert!(cal.events_on(date(2024, 4, 2)).is_empty());

        let recent: Vec<&str> = cal.recent(RECENT_EVENTS).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(recent, vec!["Second on the 2nd", "Event 7", "Event 6", "Event 5", "Event 4"]);

        let grid = MonthGrid::containing(date(2024, 3, 15));
        assert_eq!(cal.marked_days(&grid).len(), 7);
        assert!(cal.marked_days(&grid.next()).is_empty());
    }

    #[test]
    fn parse_date_rejects_bad_input() {
        assert_eq!(parse_date("2024-03-09").unwrap(), date(2024, 3, 9));
        assert_eq!(
            parse_date("09/03/2024").unwrap_err(),
            FeatureError::InvalidDate("09/03/2024".into())
        );
    }
}
