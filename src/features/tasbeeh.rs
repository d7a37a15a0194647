use chrono::{DateTime, Utc};

use crate::db::{Storage, StorageKey};
use crate::features::collection::Collection;
use crate::features::error::{FeatureError, required};
use crate::models::{TasbeehEvent, id};

pub const DEFAULT_DAILY_GOAL: u32 = 33;

pub struct TasbeehCounter {
    events: Collection<TasbeehEvent>,
}

impl TasbeehCounter {
    pub fn load(storage: &Storage) -> Self {
        Self {
            events: Collection::open(storage, StorageKey::TasbeehEvents, Vec::new()),
        }
    }

    pub fn events(&self) -> &[TasbeehEvent] {
        self.events.items()
    }

    pub fn get(&self, id: &str) -> Option<&TasbeehEvent> {
        self.events.get(id)
    }

    /// Look an event up by id, then by case-insensitive name.
    pub fn resolve(&self, key: &str) -> Result<String, FeatureError> {
        self.events
            .get(key)
            .or_else(|| {
                self.events
                    .items()
                    .iter()
                    .find(|e| e.name.eq_ignore_ascii_case(key.trim()))
            })
            .map(|e| e.id.clone())
            .ok_or_else(|| FeatureError::not_found("tasbeeh event", key))
    }

    pub fn create(
        &mut self,
        name: &str,
        daily_goal: u32,
        now: DateTime<Utc>,
    ) -> Result<&TasbeehEvent, FeatureError> {
        let name = required(name, "an event name")?;
        if daily_goal == 0 {
            return Err(FeatureError::InvalidGoal);
        }
        let event = TasbeehEvent {
            id: id::next_id(now),
            name,
            daily_goal,
            daily_count: 0,
            total_count: 0,
            last_updated: now,
        };
        Ok(self.events.push(event))
    }

    pub fn increment(&mut self, id: &str, now: DateTime<Utc>) -> Result<&TasbeehEvent, FeatureError> {
        self.events
            .update(id, |e| {
                e.daily_count = e.daily_count.saturating_add(1);
                e.total_count = e.total_count.saturating_add(1);
                e.last_updated = now;
            })
            .ok_or_else(|| FeatureError::not_found("tasbeeh event", id))
    }

    /// Undo one count. Does nothing once the daily count is already zero.
    pub fn decrement(&mut self, id: &str, now: DateTime<Utc>) -> Result<&TasbeehEvent, FeatureError> {
        let current = self
            .events
            .get(id)
            .ok_or_else(|| FeatureError::not_found("tasbeeh event", id))?;
        if current.daily_count == 0 {
            return self
                .events
                .get(id)
                .ok_or_else(|| FeatureError::not_found("tasbeeh event", id));
        }
        self.events
            .update(id, |e| {
                e.daily_count = e.daily_count.saturating_sub(1);
                e.total_count = e.total_count.saturating_sub(1);
                e.last_updated = now;
            })
            .ok_or_else(|| FeatureError::not_found("tasbeeh event", id))
    }

    pub fn reset_daily(&mut self, id: &str, now: DateTime<Utc>) -> Result<&TasbeehEvent, FeatureError> {
        self.events
            .update(id, |e| {
                e.daily_count = 0;
                e.last_updated = now;
            })
            .ok_or_else(|| FeatureError::not_found("tasbeeh event", id))
    }

    pub fn delete(&mut self, id: &str) -> Result<TasbeehEvent, FeatureError> {
        self.events
            .remove(id)
            .ok_or_else(|| FeatureError::not_found("tasbeeh event", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn counter() -> (Storage, TasbeehCounter) {
        let storage = Storage::new(MemoryStore::new());
        let counter = TasbeehCounter::load(&storage);
        (storage, counter)
    }

    #[test]
    fn create_requires_name_and_goal() {
        let (_, mut counter) = counter();
        let now = Utc::now();
        assert_eq!(
            counter.create("   ", 33, now).unwrap_err(),
            FeatureError::EmptyField("an event name")
        );
        assert_eq!(counter.create("Alhamdulillah", 0, now).unwrap_err(), FeatureError::InvalidGoal);

        let event = counter.create("  SubhanAllah ", 33, now).unwrap();
        assert_eq!(event.name, "SubhanAllah");
        assert_eq!((event.daily_count, event.total_count), (0, 0));
    }

    #[test]
    fn daily_count_never_goes_negative() {
        let (storage, mut counter) = counter();
        let now = Utc::now();
        let id = counter.create("Dhikr", 3, now).unwrap().id.clone();

        counter.increment(&id, now).unwrap();
        counter.increment(&id, now).unwrap();
        for _ in 0..5 {
            counter.decrement(&id, now).unwrap();
        }

        let event = counter.get(&id).unwrap();
        assert_eq!(event.daily_count, 0);
        assert_eq!(event.total_count, 0);

        let reloaded = TasbeehCounter::load(&storage);
        assert_eq!(reloaded.get(&id).unwrap().daily_count, 0);
    }

    #[test]
    fn counts_saturate_at_their_limits() {
        let (storage, _) = counter();
        let now = Utc::now();
        storage.save(
            StorageKey::TasbeehEvents,
            &vec![TasbeehEvent {
                id: "1".into(),
                name: "Imported".into(),
                daily_goal: 33,
                daily_count: u32::MAX,
                total_count: u64::MAX,
                last_updated: now,
            }],
        );

        let mut counter = TasbeehCounter::load(&storage);
        let event = counter.increment("1", now).unwrap();
        assert_eq!(event.daily_count, u32::MAX);
        assert_eq!(event.total_count, u64::MAX);
    }

    #[test]
    fn reset_daily_keeps_total() {
        let (_, mut counter) = counter();
        let now = Utc::now();
        let id = counter.create("Istighfar", 2, now).unwrap().id.clone();
        for _ in 0..4 {
            counter.increment(&id, now).unwrap();
        }
        assert_eq!(counter.get(&id).unwrap().progress_percent(), 100.0);

        let event = counter.reset_daily(&id, now).unwrap();
        assert_eq!(event.daily_count, 0);
        assert_eq!(event.total_count, 4);
        assert_eq!(event.progress_percent(), 0.0);
    }

    #[test]
    fn resolve_by_name_and_delete() {
        let (_, mut counter) = counter();
        let now = Utc::now();
        let id = counter.create("Takbir", 33, now).unwrap().id.clone();
        assert_eq!(counter.resolve("takbir").unwrap(), id);
        assert_eq!(counter.resolve(&id).unwrap(), id);

        counter.delete(&id).unwrap();
        assert!(counter.events().is_empty());
        assert!(matches!(counter.resolve("Takbir"), Err(FeatureError::NotFound { .. })));
    }
}
