use chrono::{DateTime, Duration, Utc};

use crate::db::{Storage, StorageKey};
use crate::features::collection::Collection;
use crate::features::error::{FeatureError, optional, required};
use crate::models::{Habit, id};

/// Time since the last relapse (or the start date), split for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct StreakDuration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl StreakDuration {
    /// Negative spans (a reference date in the future) clamp to zero.
    pub fn from_duration(elapsed: Duration) -> Self {
        let total_minutes = elapsed.num_minutes().max(0);
        Self {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        }
    }

    pub fn tier(&self) -> StreakTier {
        StreakTier::for_days(self.days)
    }
}

impl std::fmt::Display for StreakDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StreakTier {
    JustStarted,
    Building,
    Strong,
    Committed,
    Transformed,
    Legendary,
}

impl StreakTier {
    pub fn for_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => StreakTier::JustStarted,
            1..=6 => StreakTier::Building,
            7..=29 => StreakTier::Strong,
            30..=89 => StreakTier::Committed,
            90..=364 => StreakTier::Transformed,
            _ => StreakTier::Legendary,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreakTier::JustStarted => "Just started",
            StreakTier::Building => "Building",
            StreakTier::Strong => "Strong",
            StreakTier::Committed => "Committed",
            StreakTier::Transformed => "Transformed",
            StreakTier::Legendary => "Legendary",
        }
    }
}

pub fn elapsed(habit: &Habit, now: DateTime<Utc>) -> StreakDuration {
    StreakDuration::from_duration(now.signed_duration_since(habit.streak_start()))
}

pub struct HabitTracker {
    habits: Collection<Habit>,
}

impl HabitTracker {
    pub fn load(storage: &Storage) -> Self {
        Self {
            habits: Collection::open(storage, StorageKey::Habits, Vec::new()),
        }
    }

    pub fn habits(&self) -> &[Habit] {
        self.habits.items()
    }

    pub fn resolve(&self, key: &str) -> Result<String, FeatureError> {
        self.habits
            .get(key)
            .or_else(|| {
                self.habits
                    .items()
                    .iter()
                    .find(|h| h.name.eq_ignore_ascii_case(key.trim()))
            })
            .map(|h| h.id.clone())
            .ok_or_else(|| FeatureError::not_found("habit", key))
    }

    pub fn add(
        &mut self,
        name: &str,
        description: Option<&str>,
        start_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<&Habit, FeatureError> {
        let name = required(name, "a habit name")?;
        let habit = Habit {
            id: id::next_id(now),
            name,
            description: optional(description),
            start_date,
            last_relapse_date: None,
        };
        Ok(self.habits.push(habit))
    }

    /// Record a relapse; the streak restarts from `at`.
    pub fn relapse(&mut self, id: &str, at: DateTime<Utc>) -> Result<&Habit, FeatureError> {
        self.habits
            .update(id, |h| h.last_relapse_date = Some(at))
            .ok_or_else(|| FeatureError::not_found("habit", id))
    }

    pub fn delete(&mut self, id: &str) -> Result<Habit, FeatureError> {
        self.habits
            .remove(id)
            .ok_or_else(|| FeatureError::not_found("habit", id))
    }

    /// Habits with their current streak, longest first.
    pub fn streaks(&self, now: DateTime<Utc>) -> Vec<(&Habit, StreakDuration)> {
        let mut out: Vec<(&Habit, StreakDuration)> = self
            .habits
            .items()
            .iter()
            .map(|h| (h, elapsed(h, now)))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }
}
