use chrono::{DateTime, Utc};

use crate::db::{Storage, StorageKey};
use crate::features::collection::Collection;
use crate::features::error::{FeatureError, optional, required};
use crate::models::{Task, id};

pub struct TodoList {
    tasks: Collection<Task>,
}

impl TodoList {
    pub fn load(storage: &Storage) -> Self {
        Self {
            tasks: Collection::open(storage, StorageKey::Tasks, Vec::new()),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.items()
    }

    pub fn pending(&self) -> Vec<&Task> {
        self.tasks.items().iter().filter(|t| !t.completed).collect()
    }

    pub fn completed(&self) -> Vec<&Task> {
        self.tasks.items().iter().filter(|t| t.completed).collect()
    }

    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<&Task> {
        self.tasks
            .items()
            .iter()
            .filter(|t| t.is_overdue(now))
            .collect()
    }

    pub fn add(
        &mut self,
        title: &str,
        description: Option<&str>,
        due_date: Option<DateTime<Utc>>,
        reminder_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<&Task, FeatureError> {
        let title = required(title, "a task title")?;
        let task = Task {
            id: id::next_id(now),
            title,
            description: optional(description),
            completed: false,
            due_date,
            reminder_time,
            created_at: now,
            updated_at: now,
        };
        Ok(self.tasks.prepend(task))
    }

    pub fn toggle(&mut self, id: &str, now: DateTime<Utc>) -> Result<&Task, FeatureError> {
        self.tasks
            .update(id, |t| {
                t.completed = !t.completed;
                t.updated_at = now;
            })
            .ok_or_else(|| FeatureError::not_found("task", id))
    }

    pub fn delete(&mut self, id: &str) -> Result<Task, FeatureError> {
        self.tasks
            .remove(id)
            .ok_or_else(|| FeatureError::not_found("task", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::{Duration, TimeZone};

    #[test]
    fn toggle_moves_task_between_pending_and_completed() {
        let storage = Storage::new(MemoryStore::new());
        let mut todo = TodoList::load(&storage);
        let now = Utc::now();

        let id = todo.add("Water plants", None, None, None, now).unwrap().id.clone();
        todo.add("Call mum", Some("  "), None, None, now).unwrap();
        assert_eq!(todo.tasks()[0].title, "Call mum");
        assert_eq!(todo.tasks()[0].description, None);
        assert_eq!((todo.pending().len(), todo.completed().len()), (2, 0));

        todo.toggle(&id, now).unwrap();
        assert_eq!((todo.pending().len(), todo.completed().len()), (1, 1));

        let reloaded = TodoList::load(&storage);
        assert_eq!(reloaded.completed().len(), 1);
    }

    #[test]
    fn overdue_ignores_completed_and_undated_tasks() {
        let storage = Storage::new(MemoryStore::new());
        let mut todo = TodoList::load(&storage);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let yesterday = now - Duration::days(1);

        let late = todo.add("Pay rent", None, Some(yesterday), None, now).unwrap().id.clone();
        let done = todo.add("Renew passport", None, Some(yesterday), None, now).unwrap().id.clone();
        todo.add("Someday", None, None, None, now).unwrap();
        todo.add("Next week", None, Some(now + Duration::days(7)), None, now).unwrap();
        todo.toggle(&done, now).unwrap();

        let overdue: Vec<&str> = todo.overdue(now).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(overdue, vec![late.as_str()]);
    }

    #[test]
    fn empty_title_is_rejected() {
        let storage = Storage::new(MemoryStore::new());
        let mut todo = TodoList::load(&storage);
        assert_eq!(
            todo.add("", None, None, None, Utc::now()).unwrap_err(),
            FeatureError::EmptyField("a task title")
        );
    }
}
