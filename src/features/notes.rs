use chrono::{DateTime, Utc};

use crate::db::{Storage, StorageKey};
use crate::features::collection::Collection;
use crate::features::error::{FeatureError, required};
use crate::models::{Note, id};

pub struct NotesBook {
    notes: Collection<Note>,
}

impl NotesBook {
    pub fn load(storage: &Storage) -> Self {
        Self {
            notes: Collection::open(storage, StorageKey::Notes, Vec::new()),
        }
    }

    /// Newest first.
    pub fn notes(&self) -> &[Note] {
        self.notes.items()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Case-insensitive match on title or content. A blank query matches all.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let query = query.trim();
        self.notes
            .items()
            .iter()
            .filter(|n| query.is_empty() || n.matches(query))
            .collect()
    }

    pub fn create(&mut self, title: &str, content: &str, now: DateTime<Utc>) -> Result<&Note, FeatureError> {
        let title = required(title, "a note title")?;
        let note = Note {
            id: id::next_id(now),
            title,
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        Ok(self.notes.prepend(note))
    }

    pub fn update(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&Note, FeatureError> {
        let title = required(title, "a note title")?;
        let content = content.trim().to_string();
        self.notes
            .update(id, |n| {
                n.title = title;
                n.content = content;
                n.updated_at = now;
            })
            .ok_or_else(|| FeatureError::not_found("note", id))
    }

    pub fn delete(&mut self, id: &str) -> Result<Note, FeatureError> {
        self.notes
            .remove(id)
            .ok_or_else(|| FeatureError::not_found("note", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::{Duration, TimeZone};

    #[test]
    fn new_notes_go_first_and_edits_bump_updated_at() {
        let storage = Storage::new(MemoryStore::new());
        let mut book = NotesBook::load(&storage);
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        let first = book.create("Shopping", "eggs", t0).unwrap().id.clone();
        book.create("Ideas", "  a terminal clock  ", t0).unwrap();
        assert_eq!(book.notes()[0].title, "Ideas");
        assert_eq!(book.notes()[0].content, "a terminal clock");

        let later = t0 + Duration::minutes(5);
        let edited = book.update(&first, "Shopping list", "eggs, flour", later).unwrap();
        assert_eq!(edited.created_at, t0);
        assert_eq!(edited.updated_at, later);

        let reloaded = NotesBook::load(&storage);
        assert_eq!(reloaded.get(&first).unwrap().title, "Shopping list");
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let storage = Storage::new(MemoryStore::new());
        let mut book = NotesBook::load(&storage);
        let now = Utc::now();
        book.create("Recipes", "Lentil soup", now).unwrap();
        book.create("Travel", "Pack the charger", now).unwrap();

        assert_eq!(book.search("LENTIL").len(), 1);
        assert_eq!(book.search("travel").len(), 1);
        assert_eq!(book.search("").len(), 2);
        assert!(book.search("nothing").is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        let storage = Storage::new(MemoryStore::new());
        let mut book = NotesBook::load(&storage);
        assert!(book.create(" ", "body", Utc::now()).is_err());
        assert!(book.notes().is_empty());
        assert!(book.delete("missing").is_err());
    }
}
