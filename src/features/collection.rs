use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db::{Storage, StorageKey};
use crate::models::{Record, id};

/// In-memory working copy of one record collection.
///
/// Loaded once on open; every mutation writes the whole collection back.
pub struct Collection<T> {
    storage: Storage,
    key: StorageKey,
    items: Vec<T>,
}

impl<T> Collection<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    pub fn open(storage: &Storage, key: StorageKey, default: Vec<T>) -> Self {
        let items: Vec<T> = storage.load(key, default);
        for item in &items {
            id::observe(item.id());
        }
        log::debug!("loaded {} records from '{}'", items.len(), key);
        Self {
            storage: storage.clone(),
            key,
            items,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn push(&mut self, item: T) -> &T {
        self.items.push(item);
        self.persist();
        let last = self.items.len() - 1;
        &self.items[last]
    }

    pub fn prepend(&mut self, item: T) -> &T {
        self.items.insert(0, item);
        self.persist();
        &self.items[0]
    }

    pub fn update<F: FnOnce(&mut T)>(&mut self, id: &str, f: F) -> Option<&T> {
        let idx = self.items.iter().position(|item| item.id() == id)?;
        f(&mut self.items[idx]);
        self.persist();
        Some(&self.items[idx])
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.items.iter().position(|item| item.id() == id)?;
        let removed = self.items.remove(idx);
        self.persist();
        Some(removed)
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.persist();
    }

    fn persist(&self) {
        self.storage.save(self.key, &self.items);
    }
}
