use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

use crate::db::migrations::run_migrations;

#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::collections::HashMap;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage is read-only, rejected write to '{0}'")]
    ReadOnly(String),
}

// ─── Storage keys ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    TasbeehEvents,
    Notes,
    Tasks,
    CalendarEvents,
    FinanceEntries,
    Habits,
    Alarms,
    PrayerTimes,
    StopwatchState,
}

impl StorageKey {
    pub fn all() -> [StorageKey; 9] {
        [
            StorageKey::TasbeehEvents,
            StorageKey::Notes,
            StorageKey::Tasks,
            StorageKey::CalendarEvents,
            StorageKey::FinanceEntries,
            StorageKey::Habits,
            StorageKey::Alarms,
            StorageKey::PrayerTimes,
            StorageKey::StopwatchState,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::TasbeehEvents => "life-trifecta-tasbeeh-events",
            StorageKey::Notes => "life-trifecta-notes",
            StorageKey::Tasks => "life-trifecta-tasks",
            StorageKey::CalendarEvents => "life-trifecta-calendar-events",
            StorageKey::FinanceEntries => "life-trifecta-finance-entries",
            StorageKey::Habits => "life-trifecta-habits",
            StorageKey::Alarms => "life-trifecta-alarms",
            StorageKey::PrayerTimes => "life-trifecta-prayer-times",
            StorageKey::StopwatchState => "life-trifecta-stopwatch-state",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageKey::all()
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown storage key: {}", s))
    }
}

// ─── Substrates ──────────────────────────────────────────────────────────────

/// Synchronous string-keyed storage, the same shape as a browser's localStorage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Opening database at {:?}", path))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        run_migrations(&conn).context("Running migrations")?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                params![key, value],
            )
            .map_err(|e| write_error(key, e))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| write_error(key, e))?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }
}

fn write_error(key: &str, e: rusqlite::Error) -> StoreError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ReadOnly) => StoreError::ReadOnly(key.to_string()),
        _ => StoreError::Sqlite(e),
    }
}

/// In-process substrate. Writes can be switched off to simulate a full or
/// unavailable store.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    read_only: Cell<bool>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only.get() {
            return Err(StoreError::ReadOnly(key.to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        if self.read_only.get() {
            return Err(StoreError::ReadOnly(key.to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.items.borrow().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// Typed JSON persistence over a [`KeyValueStore`].
///
/// `save` never fails from the caller's point of view: errors are logged and
/// dropped, so in-memory state stays authoritative until the next reload.
/// `load` never fails either: a missing or unreadable value yields the
/// supplied default.
#[derive(Clone)]
pub struct Storage {
    backend: Rc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            log::error!("Error saving '{}' to storage: {}", key, e);
        }
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.backend.set_item(key.as_str(), &json)
    }

    pub fn load<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        match self.backend.get_item(key.as_str()) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("Error loading '{}' from storage: {}", key, e);
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                log::warn!("Error loading '{}' from storage: {}", key, e);
                default
            }
        }
    }

    /// Every stored collection keyed by its storage name.
    pub fn export_all(&self) -> Result<Map<String, Value>, StoreError> {
        let mut out = Map::new();
        for key in StorageKey::all() {
            if let Some(raw) = self.backend.get_item(key.as_str())? {
                let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
                out.insert(key.as_str().to_string(), value);
            }
        }
        Ok(out)
    }

    /// Write back a map produced by [`Storage::export_all`]. Returns the number
    /// of collections written.
    pub fn import_all(&self, map: &Map<String, Value>) -> Result<usize, StoreError> {
        let mut written = 0;
        for (name, value) in map {
            match StorageKey::from_str(name) {
                Ok(key) => {
                    let json = serde_json::to_string(value)?;
                    self.backend.set_item(key.as_str(), &json)?;
                    written += 1;
                }
                Err(_) => log::warn!("Skipping unknown key '{}' during import", name),
            }
        }
        Ok(written)
    }

    /// Remove every known collection. Rows under foreign keys are left alone.
    /// Returns the number of collections removed.
    pub fn clear_all(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for name in self.stored_keys()? {
            if let Ok(key) = StorageKey::from_str(&name) {
                self.backend.remove_item(key.as_str())?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn stored_keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys()
    }
}

#[cfg(test)]
impl Storage {
    /// Share a backend the caller keeps a handle to, so tests can flip it
    /// read-only mid-run.
    pub fn shared(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Alarm, CalendarEvent, ClockTime, EntryKind, FinanceEntry, Habit, Note, PrayerTime,
        StopwatchState, Task, TasbeehEvent, default_prayer_times,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde::Deserialize;
    use std::fmt::Debug;

    fn ts(h: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, h, 15, 0).unwrap()
    }

    fn assert_round_trip<T>(storage: &Storage, key: StorageKey, value: T, default: T)
    where
        T: Serialize + for<'de> Deserialize<'de> + PartialEq + Debug,
    {
        storage.save(key, &value);
        let loaded: T = storage.load(key, default);
        assert_eq!(loaded, value);
    }

    #[test]
    fn every_entity_survives_save_then_load() {
        let storage = Storage::new(MemoryStore::new());

        assert_round_trip(
            &storage,
            StorageKey::TasbeehEvents,
            vec![TasbeehEvent {
                id: "1".into(),
                name: "SubhanAllah".into(),
                daily_goal: 33,
                daily_count: 12,
                total_count: 400,
                last_updated: ts(6),
            }],
            Vec::new(),
        );
        assert_round_trip(
            &storage,
            StorageKey::Notes,
            vec![Note {
                id: "2".into(),
                title: "Groceries".into(),
                content: "milk, dates".into(),
                created_at: ts(7),
                updated_at: ts(8),
            }],
            Vec::new(),
        );
        assert_round_trip(
            &storage,
            StorageKey::Tasks,
            vec![Task {
                id: "3".into(),
                title: "File taxes".into(),
                description: None,
                completed: false,
                due_date: Some(ts(9)),
                reminder_time: None,
                created_at: ts(7),
                updated_at: ts(7),
            }],
            Vec::new(),
        );
        assert_round_trip(
            &storage,
            StorageKey::CalendarEvents,
            vec![CalendarEvent {
                id: "4".into(),
                date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
                title: "Dentist".into(),
                description: Some("bring card".into()),
                created_at: ts(10),
            }],
            Vec::new(),
        );
        assert_round_trip(
            &storage,
            StorageKey::FinanceEntries,
            vec![FinanceEntry {
                id: "5".into(),
                kind: EntryKind::Expense,
                amount: 12.5,
                description: "lunch".into(),
                category: "food".into(),
                date: ts(12),
                created_at: ts(12),
            }],
            Vec::new(),
        );
        assert_round_trip(
            &storage,
            StorageKey::Habits,
            vec![Habit {
                id: "6".into(),
                name: "No sugar".into(),
                description: None,
                start_date: ts(1),
                last_relapse_date: Some(ts(2)),
            }],
            Vec::new(),
        );
        assert_round_trip(
            &storage,
            StorageKey::Alarms,
            vec![Alarm {
                id: "7".into(),
                time: ClockTime::from_hm(6, 45).unwrap(),
                label: "Wake".into(),
                enabled: true,
                days_of_week: [false, true, true, true, true, true, false],
            }],
            Vec::new(),
        );
        assert_round_trip(
            &storage,
            StorageKey::PrayerTimes,
            vec![PrayerTime {
                id: "8".into(),
                name: "Fajr".into(),
                time: ClockTime::from_hm(5, 1).unwrap(),
                enabled: false,
            }],
            default_prayer_times(),
        );
        assert_round_trip(
            &storage,
            StorageKey::StopwatchState,
            StopwatchState {
                time: 0,
                is_running: true,
                start_time: Some(1_700_000_000_000),
            },
            StopwatchState::default(),
        );
    }

    #[test]
    fn missing_key_returns_supplied_default() {
        let storage = Storage::new(MemoryStore::new());
        let loaded: Vec<PrayerTime> = storage.load(StorageKey::PrayerTimes, default_prayer_times());
        assert_eq!(loaded, default_prayer_times());

        let empty: Vec<Note> = storage.load(StorageKey::Notes, Vec::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn corrupt_value_returns_supplied_default() {
        let backend = Rc::new(MemoryStore::new());
        backend
            .set_item(StorageKey::Notes.as_str(), "{not json")
            .unwrap();
        let storage = Storage { backend };

        let loaded: Vec<Note> = storage.load(StorageKey::Notes, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn failed_write_is_swallowed() {
        let backend = Rc::new(MemoryStore::new());
        let storage = Storage::shared(backend.clone());
        storage.save(StorageKey::Habits, &Vec::<Habit>::new());

        backend.set_read_only(true);
        let habits = vec![Habit {
            id: "1".into(),
            name: "Walk".into(),
            description: None,
            start_date: ts(1),
            last_relapse_date: None,
        }];
        storage.save(StorageKey::Habits, &habits);

        let loaded: Vec<Habit> = storage.load(StorageKey::Habits, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn sqlite_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trifecta.db");

        {
            let storage = Storage::new(SqliteStore::open(&path).unwrap());
            storage.save(StorageKey::Tasks, &vec!["placeholder"]);
            storage.save(StorageKey::Tasks, &Vec::<Task>::new());
        }

        let storage = Storage::new(SqliteStore::open(&path).unwrap());
        let tasks: Vec<Task> = storage.load(StorageKey::Tasks, vec![]);
        assert!(tasks.is_empty());
        assert_eq!(storage.stored_keys().unwrap(), vec!["life-trifecta-tasks".to_string()]);
    }

    #[test]
    fn export_import_and_clear() {
        let source = Storage::new(MemoryStore::new());
        source.save(StorageKey::PrayerTimes, &default_prayer_times());
        source.save(StorageKey::StopwatchState, &StopwatchState::default());

        let mut exported = source.export_all().unwrap();
        assert_eq!(exported.len(), 2);
        exported.insert("someone-elses-key".into(), Value::Bool(true));

        let target = Storage::new(MemoryStore::new());
        assert_eq!(target.import_all(&exported).unwrap(), 2);
        let prayers: Vec<PrayerTime> = target.load(StorageKey::PrayerTimes, Vec::new());
        assert_eq!(prayers, default_prayer_times());

        target.backend.set_item("someone-elses-key", "true").unwrap();
        assert_eq!(target.clear_all().unwrap(), 2);
        assert_eq!(target.stored_keys().unwrap(), vec!["someone-elses-key".to_string()]);
        assert_eq!(target.clear_all().unwrap(), 0);
    }

    #[test]
    fn storage_key_parses_its_own_name() {
        for key in StorageKey::all() {
            assert_eq!(StorageKey::from_str(key.as_str()).unwrap(), key);
        }
        assert!(StorageKey::from_str("life-trifecta-unknown").is_err());
    }
}
