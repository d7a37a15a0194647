pub mod migrations;
pub mod store;

pub use store::{SqliteStore, Storage, StorageKey};

#[cfg(test)]
pub use store::MemoryStore;
