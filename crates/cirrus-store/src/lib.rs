//! Local persistence for Cirrus: recent/favorite city lists and the
//! temperature unit preference, backed by a simple key-value store.

pub mod kv;
pub mod lists;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use lists::{CityLists, FAVORITE_LIMIT, RECENT_LIMIT};
