//! Recent and favorite city lists plus the unit preference.
//!
//! Both lists are bounded, unique, and most-recently-used-first. Every
//! mutation writes through to the backing store.

use crate::kv::{KeyValueStore, StoreError};

pub const RECENT_LIMIT: usize = 5;
pub const FAVORITE_LIMIT: usize = 10;

const RECENT_KEY: &str = "recent_cities";
const FAVORITE_KEY: &str = "favorite_cities";
const FAHRENHEIT_KEY: &str = "use_fahrenheit";

/// Manager for the persisted city lists and unit preference.
pub struct CityLists<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CityLists<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a city in the recent list: existing occurrence removed, new
    /// entry at the front, truncated to [`RECENT_LIMIT`].
    pub fn record_recent(&self, name: &str) -> Result<(), StoreError> {
        let mut list = self.recent()?;
        push_front_bounded(&mut list, name, RECENT_LIMIT);
        self.store.set_list(RECENT_KEY, &list)
    }

    /// Remove all occurrences of a city from the recent list.
    pub fn remove_recent(&self, name: &str) -> Result<(), StoreError> {
        let mut list = self.recent()?;
        list.retain(|entry| entry != name);
        self.store.set_list(RECENT_KEY, &list)
    }

    /// Toggle a city's favorite membership. Returns membership after the
    /// operation so the caller can report "added" vs "removed".
    pub fn toggle_favorite(&self, name: &str) -> Result<bool, StoreError> {
        let mut list = self.favorites()?;
        if list.iter().any(|entry| entry == name) {
            list.retain(|entry| entry != name);
            self.store.set_list(FAVORITE_KEY, &list)?;
            tracing::debug!("Removed favorite: {}", name);
            Ok(false)
        } else {
            push_front_bounded(&mut list, name, FAVORITE_LIMIT);
            self.store.set_list(FAVORITE_KEY, &list)?;
            tracing::debug!("Added favorite: {}", name);
            Ok(true)
        }
    }

    /// Remove all occurrences of a city from the favorites list.
    pub fn remove_favorite(&self, name: &str) -> Result<(), StoreError> {
        let mut list = self.favorites()?;
        list.retain(|entry| entry != name);
        self.store.set_list(FAVORITE_KEY, &list)
    }

    pub fn recent(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.store.get_list(RECENT_KEY)?.unwrap_or_default())
    }

    pub fn favorites(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.store.get_list(FAVORITE_KEY)?.unwrap_or_default())
    }

    /// Unit preference; defaults to Celsius (false).
    pub fn use_fahrenheit(&self) -> Result<bool, StoreError> {
        self.use_fahrenheit_or(false)
    }

    /// Unit preference, falling back to `default` while the store has no
    /// entry. Lets a config-file default apply on fresh installs without
    /// shadowing an explicit user toggle.
    pub fn use_fahrenheit_or(&self, default: bool) -> Result<bool, StoreError> {
        Ok(self.store.get_bool(FAHRENHEIT_KEY)?.unwrap_or(default))
    }

    pub fn set_use_fahrenheit(&self, value: bool) -> Result<(), StoreError> {
        self.store.set_bool(FAHRENHEIT_KEY, value)
    }
}

fn push_front_bounded(list: &mut Vec<String>, name: &str, max_len: usize) {
    list.retain(|entry| entry != name);
    list.insert(0, name.to_string());
    list.truncate(max_len);
}
