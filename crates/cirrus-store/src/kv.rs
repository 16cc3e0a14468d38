//! Key-value storage backends.
//!
//! The app only needs string lists and booleans, so the store surface is
//! deliberately small. `JsonFileStore` keeps everything in one JSON object
//! file under the config directory; `MemoryStore` backs tests.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Minimal key-value persistence: string lists and booleans.
pub trait KeyValueStore: Send + Sync {
    fn get_list(&self, key: &str) -> Result<Option<Vec<String>>, StoreError>;
    fn set_list(&self, key: &str, value: &[String]) -> Result<(), StoreError>;
    fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError>;
    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError>;
}

/// Single-file JSON store, written through on every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open or create the store file at `dir/cirrus_store.json`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join("cirrus_store.json");
        let data = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Store file unreadable, starting fresh: {}", e);
                Map::new()
            })
        } else {
            Map::new()
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    fn flush(&self, data: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&Value::Object(data.clone()))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_list(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        let data = self.data.lock();
        match data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    fn set_list(&self, key: &str, value: &[String]) -> Result<(), StoreError> {
        let mut data = self.data.lock();
        data.insert(key.to_string(), serde_json::to_value(value)?);
        self.flush(&data)
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        let data = self.data.lock();
        Ok(data.get(key).and_then(Value::as_bool))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        let mut data = self.data.lock();
        data.insert(key.to_string(), Value::Bool(value));
        self.flush(&data)
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_list(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        let data = self.data.lock();
        match data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    fn set_list(&self, key: &str, value: &[String]) -> Result<(), StoreError> {
        self.data
            .lock()
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.data.lock().get(key).and_then(Value::as_bool))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.data.lock().insert(key.to_string(), Value::Bool(value));
        Ok(())
    }
}
