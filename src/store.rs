//! Durable key-value storage backing the saved-questions collection.
//!
//! A single JSON file maps string keys to arbitrary JSON values. Reads never
//! fail: a missing file, missing key, or corrupt value falls back to the
//! caller-supplied default so a damaged store cannot take the app down.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode store value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed key-value store
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
}

impl KvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Option<HashMap<String, serde_json::Value>> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::warn!("store file {} is corrupt: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Read a value, falling back to `default` on any read or decode failure
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(map) = self.read_map() else {
            return default;
        };
        let Some(value) = map.get(key) else {
            return default;
        };
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("stored value for {} does not decode: {}", key, e);
                default
            }
        }
    }

    /// Write a value under `key`, keeping other keys intact
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), serde_json::to_value(value)?);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}
