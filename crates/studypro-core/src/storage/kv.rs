//! Key-value persistence: string key to opaque JSON blob.
//!
//! Backed by a single `store.json` file in the data directory. Known keys:
//! `user`, `registered_users`, `settings`, `timer`, `tasks`, `subjects`,
//! `sessions`. A missing file reads as an empty store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::error::StorageError;

pub struct KvStore {
    path: PathBuf,
}

impl KvStore {
    /// Open the store in the data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self {
            path: data_dir()?.join("store.json"),
        })
    }

    /// Open a store backed by a specific file (tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read and deserialize the blob under `key`, if present.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let map = self.load_map()?;
        match map.get(key) {
            Some(value) => {
                let parsed = serde_json::from_value(value.clone()).map_err(|e| {
                    StorageError::LoadFailed {
                        path: self.path.clone(),
                        message: format!("key '{key}': {e}"),
                    }
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`, replacing any previous
    /// blob.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let mut map = self.load_map()?;
        let blob = serde_json::to_value(value).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        map.insert(key.to_string(), blob);
        self.save_map(&map)
    }

    /// Remove the blob under `key`. Absent keys are not an error.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.load_map()?;
        if map.remove(key).is_some() {
            self.save_map(&map)?;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.load_map()?.contains_key(key))
    }

    fn load_map(&self) -> Result<BTreeMap<String, serde_json::Value>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| StorageError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
            Err(_) => Ok(BTreeMap::new()),
        }
    }

    fn save_map(&self, map: &BTreeMap<String, serde_json::Value>) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(map).map_err(|e| StorageError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        std::fs::write(&self.path, content).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
