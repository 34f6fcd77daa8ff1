//! User settings.
//!
//! Stores notification toggles and study preferences as one JSON blob under
//! the `settings` key of the [`KvStore`](super::KvStore). Every field has a
//! serde default so settings saved by older versions keep loading.

use serde::{Deserialize, Serialize};

use super::KvStore;
use crate::error::StorageError;

const SETTINGS_KEY: &str = "settings";

/// Notification toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub email: bool,
    #[serde(default = "default_true")]
    pub push: bool,
    #[serde(default = "default_true")]
    pub study_reminders: bool,
    #[serde(default = "default_true")]
    pub task_deadlines: bool,
    #[serde(default)]
    pub weekly_reports: bool,
}

/// Study preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceSettings {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub auto_break_reminders: bool,
    /// Countdown session length in minutes.
    #[serde(default = "default_session_length")]
    pub study_session_length: u32,
    #[serde(default = "default_break_length")]
    pub break_length: u32,
}

/// User settings blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub preferences: PreferenceSettings,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_language() -> String {
    "en".into()
}
fn default_timezone() -> String {
    "UTC-5".into()
}
fn default_session_length() -> u32 {
    25
}
fn default_break_length() -> u32 {
    5
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            study_reminders: true,
            task_deadlines: true,
            weekly_reports: false,
        }
    }
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            timezone: default_timezone(),
            sound_enabled: true,
            auto_break_reminders: true,
            study_session_length: default_session_length(),
            break_length: default_break_length(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: NotificationSettings::default(),
            preferences: PreferenceSettings::default(),
        }
    }
}

impl Settings {
    /// Load from the store, or defaults if never saved.
    pub fn load(store: &KvStore) -> Result<Self, StorageError> {
        Ok(store.get(SETTINGS_KEY)?.unwrap_or_default())
    }

    /// Persist the full blob.
    pub fn save(&self, store: &KvStore) -> Result<(), StorageError> {
        store.set(SETTINGS_KEY, self)
    }

    /// Get a value as string by dot-separated key,
    /// e.g. `preferences.study_session_length`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. The new value must parse into the
    /// type of the existing field.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| StorageError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| StorageError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), StorageError> {
    let unknown = || StorageError::UnknownKey(key.to_string());
    let invalid = |message: String| StorageError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    serde_json::Value::Number(n.into())
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current.get_mut(part).ok_or_else(unknown)?;
    }

    Err(unknown())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert!(parsed.notifications.email);
        assert!(!parsed.notifications.weekly_reports);
        assert_eq!(parsed.preferences.study_session_length, 25);
        assert_eq!(parsed.preferences.break_length, 5);
        assert_eq!(parsed.preferences.language, "en");
    }

    #[test]
    fn partial_blob_fills_in_defaults() {
        let parsed: Settings =
            serde_json::from_str(r#"{"preferences": {"language": "fr"}}"#).unwrap();
        assert_eq!(parsed.preferences.language, "fr");
        assert_eq!(parsed.preferences.study_session_length, 25);
        assert!(parsed.notifications.push);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("notifications.email").as_deref(), Some("true"));
        assert_eq!(
            settings.get("preferences.study_session_length").as_deref(),
            Some("25")
        );
        assert!(settings.get("preferences.missing").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut settings = Settings::default();
        settings.set("notifications.weekly_reports", "true").unwrap();
        assert!(settings.notifications.weekly_reports);

        settings.set("preferences.study_session_length", "50").unwrap();
        assert_eq!(settings.preferences.study_session_length, 50);

        settings.set("preferences.timezone", "UTC+1").unwrap();
        assert_eq!(settings.preferences.timezone, "UTC+1");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("preferences.nonexistent", "1"),
            Err(StorageError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("notifications.email", "not_a_bool"),
            Err(StorageError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_and_save_through_kv_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::with_path(dir.path().join("store.json"));

        let loaded = Settings::load(&store).unwrap();
        assert_eq!(loaded.preferences.break_length, 5);

        let mut settings = loaded;
        settings.preferences.break_length = 10;
        settings.save(&store).unwrap();

        let reloaded = Settings::load(&store).unwrap();
        assert_eq!(reloaded.preferences.break_length, 10);
    }
}
