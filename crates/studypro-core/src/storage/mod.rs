mod kv;
mod settings;

pub use kv::KvStore;
pub use settings::{NotificationSettings, PreferenceSettings, Settings};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/studypro[-dev]/` based on STUDYPRO_ENV.
///
/// Set STUDYPRO_ENV=dev to use the development data directory, or
/// STUDYPRO_DATA_DIR to point somewhere else entirely (tests use this).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = if let Ok(dir) = std::env::var("STUDYPRO_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("STUDYPRO_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("studypro-dev")
        } else {
            base_dir.join("studypro")
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
