//! Shared helpers for CLI commands.

use chrono::{Local, NaiveDate};
use studypro_core::store::Record;
use studypro_core::{KvStore, RecordId, RecordStore};

pub const TASKS_KEY: &str = "tasks";
pub const SUBJECTS_KEY: &str = "subjects";
pub const SESSIONS_KEY: &str = "sessions";
pub const TIMER_KEY: &str = "timer";

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn open_kv() -> Result<KvStore, Box<dyn std::error::Error>> {
    Ok(KvStore::open()?)
}

/// Load a persisted collection, or an empty one if never saved.
pub fn load_collection<T: Record>(
    kv: &KvStore,
    key: &str,
) -> Result<RecordStore<T>, Box<dyn std::error::Error>> {
    Ok(kv.get(key)?.unwrap_or_default())
}

pub fn save_collection<T: Record>(
    kv: &KvStore,
    key: &str,
    store: &RecordStore<T>,
) -> Result<(), Box<dyn std::error::Error>> {
    kv.set(key, store)?;
    Ok(())
}

pub fn parse_id(raw: &str) -> Result<RecordId, Box<dyn std::error::Error>> {
    let n: u64 = raw.parse().map_err(|_| format!("invalid id: {raw}"))?;
    Ok(RecordId(n))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
