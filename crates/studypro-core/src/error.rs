//! Core error types for studypro-core.
//!
//! Errors are surfaced to the presentation layer as transient notices and are
//! never fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studypro-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Record store errors.
///
/// Mutating an unknown id is the only way a store operation can fail.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Record with the given id does not exist in the collection
    #[error("Record {id} not found in {collection}")]
    NotFound { collection: &'static str, id: u64 },
}

/// Authentication errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Login credential mismatch
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signup with an already-registered email
    #[error("Email already exists: {0}")]
    EmailExists(String),

    /// Operation that requires a logged-in user
    #[error("Not logged in")]
    NotLoggedIn,
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the backing file
    #[error("Failed to load store at {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the backing file
    #[error("Failed to save store at {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// Unknown settings key in a dot-path get/set
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Value cannot be parsed into the type of the existing settings field
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
