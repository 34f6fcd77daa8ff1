//! # StudyPro Core Library
//!
//! Core logic for the StudyPro study-tracking dashboard. The CLI binary and
//! any GUI layer are thin shells over this library.
//!
//! ## Architecture
//!
//! - **Countdown Timer**: a tick-based state machine; the caller (or the
//!   tokio-backed [`TickDriver`]) invokes `tick()` once per elapsed second
//! - **Record Store**: one generic in-memory collection pattern shared by
//!   tasks, subjects, and calendar sessions
//! - **Storage**: a key-value file of JSON blobs plus user settings
//! - **Auth**: mock login/signup with an explicit session context
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: countdown state machine
//! - [`RecordStore`]: collection with add/update/remove/filter/aggregate
//! - [`KvStore`]: persisted key-value blobs
//! - [`AuthSession`]: session lifecycle (load-on-start, clear-on-logout)

pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod storage;
pub mod store;
pub mod subject;
pub mod task;
pub mod timer;

pub use auth::{AuthSession, ProfileUpdate, SignupData, UserProfile};
pub use dashboard::DashboardSummary;
pub use error::{AuthError, CoreError, Result, StorageError, StoreError};
pub use events::Event;
pub use storage::{KvStore, Settings};
pub use store::{Record, RecordId, RecordStore};
pub use subject::{Difficulty, Subject, SubjectStats};
pub use task::{Priority, Task, TaskFilter, TaskStats};
pub use timer::{CountdownTimer, TickDriver, TimerPhase, DEFAULT_SESSION_SECS};

/// The three record collections the dashboard manages.
pub type TaskStore = RecordStore<Task>;
pub type SubjectStore = RecordStore<Subject>;
pub type StudySessionStore = RecordStore<calendar::StudySession>;
