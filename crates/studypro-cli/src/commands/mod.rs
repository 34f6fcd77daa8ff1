pub mod auth;
pub mod calendar;
pub mod settings;
pub mod stats;
pub mod subject;
pub mod task;
pub mod timer;
