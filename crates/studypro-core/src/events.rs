use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerPhase;

/// Every countdown state change produces an Event.
/// The UI polls for events; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown continued after a pause, as opposed to a fresh start.
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero; the timer will not tick again until reset.
    TimerExpired {
        at: DateTime<Utc>,
    },
    Snapshot {
        phase: TimerPhase,
        remaining_secs: u32,
        total_secs: u32,
        at: DateTime<Utc>,
    },
}
