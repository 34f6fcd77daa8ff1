//! Countdown timer implementation.
//!
//! The countdown is a tick-based state machine. It does not own a clock --
//! the caller (or [`TickDriver`](super::TickDriver)) invokes `tick()` once per
//! elapsed second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Idle | Expired)
//! ```
//!
//! Pausing returns to `Idle` with the remaining time preserved. Reaching zero
//! forces `Expired`; an expired timer ignores `start()` until `reset()`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default session length: 25 minutes.
pub const DEFAULT_SESSION_SECS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    /// Countdown reached zero and the user hasn't reset yet.
    Expired,
}

/// Core countdown state machine.
///
/// `remaining_secs` is authoritative, only decreases while running, and
/// never goes below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    /// Duration restored by `reset()`, in seconds.
    default_secs: u32,
    remaining_secs: u32,
    phase: TimerPhase,
    /// Whether the current `Idle` phase was reached via `pause()`.
    #[serde(default)]
    paused: bool,
}

impl CountdownTimer {
    /// Create a timer with the given session length, ready to start.
    pub fn new(default_secs: u32) -> Self {
        Self {
            default_secs,
            remaining_secs: default_secs,
            phase: TimerPhase::Idle,
            paused: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn default_secs(&self) -> u32 {
        self.default_secs
    }

    /// 0.0 .. 1.0 progress through the session.
    pub fn progress(&self) -> f64 {
        if self.default_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.default_secs as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::Snapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.default_secs,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or continue after a pause) the countdown.
    ///
    /// Emits `TimerStarted` for a fresh start and `TimerResumed` when
    /// continuing after a pause. No-op while already running. Also a no-op
    /// when expired or when no time remains -- a stale timer must be
    /// `reset()` first.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Idle if self.remaining_secs > 0 => {
                self.phase = TimerPhase::Running;
                let event = if self.paused {
                    Event::TimerResumed {
                        remaining_secs: self.remaining_secs,
                        at: Utc::now(),
                    }
                } else {
                    Event::TimerStarted {
                        duration_secs: self.remaining_secs,
                        at: Utc::now(),
                    }
                };
                self.paused = false;
                Some(event)
            }
            _ => None,
        }
    }

    /// Stop ticking, preserving the remaining time exactly.
    pub fn pause(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Running => {
                self.phase = TimerPhase::Idle;
                self.paused = true;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Return to idle with the configured session length, from any phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.default_secs;
        self.paused = false;
        Some(Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// One elapsed-second decrement. Call once per second while running.
    ///
    /// Returns `Some(Event::TimerExpired)` when the countdown hits zero.
    /// Ticks in any other phase are no-ops, so a stale tick that fires after
    /// a pause or reset cannot decrement state that has moved on.
    pub fn tick(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Expired;
            return Some(Event::TimerExpired { at: Utc::now() });
        }
        None
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_SECS)
    }
}
