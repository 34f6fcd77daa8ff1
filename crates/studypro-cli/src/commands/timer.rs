//! Study timer commands.
//!
//! The countdown is tick-based, so between CLI invocations the persisted
//! timer catches up: elapsed wall-clock seconds since the last touch are
//! applied as ticks before the command runs.

use chrono::Utc;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use studypro_core::{CountdownTimer, KvStore, Settings};

use crate::common::{open_kv, print_json, CliResult, TIMER_KEY};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown, preserving remaining time
    Pause,
    /// Reset to the configured session length
    Reset,
    /// Print current timer state as JSON
    Status,
}

/// Countdown timer plus the wall-clock anchor for catch-up ticking.
#[derive(Serialize, Deserialize)]
struct PersistedTimer {
    timer: CountdownTimer,
    /// Epoch seconds of the last applied tick; `None` while not running.
    last_tick_epoch_s: Option<i64>,
}

impl PersistedTimer {
    fn load(kv: &KvStore) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(persisted) = kv.get::<PersistedTimer>(TIMER_KEY)? {
            return Ok(persisted);
        }
        let settings = Settings::load(kv)?;
        Ok(Self {
            timer: CountdownTimer::new(settings.preferences.study_session_length.saturating_mul(60)),
            last_tick_epoch_s: None,
        })
    }

    fn save(&self, kv: &KvStore) -> Result<(), Box<dyn std::error::Error>> {
        kv.set(TIMER_KEY, self)?;
        Ok(())
    }

    /// Apply one tick per wall-clock second elapsed since the last touch.
    fn catch_up(&mut self, now_epoch_s: i64) {
        if let Some(last) = self.last_tick_epoch_s {
            let elapsed = now_epoch_s.saturating_sub(last).max(0) as u64;
            // Expiry makes further ticks no-ops, so a capped loop suffices.
            let ticks = elapsed.min(u64::from(self.timer.remaining_secs()));
            for _ in 0..ticks {
                self.timer.tick();
            }
        }
        if self.timer.is_running() {
            self.last_tick_epoch_s = Some(now_epoch_s);
        } else {
            self.last_tick_epoch_s = None;
        }
    }
}

pub fn run(action: TimerAction) -> CliResult {
    let kv = open_kv()?;
    let mut persisted = PersistedTimer::load(&kv)?;
    let now = Utc::now().timestamp();
    persisted.catch_up(now);

    match action {
        TimerAction::Start => {
            if let Some(event) = persisted.timer.start() {
                persisted.last_tick_epoch_s = Some(now);
                print_json(&event)?;
            } else {
                // Already running, or expired and awaiting reset.
                print_json(&persisted.timer.snapshot())?;
            }
        }
        TimerAction::Pause => {
            persisted.last_tick_epoch_s = None;
            if let Some(event) = persisted.timer.pause() {
                print_json(&event)?;
            } else {
                print_json(&persisted.timer.snapshot())?;
            }
        }
        TimerAction::Reset => {
            persisted.last_tick_epoch_s = None;
            if let Some(event) = persisted.timer.reset() {
                print_json(&event)?;
            }
        }
        TimerAction::Status => {
            print_json(&persisted.timer.snapshot())?;
        }
    }

    persisted.save(&kv)?;
    Ok(())
}
