//! Once-per-second tick driver for the countdown timer.
//!
//! Owns the single cancellable repeating callback: `start()` replaces any
//! previous tick task, `pause()`/`reset()` abort it. There is never more
//! than one live tick task, so no stale tick can fire after the timer state
//! has moved on.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::countdown::CountdownTimer;
use crate::events::Event;

const TICK: Duration = Duration::from_secs(1);

/// Drives a shared [`CountdownTimer`] at 1 Hz on the tokio runtime.
pub struct TickDriver {
    timer: Arc<Mutex<CountdownTimer>>,
    tick_task: Option<JoinHandle<()>>,
}

impl TickDriver {
    pub fn new(timer: CountdownTimer) -> Self {
        Self {
            timer: Arc::new(Mutex::new(timer)),
            tick_task: None,
        }
    }

    /// Shared handle to the underlying timer state.
    pub fn timer(&self) -> Arc<Mutex<CountdownTimer>> {
        Arc::clone(&self.timer)
    }

    pub fn remaining_secs(&self) -> u32 {
        self.timer.lock().expect("timer lock poisoned").remaining_secs()
    }

    pub fn snapshot(&self) -> Event {
        self.timer.lock().expect("timer lock poisoned").snapshot()
    }

    /// Whether a tick task is currently live.
    pub fn is_ticking(&self) -> bool {
        self.tick_task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start the countdown and schedule the tick task.
    ///
    /// Returns `None` (and schedules nothing) if the timer refuses to start,
    /// e.g. it is already running or expired.
    pub fn start(&mut self) -> Option<Event> {
        let event = self.timer.lock().expect("timer lock poisoned").start()?;

        // Replace, never accumulate: at most one tick task at a time.
        self.cancel_tick_task();

        let timer = Arc::clone(&self.timer);
        self.tick_task = Some(tokio::spawn(async move {
            // First decrement lands a full second after start.
            let mut ticks = interval_at(Instant::now() + TICK, TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                let mut timer = timer.lock().expect("timer lock poisoned");
                timer.tick();
                if !timer.is_running() {
                    break;
                }
            }
        }));

        Some(event)
    }

    /// Pause the countdown and cancel the tick task.
    pub fn pause(&mut self) -> Option<Event> {
        self.cancel_tick_task();
        self.timer.lock().expect("timer lock poisoned").pause()
    }

    /// Reset the countdown and cancel the tick task.
    pub fn reset(&mut self) -> Option<Event> {
        self.cancel_tick_task();
        self.timer.lock().expect("timer lock poisoned").reset()
    }

    fn cancel_tick_task(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.cancel_tick_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerPhase;

    /// Advance paused tokio time one second at a time, yielding so the tick
    /// task gets polled between deadlines.
    async fn advance_secs(n: u32) {
        for _ in 0..n {
            // Let a freshly spawned tick task register its interval before
            // the clock moves.
            tokio::task::yield_now().await;
            tokio::time::advance(Duration::from_secs(1)).await;
        }
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_running() {
        let mut driver = TickDriver::new(CountdownTimer::new(10));
        assert!(driver.start().is_some());
        assert!(driver.is_ticking());

        advance_secs(3).await;
        assert_eq!(driver.remaining_secs(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_pending_ticks() {
        let mut driver = TickDriver::new(CountdownTimer::new(10));
        driver.start();
        advance_secs(2).await;

        assert!(driver.pause().is_some());
        assert!(!driver.is_ticking());

        // Time keeps passing, state does not.
        advance_secs(5).await;
        assert_eq!(driver.remaining_secs(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn start_immediately_followed_by_pause_leaves_remaining_unchanged() {
        let mut driver = TickDriver::new(CountdownTimer::new(1500));
        driver.start();
        driver.pause();
        assert_eq!(driver.remaining_secs(), 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_the_tick_task() {
        let mut driver = TickDriver::new(CountdownTimer::new(100));
        driver.start();
        advance_secs(2).await;
        driver.pause();
        driver.start();
        advance_secs(3).await;

        // 2 + 3 decrements total; a leaked first task would double-count.
        assert_eq!(driver.remaining_secs(), 95);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_stops_the_tick_task() {
        let mut driver = TickDriver::new(CountdownTimer::new(2));
        driver.start();
        advance_secs(2).await;

        assert_eq!(driver.remaining_secs(), 0);
        let timer = driver.timer();
        assert_eq!(timer.lock().unwrap().phase(), TimerPhase::Expired);

        advance_secs(3).await;
        assert_eq!(driver.remaining_secs(), 0);
        assert!(!driver.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_and_restores_default() {
        let mut driver = TickDriver::new(CountdownTimer::new(60));
        driver.start();
        advance_secs(10).await;

        driver.reset();
        assert!(!driver.is_ticking());
        assert_eq!(driver.remaining_secs(), 60);

        advance_secs(5).await;
        assert_eq!(driver.remaining_secs(), 60);
    }
}
