//! Countdown timer state machine and its tick driver.

mod countdown;
mod driver;

pub use countdown::{CountdownTimer, TimerPhase, DEFAULT_SESSION_SECS};
pub use driver::TickDriver;
