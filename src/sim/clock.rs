//! Fixed-step gate over a variable-rate frame driver
//!
//! The host calls in on every display refresh with a monotonically
//! increasing timestamp; the gate opens at most once per fixed interval,
//! decoupling the simulation cadence from whatever rate the display runs at.

use crate::consts::STEP_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Reference timestamp of the last processed step (ms)
    start: f64,
    /// Gate threshold (ms)
    interval: f64,
}

impl FrameClock {
    pub fn new(now: f64) -> Self {
        Self {
            start: now,
            interval: STEP_INTERVAL_MS,
        }
    }

    /// Re-anchor after a pause so the backlog does not burst into a flurry
    /// of catch-up steps
    pub fn reset(&mut self, now: f64) {
        self.start = now;
    }

    /// True at most once per elapsed interval. Opening the gate moves the
    /// reference point to `now`.
    pub fn should_step(&mut self, now: f64) -> bool {
        if now - self.start > self.interval {
            self.start = now;
            true
        } else {
            false
        }
    }
}
