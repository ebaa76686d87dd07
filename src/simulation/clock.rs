//! Turns wall-clock samples into a bounded per-tick step.

use std::time::Instant;

/**
 * Reference point for measuring how much time a tick should simulate.
 *
 * `elapsed` never goes negative and never exceeds `max_step_secs`, so a long
 * pause or a stalled process cannot feed the integrator one huge step. The
 * clock does not advance itself; the owner calls `reset` once the tick is done.
 */
#[derive(Debug, Clone)]
pub struct Clock {
    last_tick: Instant,
    max_step_secs: f64,
}

impl Clock {
    pub fn new(now: Instant, max_step_secs: f64) -> Clock {
        Clock {
            last_tick: now,
            max_step_secs,
        }
    }

    /// Seconds since the last reset, floored at 0 and capped at the maximum step.
    pub fn elapsed(&self, now: Instant) -> f64 {
        match now.checked_duration_since(self.last_tick) {
            Some(delta) => delta.as_secs_f64().min(self.max_step_secs),
            None => 0.0,
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
    }

    pub fn max_step_secs(&self) -> f64 {
        self.max_step_secs
    }
}
