//! Launcher reload gate
//!
//! Progress climbs from 0 to 100 in fixed sub-steps of simulated time.
//! Starting a new cycle discards any partial sub-step, so overlapping
//! reloads can never compound.

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Reload {
    ready: bool,
    /// Percent, 0..=100
    progress: f32,
    /// Time banked toward the next sub-step (ms)
    accum_ms: f64,
}

impl Default for Reload {
    fn default() -> Self {
        Self {
            ready: true,
            progress: 100.0,
            accum_ms: 0.0,
        }
    }
}

impl Reload {
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Start a fresh cycle (called on fire)
    pub fn begin(&mut self) {
        self.ready = false;
        self.progress = 0.0;
        self.accum_ms = 0.0;
    }

    /// Advance by `dt_ms` of simulated time. Returns true on the tick the
    /// launcher becomes ready again.
    pub fn advance(&mut self, dt_ms: f64, tuning: &Tuning) -> bool {
        if self.ready {
            return false;
        }
        self.accum_ms += dt_ms;
        while self.accum_ms >= tuning.reload_step_ms {
            self.accum_ms -= tuning.reload_step_ms;
            self.progress += tuning.reload_increment();
            if self.progress >= 100.0 {
                self.progress = 100.0;
                self.ready = true;
                self.accum_ms = 0.0;
                return true;
            }
        }
        false
    }
}
