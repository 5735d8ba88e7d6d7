//! Round clock fed by host time

use serde::{Deserialize, Serialize};

/// Elapsed time since the round started.
///
/// Host time is injected in milliseconds so the clock advances only when the
/// session is advanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundClock {
    start_ms: f64,
    now_ms: f64,
}

impl RoundClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            now_ms,
        }
    }

    /// Restart from `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.now_ms = now_ms;
    }

    /// Move the clock forward; earlier times are ignored
    pub fn advance_to(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.now_ms - self.start_ms) / 1000.0
    }
}
