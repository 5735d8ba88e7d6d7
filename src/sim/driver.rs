//! Periodic tick drivers
//!
//! Accumulator timers standing in for the host's repeating callbacks. Host
//! time goes in, due ticks come out, in a fixed order.

use crate::consts::MAX_CATCHUP;
use crate::settings::Settings;

/// Which driver fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Physics + culling
    Frame,
    /// Fruit creation
    Spawn,
    /// Elapsed-time display refresh
    Clock,
}

/// A repeating timer with catch-up limit
#[derive(Debug, Clone, PartialEq)]
pub struct Periodic {
    interval_ms: f64,
    accumulator: f64,
    running: bool,
}

impl Periodic {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            accumulator: 0.0,
            running: false,
        }
    }

    /// Start (or restart) from a full interval away
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn set_interval(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms;
    }

    /// Feed elapsed time, returning how many ticks are due.
    ///
    /// At most `MAX_CATCHUP` ticks fire per call; the backlog beyond that is
    /// dropped to prevent a spiral of death.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.running || !(self.interval_ms > 0.0) || !(dt_ms.is_finite() && dt_ms > 0.0) {
            return 0;
        }
        self.accumulator += dt_ms;

        let mut due = 0;
        while self.accumulator >= self.interval_ms && due < MAX_CATCHUP {
            self.accumulator -= self.interval_ms;
            due += 1;
        }
        if due == MAX_CATCHUP && self.accumulator >= self.interval_ms {
            self.accumulator %= self.interval_ms;
        }
        due
    }
}

/// The three repeating callbacks of a session
#[derive(Debug, Clone, PartialEq)]
pub struct Drivers {
    pub frame: Periodic,
    pub spawn: Periodic,
    pub clock: Periodic,
}

impl Drivers {
    pub fn new(settings: &Settings) -> Self {
        Self {
            frame: Periodic::new(settings.frame_interval_ms),
            spawn: Periodic::new(settings.spawn_interval_min_ms),
            clock: Periodic::new(settings.clock_interval_ms),
        }
    }

    pub fn stop_all(&mut self) {
        self.frame.stop();
        self.spawn.stop();
        self.clock.stop();
    }

    /// Advance every running driver; due ticks are ordered frame, spawn, clock
    pub fn advance(&mut self, dt_ms: f64) -> Vec<Tick> {
        let frames = self.frame.advance(dt_ms);
        let spawns = self.spawn.advance(dt_ms);
        let clocks = self.clock.advance(dt_ms);

        let mut ticks = Vec::with_capacity((frames + spawns + clocks) as usize);
        ticks.extend(std::iter::repeat_n(Tick::Frame, frames as usize));
        ticks.extend(std::iter::repeat_n(Tick::Spawn, spawns as usize));
        ticks.extend(std::iter::repeat_n(Tick::Clock, clocks as usize));
        ticks
    }
}
