//! Demo player
//!
//! Picks the fruit closest to falling out and swipes through its center,
//! reacting only some of the time so a demo round still ends.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::Body;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Chance per frame of producing a swipe (0-1)
    reaction: f64,
}

impl Autopilot {
    pub fn new(seed: u64, reaction: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            reaction: reaction.clamp(0.0, 1.0),
        }
    }

    /// Most urgent fruit: falling, and lowest on screen
    pub fn target(bodies: &[Body]) -> Option<&Body> {
        bodies.iter().filter(|b| b.vel.y > 0.0).max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Drag sample for this frame, if the pilot reacts
    pub fn next_sample(&mut self, bodies: &[Body]) -> Option<Vec2> {
        let target = Self::target(bodies)?;
        if self.rng.random_bool(self.reaction) {
            Some(target.center())
        } else {
            None
        }
    }
}
