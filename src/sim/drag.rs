//! Drag gesture tracking and slicing
//!
//! Each pointer sample is tested against the live bodies one at a time, and
//! a hit is removed from the set before the next body is considered. A
//! sliced body is gone for every later sample, so one gesture can never
//! score the same fruit twice.

use glam::Vec2;

use super::body::Body;

#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    active: bool,
    samples: u32,
    last_point: Option<Vec2>,
    /// Bodies sliced since the gesture began
    crossed: Vec<u32>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture (pointer down)
    pub fn begin(&mut self) {
        self.active = true;
        self.samples = 0;
        self.last_point = None;
        self.crossed.clear();
    }

    /// Finish the gesture (pointer up)
    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Move samples seen in the current gesture
    pub fn sample_count(&self) -> u32 {
        self.samples
    }

    pub fn last_point(&self) -> Option<Vec2> {
        self.last_point
    }

    /// Whether a body was sliced since the gesture began
    pub fn crossed(&self, id: u32) -> bool {
        self.crossed.contains(&id)
    }

    /// Feed one pointer sample, removing and returning every body it hits.
    ///
    /// A sample arriving without a gesture opens one.
    pub fn sample(&mut self, bodies: &mut Vec<Body>, point: Vec2) -> Vec<Body> {
        if !self.active {
            self.begin();
        }
        self.samples += 1;
        self.last_point = Some(point);

        let mut sliced = Vec::new();
        let mut i = 0;
        while i < bodies.len() {
            if bodies[i].contains_point(point) {
                let body = bodies.remove(i);
                self.crossed.push(body.id);
                sliced.push(body);
            } else {
                i += 1;
            }
        }
        sliced
    }
}
