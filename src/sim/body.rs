//! Kinematic fruit bodies
//!
//! Screen-space coordinates: x grows right, y grows down. A body is anchored
//! at the top-left corner of its square hit box.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Fruit variety (cosmetic, resolved to an image by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Watermelon,
    Banana,
    Apple,
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::Watermelon, FruitKind::Banana, FruitKind::Apple];

    pub fn as_str(&self) -> &'static str {
        match self {
            FruitKind::Watermelon => "Watermelon",
            FruitKind::Banana => "Banana",
            FruitKind::Apple => "Apple",
        }
    }

    /// Uniformly pick a variety
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&FruitKind::Apple)
    }
}

/// A moving fruit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    /// Top-left corner of the hit box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Added to vel.y every tick
    pub acceleration: f32,
    /// Hit box edge
    pub size: f32,
    pub kind: FruitKind,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, acceleration: f32, size: f32, kind: FruitKind) -> Self {
        Self {
            id,
            pos,
            vel,
            acceleration,
            size,
            kind,
        }
    }

    /// Advance one tick: gravity first, then displacement with the new velocity
    #[inline]
    pub fn update(&mut self) {
        self.vel.y += self.acceleration;
        self.pos += self.vel;
    }

    /// Advance a fractional or multiple number of ticks
    pub fn update_scaled(&mut self, dt_ticks: f32) {
        self.vel.y += self.acceleration * dt_ticks;
        self.pos += self.vel * dt_ticks;
    }

    /// True once the body has dropped past the bottom edge
    #[inline]
    pub fn is_out_of_bounds(&self, area_height: f32) -> bool {
        self.pos.y > area_height
    }

    /// Hit box corners (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + Vec2::splat(self.size))
    }

    /// Center of the hit box
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Point-in-box test, edges inclusive
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (min, max) = self.bounds();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

/// Horizontal launch sign for a spawn x.
///
/// Fruit starting right of center head left and the rest head right, so
/// every trajectory crosses the middle. Exactly on center heads right.
#[inline]
pub fn launch_direction(x: f32, center_x: f32) -> f32 {
    if x > center_x { -1.0 } else { 1.0 }
}
