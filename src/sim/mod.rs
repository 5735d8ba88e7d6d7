//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied time only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod body;
pub mod clock;
pub mod drag;
pub mod driver;
pub mod player;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use body::{Body, FruitKind, launch_direction};
pub use clock::RoundClock;
pub use drag::DragTracker;
pub use driver::{Drivers, Periodic, Tick};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState, RenderBody, SpawnParams};
pub use tick::{
    drag_begin, drag_end, drag_move, frame_tick, reset, spawn_tick, spawn_with, start_game,
};
