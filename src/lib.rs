//! Fruit Slice - a fruit slicing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, slicing, game state)
//! - `session`: Event-driven session the host UI talks to
//! - `highscores`: Append-only leaderboard file
//! - `settings`: Data-driven game tuning

pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{ScoreError, ScoreRecord};
pub use session::{Hud, Session, SessionEvent};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play area edge (square)
    pub const PLAY_AREA_SIZE: f32 = 500.0;

    /// Frame tick interval (20 Hz)
    pub const FRAME_INTERVAL_MS: f64 = 50.0;
    /// Clock display refresh interval
    pub const CLOCK_INTERVAL_MS: f64 = 10.0;
    /// Spawn interval bounds, drawn once per round
    pub const SPAWN_INTERVAL_MIN_MS: f64 = 1000.0;
    pub const SPAWN_INTERVAL_MAX_MS: f64 = 1500.0;
    /// Maximum ticks a driver may catch up in one advance
    pub const MAX_CATCHUP: u32 = 8;

    /// Downward acceleration added to vy each tick (units/tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Edge of a fruit's square hit box
    pub const FRUIT_SIZE: f32 = 75.0;
    /// Leftmost spawn x
    pub const SPAWN_MIN_X: f32 = 25.0;
    /// Per-axis launch speed bounds (units/tick)
    pub const LAUNCH_SPEED_MIN: f32 = 2.0;
    pub const LAUNCH_SPEED_MAX: f32 = 5.0;

    /// Lives at round start
    pub const STARTING_LIVES: u32 = 3;
}
