//! Game state and core simulation types
//!
//! Everything a round mutates lives in `GameState`; the tick functions take
//! it by `&mut`, so frame, spawn and drag handling can never interleave.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, FruitKind, launch_direction};
use super::clock::RoundClock;
use super::drag::DragTracker;
use super::player::Player;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Welcome / post-round screen owns focus
    Idle,
    /// Ticks and spawning active
    Playing,
    /// Round ended, save offer pending
    GameOver,
}

/// Outward notifications for the display layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: FruitKind },
    Sliced { id: u32 },
    Missed { id: u32 },
    ScoreChanged(u32),
    LivesChanged(u32),
    GameOver { score: u32, name: String },
}

/// What a renderer needs to draw one fruit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderBody {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub kind: FruitKind,
}

impl From<&Body> for RenderBody {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            pos: body.pos,
            size: body.size,
            kind: body.kind,
        }
    }
}

/// Launch parameters for one fruit.
///
/// `speed` holds per-axis magnitudes; the spawn applies the signs (upward,
/// and toward the center horizontally).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub x: f32,
    pub speed: Vec2,
    pub kind: FruitKind,
}

impl SpawnParams {
    /// Draw launch parameters within the tuning ranges
    pub fn random<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> Self {
        let x = whole_in_range(rng, settings.spawn_min_x, settings.play_width);
        let speed_y = whole_in_range(rng, settings.launch_speed_min, settings.launch_speed_max);
        let speed_x = whole_in_range(rng, settings.launch_speed_min, settings.launch_speed_max);
        Self {
            x,
            speed: Vec2::new(speed_x, speed_y),
            kind: FruitKind::random(rng),
        }
    }
}

/// Uniform whole number in `[lo, hi]`, or `lo` when no whole number fits
fn whole_in_range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    let (first, last) = (lo.ceil(), hi.floor());
    if first <= last {
        rng.random_range(first as i64..=last as i64) as f32
    } else {
        lo
    }
}

/// Complete round state (deterministic given seed and event stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Tuning in effect
    pub settings: Settings,
    /// Current phase
    pub phase: GamePhase,
    /// Score, lives, name
    pub player: Player,
    /// Elapsed round time
    pub clock: RoundClock,
    /// Active fruit, kept sorted by id by the tick handlers
    pub bodies: Vec<Body>,
    /// Current drag gesture
    pub drag: DragTracker,
    /// Frame ticks since round start
    pub time_ticks: u64,
    /// Pending notifications
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle state with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let player = Player::new(settings.starting_lives);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            phase: GamePhase::Idle,
            player,
            clock: RoundClock::default(),
            bodies: Vec::new(),
            drag: DragTracker::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Shared RNG (spawn parameters, spawn interval)
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Draw spawn parameters from the state RNG
    pub fn random_spawn(&mut self) -> SpawnParams {
        SpawnParams::random(&mut self.rng, &self.settings)
    }

    /// Insert a fruit at the bottom edge. Returns its id.
    pub fn spawn(&mut self, params: SpawnParams) -> u32 {
        let id = self.next_entity_id();
        let dir = launch_direction(params.x, self.settings.center_x());
        let body = Body::new(
            id,
            Vec2::new(params.x, self.settings.play_height),
            Vec2::new(dir * params.speed.x, -params.speed.y),
            self.settings.gravity,
            self.settings.fruit_size,
            params.kind,
        );
        self.bodies.push(body);
        self.push_event(GameEvent::Spawned { id, kind: params.kind });
        id
    }

    /// Charge one missed fruit against the player.
    ///
    /// Moves to `GameOver` when this takes the last life.
    pub fn charge_miss(&mut self, id: u32) {
        self.push_event(GameEvent::Missed { id });
        let had_lives = !self.player.is_out_of_lives();
        self.player.remove_life();
        if had_lives {
            self.push_event(GameEvent::LivesChanged(self.player.lives()));
        }
        if self.player.is_out_of_lives() {
            self.enter_game_over();
        }
    }

    /// Credit one sliced fruit
    pub fn credit_slice(&mut self, id: u32) {
        self.player.increment_score();
        self.push_event(GameEvent::Sliced { id });
        self.push_event(GameEvent::ScoreChanged(self.player.score()));
    }

    /// `Playing -> GameOver`, announced exactly once per round
    pub fn enter_game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.drag.end();
        log::info!(
            "Game over: {} scored {} in {:.1}s",
            self.player.name(),
            self.player.score(),
            self.clock.elapsed_secs()
        );
        self.push_event(GameEvent::GameOver {
            score: self.player.score(),
            name: self.player.name().to_string(),
        });
    }

    /// Renderable view of the active set
    pub fn render_bodies(&self) -> Vec<RenderBody> {
        self.bodies.iter().map(RenderBody::from).collect()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure bodies are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bodies.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Settings::default());
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_spawn_direction_and_anchor() {
        let mut state = playing_state();
        let speed = Vec2::new(3.0, 4.0);

        let right = state.spawn(SpawnParams { x: 260.0, speed, kind: FruitKind::Apple });
        let left = state.spawn(SpawnParams { x: 100.0, speed, kind: FruitKind::Banana });
        let center = state.spawn(SpawnParams { x: 250.0, speed, kind: FruitKind::Watermelon });

        let vel = |id: u32| state.bodies.iter().find(|b| b.id == id).unwrap().vel;
        assert_eq!(vel(right), Vec2::new(-3.0, -4.0));
        assert_eq!(vel(left), Vec2::new(3.0, -4.0));
        assert_eq!(vel(center), Vec2::new(3.0, -4.0));
        assert!(state.bodies.iter().all(|b| b.pos.y == 500.0));
    }

    #[test]
    fn test_random_spawn_in_range() {
        let mut state = playing_state();
        for _ in 0..500 {
            let params = state.random_spawn();
            assert!((25.0..=500.0).contains(&params.x));
            assert!((2.0..=5.0).contains(&params.speed.x));
            assert!((2.0..=5.0).contains(&params.speed.y));
        }
    }

    #[test]
    fn test_random_spawn_draws_whole_numbers() {
        let mut state = playing_state();
        let mut speeds = std::collections::BTreeSet::new();
        for _ in 0..500 {
            let params = state.random_spawn();
            assert_eq!(params.x.fract(), 0.0);
            speeds.insert(params.speed.x as i32);
            speeds.insert(params.speed.y as i32);
        }
        assert_eq!(speeds.into_iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_random_spawn_with_infinite_tuning() {
        let settings: Settings =
            serde_json::from_str(r#"{ "launch_speed_max": 1e300, "play_width": 1e300 }"#).unwrap();
        let mut state = GameState::new(3, settings);
        state.phase = GamePhase::Playing;

        let params = state.random_spawn();
        assert!((25.0..=500.0).contains(&params.x));
        assert!((2.0..=5.0).contains(&params.speed.x));
    }

    #[test]
    fn test_whole_in_range_without_whole_number() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(whole_in_range(&mut rng, 2.2, 2.8), 2.2);
        assert_eq!(whole_in_range(&mut rng, 4.0, 4.0), 4.0);
    }

    #[test]
    fn test_game_over_fires_once_on_last_life() {
        let mut state = playing_state();
        state.charge_miss(1);
        state.charge_miss(2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );

        state.charge_miss(3);
        assert_eq!(state.phase, GamePhase::GameOver);
        state.charge_miss(4);

        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(state.player.lives(), 0);
    }

    #[test]
    fn test_credit_slice_events() {
        let mut state = playing_state();
        state.credit_slice(7);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Sliced { id: 7 }, GameEvent::ScoreChanged(1)]
        );
        assert!(state.drain_events().is_empty());
    }
}
