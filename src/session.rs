//! Session controller
//!
//! The single entry point for a host UI. Every event goes through `&mut
//! self`, so frame ticks, spawn ticks and drag samples are handled strictly
//! one after another. A host that receives events on several threads wraps
//! the session in a `Mutex` and gets the same guarantee.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::highscores::ScoreRecord;
use crate::settings::Settings;
use crate::sim::{self, Drivers, GameEvent, GamePhase, GameState, RenderBody, Tick};

/// Messages a host delivers to the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    FrameTick,
    SpawnTick,
    ClockTick,
    DragStart,
    DragMove { x: f32, y: f32 },
    DragEnd,
    StartGame(String),
    Reset,
    Quit,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Bodies to draw after a frame tick
    Frame(Vec<RenderBody>),
    /// Id of the fruit a spawn tick created
    Spawned(Option<u32>),
    /// Fruit sliced by a drag sample
    Sliced(usize),
    Ack,
}

/// Status line values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hud {
    pub name: String,
    pub score: u32,
    pub lives: u32,
    pub elapsed_secs: f64,
}

/// Everything a host needs after advancing time
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    pub bodies: Vec<RenderBody>,
    pub hud: Hud,
    pub events: Vec<GameEvent>,
}

pub struct Session {
    state: GameState,
    drivers: Drivers,
    hud: Hud,
    /// Final result awaiting the save/discard answer
    pending: Option<ScoreRecord>,
    running: bool,
}

impl Session {
    /// Idle session with the frame driver already running
    pub fn new(seed: u64, settings: Settings) -> Self {
        let state = GameState::new(seed, settings);
        let mut drivers = Drivers::new(&state.settings);
        drivers.frame.start();

        let mut session = Self {
            state,
            drivers,
            hud: Hud::default(),
            pending: None,
            running: true,
        };
        session.refresh_hud();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted hosts and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn drivers(&self) -> &Drivers {
        &self.drivers
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// False after `Quit`
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pending save offer, present from game over until it is resolved
    pub fn game_over(&self) -> Option<&ScoreRecord> {
        self.pending.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Dispatch one event
    pub fn handle(&mut self, event: SessionEvent) -> Response {
        match event {
            SessionEvent::FrameTick => Response::Frame(self.on_frame_tick()),
            SessionEvent::SpawnTick => Response::Spawned(self.on_spawn_tick()),
            SessionEvent::ClockTick => {
                self.on_clock_tick();
                Response::Ack
            }
            SessionEvent::DragStart => {
                self.on_drag_start();
                Response::Ack
            }
            SessionEvent::DragMove { x, y } => Response::Sliced(self.on_drag_move(x, y)),
            SessionEvent::DragEnd => {
                self.on_drag_end();
                Response::Ack
            }
            SessionEvent::StartGame(name) => {
                self.on_start_game(&name);
                Response::Ack
            }
            SessionEvent::Reset => {
                self.on_reset();
                Response::Ack
            }
            SessionEvent::Quit => {
                self.on_quit();
                Response::Ack
            }
        }
    }

    pub fn on_frame_tick(&mut self) -> Vec<RenderBody> {
        if !self.running {
            return Vec::new();
        }
        let bodies = sim::frame_tick(&mut self.state);
        self.after_event();
        bodies
    }

    pub fn on_spawn_tick(&mut self) -> Option<u32> {
        if !self.running {
            return None;
        }
        let id = sim::spawn_tick(&mut self.state);
        self.after_event();
        id
    }

    pub fn on_clock_tick(&mut self) {
        if !self.running {
            return;
        }
        self.hud.elapsed_secs = self.state.clock.elapsed_secs();
    }

    pub fn on_drag_start(&mut self) {
        if !self.running {
            return;
        }
        sim::drag_begin(&mut self.state);
    }

    pub fn on_drag_move(&mut self, x: f32, y: f32) -> usize {
        if !self.running {
            return 0;
        }
        let sliced = sim::drag_move(&mut self.state, Vec2::new(x, y));
        self.after_event();
        sliced
    }

    pub fn on_drag_end(&mut self) {
        if !self.running {
            return;
        }
        sim::drag_end(&mut self.state);
    }

    /// `Idle -> Playing`; starts the spawn and clock drivers
    pub fn on_start_game(&mut self, name: &str) {
        if !self.running || self.state.phase != GamePhase::Idle {
            log::warn!("Start ignored in {:?}", self.state.phase);
            return;
        }
        sim::start_game(&mut self.state, name);

        let settings = &self.state.settings;
        let (min, max) = (settings.spawn_interval_min_ms, settings.spawn_interval_max_ms);
        let interval = self.state.rng().random_range(min..=max);
        self.drivers.spawn.set_interval(interval);
        self.drivers.spawn.start();
        self.drivers.clock.start();
        if !self.drivers.frame.is_running() {
            self.drivers.frame.start();
        }
        log::info!("Spawning every {:.0} ms", interval);

        self.refresh_hud();
    }

    /// Back to `Idle`. Only the frame driver restarts; spawning waits for the
    /// next start.
    pub fn on_reset(&mut self) {
        if !self.running {
            return;
        }
        sim::reset(&mut self.state);
        self.pending = None;
        self.drivers.spawn.stop();
        self.drivers.clock.stop();
        self.drivers.frame.start();
        self.refresh_hud();
        self.hud.elapsed_secs = 0.0;
    }

    /// Answer the game-over offer. Returns the record to append when saving.
    pub fn resolve_game_over(&mut self, save: bool) -> Option<ScoreRecord> {
        let record = self.pending.take()?;
        log::info!(
            "{} score {} for {}",
            if save { "Saving" } else { "Discarding" },
            record.score,
            record.name
        );
        self.on_reset();
        save.then_some(record)
    }

    pub fn on_quit(&mut self) {
        self.drivers.stop_all();
        self.running = false;
        log::info!("Session closed");
    }

    /// Feed host time and run every tick that came due
    pub fn advance(&mut self, dt_ms: f64) -> FrameReport {
        if !self.running {
            return FrameReport::default();
        }
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let now = self.state.clock.now_ms() + dt_ms;
        self.state.clock.advance_to(now);

        let mut bodies = None;
        for tick in self.drivers.advance(dt_ms) {
            // A game over earlier in this batch stops the remaining drivers
            match tick {
                Tick::Frame if self.drivers.frame.is_running() => {
                    bodies = Some(self.on_frame_tick());
                }
                Tick::Spawn if self.drivers.spawn.is_running() => {
                    self.on_spawn_tick();
                }
                Tick::Clock if self.drivers.clock.is_running() => self.on_clock_tick(),
                _ => {}
            }
        }

        FrameReport {
            bodies: bodies.unwrap_or_else(|| self.state.render_bodies()),
            hud: self.hud.clone(),
            events: self.state.drain_events(),
        }
    }

    fn after_event(&mut self) {
        if self.state.phase == GamePhase::GameOver && self.pending.is_none() {
            self.drivers.stop_all();
            self.on_clock_tick();
            self.pending = Some(ScoreRecord::new(
                self.state.player.score(),
                self.state.player.name(),
            ));
        }
        self.refresh_hud();
    }

    fn refresh_hud(&mut self) {
        self.hud.name = self.state.player.name().to_string();
        self.hud.score = self.state.player.score();
        self.hud.lives = self.state.player.lives();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FruitKind, SpawnParams};

    fn playing_session() -> Session {
        let mut session = Session::new(7, Settings::default());
        session.handle(SessionEvent::StartGame("kim".into()));
        session.drain_events();
        session
    }

    #[test]
    fn test_start_game_starts_drivers() {
        let mut session = Session::new(7, Settings::default());
        assert!(session.drivers().frame.is_running());
        assert!(!session.drivers().spawn.is_running());

        session.handle(SessionEvent::StartGame("kim".into()));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.drivers().spawn.is_running());
        assert!(session.drivers().clock.is_running());
        let interval = session.drivers().spawn.interval_ms();
        assert!((1000.0..=1500.0).contains(&interval));
        assert_eq!(session.hud().name, "kim");
        assert_eq!(session.hud().lives, 3);
    }

    #[test]
    fn test_advance_spawns_and_reports() {
        let mut session = playing_session();
        let mut spawned = 0;
        for _ in 0..40 {
            let report = session.advance(50.0);
            spawned += report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Spawned { .. }))
                .count();
        }
        // Two seconds of play: at least one spawn at a 1.0-1.5 s interval
        assert!(spawned >= 1);
        assert!((session.hud().elapsed_secs - 2.0).abs() < 0.011);
    }

    #[test]
    fn test_drag_move_slices_through_session() {
        let mut session = playing_session();
        let id = sim::spawn_with(
            session.state_mut(),
            SpawnParams {
                x: 100.0,
                speed: Vec2::new(2.0, 5.0),
                kind: FruitKind::Banana,
            },
        )
        .unwrap();
        let center = session.state().bodies[0].center();

        session.handle(SessionEvent::DragStart);
        let response = session.handle(SessionEvent::DragMove { x: center.x, y: center.y });
        assert_eq!(response, Response::Sliced(1));
        assert!(session.state().bodies.is_empty());
        assert_eq!(session.hud().score, 1);
        assert!(session.state().drag.crossed(id));
        session.handle(SessionEvent::DragEnd);
    }

    #[test]
    fn test_game_over_stops_drivers_and_offers_save() {
        let mut session = playing_session();
        for _ in 0..3 {
            session.state_mut().player.remove_life();
        }
        assert_eq!(session.handle(SessionEvent::SpawnTick), Response::Spawned(None));

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(!session.drivers().frame.is_running());
        assert!(!session.drivers().spawn.is_running());
        assert!(!session.drivers().clock.is_running());
        assert_eq!(session.game_over(), Some(&ScoreRecord::new(0, "kim")));

        // Nothing moves while the offer is pending
        let report = session.advance(5_000.0);
        assert!(report.events.iter().all(|e| !matches!(e, GameEvent::Spawned { .. })));
    }

    #[test]
    fn test_resolve_game_over_resets() {
        let mut session = playing_session();
        session.state_mut().credit_slice(1);
        for _ in 0..3 {
            session.state_mut().player.remove_life();
        }
        session.on_spawn_tick();

        let record = session.resolve_game_over(true).unwrap();
        assert_eq!(record, ScoreRecord::new(1, "kim"));
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(session.game_over().is_none());
        assert!(session.drivers().frame.is_running());
        assert!(!session.drivers().spawn.is_running());
        assert_eq!(session.hud().score, 0);

        // Already resolved
        assert_eq!(session.resolve_game_over(true), None);
    }

    #[test]
    fn test_discard_returns_nothing() {
        let mut session = playing_session();
        for _ in 0..3 {
            session.state_mut().player.remove_life();
        }
        session.on_spawn_tick();
        assert_eq!(session.resolve_game_over(false), None);
        assert_eq!(session.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_full_round_ends_by_misses() {
        let mut session = playing_session();
        let mut game_overs = 0;
        for _ in 0..20_000 {
            let report = session.advance(50.0);
            game_overs += report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
            if session.game_over().is_some() {
                break;
            }
        }
        assert_eq!(game_overs, 1);
        assert_eq!(session.hud().lives, 0);
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_advance_ignores_non_finite_time() {
        let mut session = playing_session();
        session.advance(f64::INFINITY);
        session.advance(f64::NAN);
        assert_eq!(session.state().clock.now_ms(), 0.0);

        session.advance(50.0);
        assert!((session.hud().elapsed_secs - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_quit_stops_everything() {
        let mut session = playing_session();
        session.handle(SessionEvent::Quit);
        assert!(!session.is_running());
        assert_eq!(session.advance(1_000.0), FrameReport::default());

        session.handle(SessionEvent::StartGame("again".into()));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.hud().name, "kim");

        // A closed session ignores ticks and drags
        session.state_mut().bodies.push(crate::sim::Body::new(
            50,
            Vec2::new(100.0, 510.0),
            Vec2::ZERO,
            0.25,
            75.0,
            FruitKind::Apple,
        ));
        let before = session.state().bodies.clone();

        assert_eq!(session.handle(SessionEvent::FrameTick), Response::Frame(Vec::new()));
        assert_eq!(session.handle(SessionEvent::SpawnTick), Response::Spawned(None));
        session.handle(SessionEvent::DragStart);
        assert_eq!(
            session.handle(SessionEvent::DragMove { x: 120.0, y: 530.0 }),
            Response::Sliced(0)
        );
        session.handle(SessionEvent::ClockTick);

        assert_eq!(session.state().bodies, before);
        assert_eq!(session.state().player.score(), 0);
        assert_eq!(session.state().player.lives(), 3);
        assert!(!session.state().drag.is_active());
        assert!(session.drain_events().is_empty());
    }
}
