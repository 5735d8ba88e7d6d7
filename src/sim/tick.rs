//! Round transitions and per-tick handlers
//!
//! Pure functions over `GameState`. The host decides when they run; nothing
//! here reads a wall clock.

use glam::Vec2;

use super::player::Player;
use super::state::{GameEvent, GamePhase, GameState, RenderBody, SpawnParams};

/// `Idle -> Playing`
pub fn start_game(state: &mut GameState, name: &str) {
    if state.phase != GamePhase::Idle {
        log::warn!("Ignoring start request while {:?}", state.phase);
        return;
    }

    let mut player = Player::new(state.settings.starting_lives);
    player.set_name(name);
    state.player = player;
    let now = state.clock.now_ms();
    state.clock.reset(now);
    state.bodies.clear();
    state.drag.end();
    state.time_ticks = 0;
    state.phase = GamePhase::Playing;

    state.push_event(GameEvent::ScoreChanged(0));
    state.push_event(GameEvent::LivesChanged(state.player.lives()));
    log::info!("Round started for {:?} (seed {})", name, state.seed);
}

/// Advance physics one frame, cull fallen fruit, return what to draw.
///
/// Only a `Playing` round charges lives; while idle, stray bodies are
/// dropped silently.
pub fn frame_tick(state: &mut GameState) -> Vec<RenderBody> {
    match state.phase {
        GamePhase::GameOver => return state.render_bodies(),
        GamePhase::Idle => {
            let height = state.settings.play_height;
            for body in &mut state.bodies {
                body.update();
            }
            state.bodies.retain(|b| !b.is_out_of_bounds(height));
            return state.render_bodies();
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    for body in &mut state.bodies {
        body.update();
    }

    let height = state.settings.play_height;
    let mut missed = Vec::new();
    state.bodies.retain(|body| {
        if body.is_out_of_bounds(height) {
            missed.push(body.id);
            false
        } else {
            true
        }
    });
    for id in missed {
        log::debug!("Fruit {} missed", id);
        state.charge_miss(id);
    }

    state.normalize_order();
    state.render_bodies()
}

/// Spawn one random fruit, or end the round if no lives remain
pub fn spawn_tick(state: &mut GameState) -> Option<u32> {
    if !can_spawn(state) {
        return None;
    }
    let params = state.random_spawn();
    spawn_with(state, params)
}

/// Spawn with explicit launch parameters, under the same life guard
pub fn spawn_with(state: &mut GameState, params: SpawnParams) -> Option<u32> {
    if !can_spawn(state) {
        return None;
    }
    let id = state.spawn(params);
    state.normalize_order();
    log::debug!(
        "Spawned {} {} at x={:.0} speed={:?}",
        params.kind.as_str(),
        id,
        params.x,
        params.speed
    );
    Some(id)
}

fn can_spawn(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    if state.player.is_out_of_lives() {
        state.enter_game_over();
        return false;
    }
    true
}

/// Pointer down
pub fn drag_begin(state: &mut GameState) {
    state.drag.begin();
}

/// One pointer sample during a drag. Returns how many fruit it sliced.
pub fn drag_move(state: &mut GameState, point: Vec2) -> usize {
    if state.phase != GamePhase::Playing {
        return 0;
    }
    let sliced = state.drag.sample(&mut state.bodies, point);
    for body in &sliced {
        log::debug!("Sliced {} {}", body.kind.as_str(), body.id);
        state.credit_slice(body.id);
    }
    sliced.len()
}

/// Pointer up
pub fn drag_end(state: &mut GameState) {
    state.drag.end();
}

/// Back to `Idle`: fresh player and clock, empty field
pub fn reset(state: &mut GameState) {
    if state.phase == GamePhase::Playing {
        log::info!("Round aborted");
    }
    state.phase = GamePhase::Idle;
    state.player = Player::new(state.settings.starting_lives);
    let now = state.clock.now_ms();
    state.clock.reset(now);
    state.bodies.clear();
    state.drag.end();
    state.time_ticks = 0;

    state.push_event(GameEvent::ScoreChanged(0));
    state.push_event(GameEvent::LivesChanged(state.player.lives()));
}
