//! Fruit Slice entry point
//!
//! Runs a headless round played by the autopilot, appends the result to the
//! leaderboard and prints the board.
//!
//! Usage: `fruit-slice [name] [seed]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use fruit_slice::highscores::HighScores;
use fruit_slice::sim::{Autopilot, GameEvent};
use fruit_slice::{Session, SessionEvent, Settings};

/// Settings file read at startup
const SETTINGS_PATH: &str = "fruit_slice.json";
/// Host frame step (~60 Hz)
const HOST_STEP_MS: f64 = 1000.0 / 60.0;
/// Demo rounds give up after ten simulated minutes
const MAX_ROUND_MS: f64 = 10.0 * 60.0 * 1000.0;
/// Autopilot chance of swiping on a given frame
const PILOT_REACTION: f64 = 0.08;

fn main() {
    env_logger::init();
    log::info!("Fruit Slice (headless) starting...");

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "Autopilot".to_string());
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let scores_path = settings.scores_path.clone();
    log::info!("Game initialized with seed: {}", seed);

    let mut session = Session::new(seed, settings);
    let mut pilot = Autopilot::new(seed ^ 0x9e37_79b9_7f4a_7c15, PILOT_REACTION);
    session.handle(SessionEvent::StartGame(name));

    let mut dragging = false;
    let mut played_ms = 0.0;
    while session.game_over().is_none() && played_ms < MAX_ROUND_MS {
        let report = session.advance(HOST_STEP_MS);
        played_ms += HOST_STEP_MS;

        for event in &report.events {
            match event {
                GameEvent::Missed { id } => log::info!("Missed fruit {} ({} lives left)", id, report.hud.lives),
                GameEvent::GameOver { score, name } => println!("Game over! {} scored {}", name, score),
                _ => {}
            }
        }

        match pilot.next_sample(&session.state().bodies) {
            Some(point) => {
                if !dragging {
                    session.handle(SessionEvent::DragStart);
                    dragging = true;
                }
                session.handle(SessionEvent::DragMove { x: point.x, y: point.y });
            }
            None if dragging => {
                session.handle(SessionEvent::DragEnd);
                dragging = false;
            }
            None => {}
        }
    }

    let hud = session.hud().clone();
    println!(
        "{}: score {} lives {} time {:.1}s",
        hud.name, hud.score, hud.lives, hud.elapsed_secs
    );

    if let Some(record) = session.resolve_game_over(true) {
        match HighScores::load(&scores_path) {
            Ok(board) => log::info!("Score would rank #{}", board.potential_rank(record.score)),
            Err(e) => log::warn!("Could not read leaderboard: {}", e),
        }
        if let Err(e) = HighScores::append(&scores_path, &record) {
            log::error!("Could not save score: {}", e);
        }
    } else {
        log::warn!("Round did not finish within {:.0}s, not saved", MAX_ROUND_MS / 1000.0);
    }

    match HighScores::load(&scores_path) {
        Ok(board) => print!("{}", board.format_table()),
        Err(e) => log::error!("Could not read leaderboard: {}", e),
    }

    session.handle(SessionEvent::Quit);
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
