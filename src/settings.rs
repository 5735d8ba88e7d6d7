//! Game settings and tuning
//!
//! Persisted as JSON next to the leaderboard. Every field has a default so a
//! partial or missing file still yields a playable game.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    /// Play area width
    pub play_width: f32,
    /// Play area height (fruit spawn on this edge and are lost past it)
    pub play_height: f32,

    // === Timing ===
    /// Frame tick interval (ms)
    pub frame_interval_ms: f64,
    /// Clock display refresh interval (ms)
    pub clock_interval_ms: f64,
    /// Shortest spawn interval (ms)
    pub spawn_interval_min_ms: f64,
    /// Longest spawn interval (ms)
    pub spawn_interval_max_ms: f64,

    // === Fruit ===
    /// Downward acceleration (units/tick²)
    pub gravity: f32,
    /// Hit box edge
    pub fruit_size: f32,
    /// Leftmost spawn x
    pub spawn_min_x: f32,
    /// Slowest launch speed per axis (units/tick)
    pub launch_speed_min: f32,
    /// Fastest launch speed per axis (units/tick)
    pub launch_speed_max: f32,

    // === Player ===
    /// Lives at round start
    pub starting_lives: u32,

    // === Files ===
    /// Leaderboard file
    pub scores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_width: PLAY_AREA_SIZE,
            play_height: PLAY_AREA_SIZE,

            frame_interval_ms: FRAME_INTERVAL_MS,
            clock_interval_ms: CLOCK_INTERVAL_MS,
            spawn_interval_min_ms: SPAWN_INTERVAL_MIN_MS,
            spawn_interval_max_ms: SPAWN_INTERVAL_MAX_MS,

            gravity: GRAVITY,
            fruit_size: FRUIT_SIZE,
            spawn_min_x: SPAWN_MIN_X,
            launch_speed_min: LAUNCH_SPEED_MIN,
            launch_speed_max: LAUNCH_SPEED_MAX,

            starting_lives: STARTING_LIVES,

            scores_path: PathBuf::from("scores.txt"),
        }
    }
}

impl Settings {
    /// Horizontal center of the play area (spawn direction split)
    pub fn center_x(&self) -> f32 {
        self.play_width / 2.0
    }

    /// Repair values a hand-edited file could get wrong.
    ///
    /// Swapped bounds are reordered. Non-finite values, and non-positive
    /// sizes and intervals, fall back to their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        self.play_width = positive_or(self.play_width, defaults.play_width);
        self.play_height = positive_or(self.play_height, defaults.play_height);
        self.frame_interval_ms = positive_ms_or(self.frame_interval_ms, defaults.frame_interval_ms);
        self.clock_interval_ms = positive_ms_or(self.clock_interval_ms, defaults.clock_interval_ms);
        self.spawn_interval_min_ms =
            positive_ms_or(self.spawn_interval_min_ms, defaults.spawn_interval_min_ms);
        self.spawn_interval_max_ms =
            positive_ms_or(self.spawn_interval_max_ms, defaults.spawn_interval_max_ms);
        if self.spawn_interval_min_ms > self.spawn_interval_max_ms {
            std::mem::swap(&mut self.spawn_interval_min_ms, &mut self.spawn_interval_max_ms);
        }
        self.fruit_size = positive_or(self.fruit_size, defaults.fruit_size);
        if !self.gravity.is_finite() {
            self.gravity = defaults.gravity;
        }
        if !(self.launch_speed_min.is_finite() && self.launch_speed_min >= 0.0) {
            self.launch_speed_min = defaults.launch_speed_min;
        }
        if !(self.launch_speed_max.is_finite() && self.launch_speed_max >= 0.0) {
            self.launch_speed_max = defaults.launch_speed_max;
        }
        if self.launch_speed_min > self.launch_speed_max {
            std::mem::swap(&mut self.launch_speed_min, &mut self.launch_speed_max);
        }
        if !self.spawn_min_x.is_finite() {
            self.spawn_min_x = defaults.spawn_min_x;
        }
        // Spawn range must stay non-empty
        self.spawn_min_x = self.spawn_min_x.clamp(0.0, self.play_width);
        if self.starting_lives == 0 {
            self.starting_lives = defaults.starting_lives;
        }

        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }
}

fn positive_or(value: f32, default: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { default }
}

fn positive_ms_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { default }
}
