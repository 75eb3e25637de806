//! Breakwall - a classic brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fixed-step clock, collisions, game state)
//! - `game`: Session driver wiring input, scheduling and the output ports
//! - `render` / `audio`: Output-only ports implemented by a host frontend
//! - `highscores` / `settings`: JSON persistence next to the executable

pub mod audio;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::{Game, Wake};
pub use highscores::HighScores;
pub use settings::Settings;
pub use sim::GameState;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation cadence: at most one step per 16 ms of driver time
    pub const STEP_INTERVAL_MS: f64 = 16.0;
    /// Player-facing pause between clearing a level and the next one starting
    pub const LEVEL_PAUSE_MS: u64 = 3000;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Added to the game speed to get the paddle's key-step distance
    pub const PADDLE_STEP_BONUS: u32 = 7;

    /// Ball radius
    pub const BALL_RADIUS: f32 = 10.0;

    /// Brick grid
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_TOP_MARGIN: f32 = 30.0;

    /// Session start values
    pub const BASE_SPEED: u32 = 7;
    pub const START_LIVES: u32 = 3;

    /// Paddle deflection tunables: dx += (strike offset / width) * SCALE - BIAS
    pub const DEFLECT_SCALE: f32 = 5.0;
    pub const DEFLECT_BIAS: f32 = 2.0;
}
