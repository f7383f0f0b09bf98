//! Word Dash - a typing game: type the word before time (or the obstacle) runs out
//!
//! Core modules:
//! - `sim`: Deterministic round logic (state machine, scoring, word pools)
//! - `settings`: Variant, input mode and hint configuration
//! - `platform`: Browser/native abstraction (clock, tick sources)

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{HintStyle, InputMode, RoundVariant, Settings};
pub use sim::{GameEngine, GameError, Outcome, RoundStatus};

/// Game configuration constants
pub mod consts {
    /// Prompt rounds tick once per second
    pub const PROMPT_TICK_MS: u32 = 1000;
    /// Obstacle rounds tick once per frame
    pub const FRAME_TICK_MS: u32 = 16;
    pub const FRAMES_PER_SEC: u32 = 60;

    /// Points for a correct word before multipliers
    pub const BASE_SCORE: u64 = 10;
    /// Obstacle speed goes up each time the score crosses a multiple of this
    pub const SPEED_STEP_SCORE: u64 = 100;
    pub const SPEED_STEP: f32 = 0.5;
    /// Obstacle speed when a profile has none (pixels/frame)
    pub const DEFAULT_SPEED: f32 = 2.5;

    /// Obstacle field (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;
    pub const MIN_SPAWN_GAP: f32 = 300.0;
    pub const SPAWN_INTERVAL_MIN_SECS: f32 = 1.5;
    pub const SPAWN_INTERVAL_MAX_SECS: f32 = 3.5;

    /// Hint masking
    pub const HINT_MASK: char = '_';
    pub const HINT_ELLIPSIS: &str = "...";
}
