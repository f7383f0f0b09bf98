//! Deterministic game logic
//!
//! All gameplay rules live here. This module must stay pure:
//! - Seeded RNG only
//! - Time enters only through `Clock` readings and ticks
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod engine;
pub mod error;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod words;

pub use difficulty::{Difficulty, DifficultyProfile, DifficultyRegistry};
pub use engine::{GameEngine, InputOutcome};
pub use error::{ConfigError, GameError};
pub use scoring::{FlatMultiplier, ScoringPolicy, ScoringStrategy, SpeedRamp};
pub use state::{
    GameEvent, Obstacle, Outcome, RoundSnapshot, RoundState, RoundStatus, RoundSummary,
    accuracy_percent,
};
pub use tick::TickResult;
pub use words::WordBank;
