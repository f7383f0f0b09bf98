//! Error kinds surfaced by round setup.
//!
//! Everything that happens during an active round (bad input, repeated hint
//! requests, stray ticks) is a benign no-op and never reaches these types.

use super::difficulty::Difficulty;

/// Problems with game configuration: profiles, word pools, settings.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// No word pool defined for a difficulty.
    #[error("no word pool defined for difficulty '{0}'")]
    MissingPool(Difficulty),

    /// Word pool exists but has no words in it.
    #[error("word pool for difficulty '{0}' is empty")]
    EmptyPool(Difficulty),

    /// A difficulty profile has an out-of-range value.
    #[error("invalid profile for '{difficulty}': {reason}")]
    InvalidProfile {
        difficulty: Difficulty,
        reason: &'static str,
    },

    /// Obstacle field geometry is unusable.
    #[error("invalid field geometry: {0}")]
    InvalidField(&'static str),

    /// JSON could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Errors returned by engine commands.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GameError {
    /// Unknown difficulty key, or no profile registered for it.
    #[error("invalid difficulty: '{0}'")]
    InvalidDifficulty(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
