//! Difficulty tiers and their static profiles
//!
//! Profiles are loaded once and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static configuration for one difficulty tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub id: Difficulty,
    /// Countdown length for timed rounds
    pub time_limit_secs: u32,
    pub initial_lives: u32,
    /// Applied to the base score of a correct word (>= 1)
    pub score_multiplier: f32,
    /// Correct words needed to win. Absent for endless rounds.
    #[serde(default)]
    pub word_goal: Option<u32>,
    /// Starting obstacle speed (pixels per frame)
    #[serde(default)]
    pub base_speed: Option<f32>,
}

impl DifficultyProfile {
    /// Built-in profile for a tier
    pub fn builtin(id: Difficulty) -> Self {
        match id {
            Difficulty::Easy => Self {
                id,
                time_limit_secs: 120,
                initial_lives: 5,
                score_multiplier: 1.0,
                word_goal: Some(10),
                base_speed: Some(2.0),
            },
            Difficulty::Medium => Self {
                id,
                time_limit_secs: 100,
                initial_lives: 4,
                score_multiplier: 1.5,
                word_goal: Some(15),
                base_speed: Some(2.5),
            },
            Difficulty::Hard => Self {
                id,
                time_limit_secs: 80,
                initial_lives: 3,
                score_multiplier: 2.0,
                word_goal: Some(20),
                base_speed: Some(3.0),
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidProfile {
            difficulty: self.id,
            reason,
        };
        if self.time_limit_secs == 0 {
            return Err(invalid("time limit must be positive"));
        }
        if self.initial_lives == 0 {
            return Err(invalid("initial lives must be positive"));
        }
        if !(self.score_multiplier >= 1.0) {
            return Err(invalid("score multiplier must be at least 1"));
        }
        if self.word_goal == Some(0) {
            return Err(invalid("word goal must be positive"));
        }
        if let Some(speed) = self.base_speed {
            if !(speed > 0.0) {
                return Err(invalid("base speed must be positive"));
            }
        }
        Ok(())
    }
}

/// Lookup of profiles by tier
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyRegistry {
    profiles: BTreeMap<Difficulty, DifficultyProfile>,
}

impl Default for DifficultyRegistry {
    fn default() -> Self {
        Self {
            profiles: Difficulty::ALL
                .iter()
                .map(|&d| (d, DifficultyProfile::builtin(d)))
                .collect(),
        }
    }
}

impl DifficultyRegistry {
    /// Build a registry from custom profiles, validating each one.
    /// A later profile for the same tier replaces an earlier one.
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = DifficultyProfile>,
    ) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for profile in profiles {
            profile.validate()?;
            map.insert(profile.id, profile);
        }
        Ok(Self { profiles: map })
    }

    /// Parse a JSON array of profiles
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let profiles: Vec<DifficultyProfile> = serde_json::from_str(json)?;
        Self::from_profiles(profiles)
    }

    pub fn get(&self, id: Difficulty) -> Option<&DifficultyProfile> {
        self.profiles.get(&id)
    }

    pub fn tiers(&self) -> impl Iterator<Item = Difficulty> + '_ {
        self.profiles.keys().copied()
    }
}
