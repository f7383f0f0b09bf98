//! Game settings
//!
//! Selected once at startup. Loaded from JSON on the web build (passed in by
//! the page) or from a file path natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::error::ConfigError;
use crate::sim::scoring::ScoringStrategy;

/// Which flavor of round to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoundVariant {
    /// One prompted word at a time, countdown timer, word goal
    #[default]
    Prompt,
    /// Words ride on obstacles scrolling toward the player
    Obstacle,
}

impl RoundVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundVariant::Prompt => "Prompt",
            RoundVariant::Obstacle => "Obstacle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "prompt" | "word" => Some(RoundVariant::Prompt),
            "obstacle" | "runner" => Some(RoundVariant::Obstacle),
            _ => None,
        }
    }

    /// Whether targets arrive as moving obstacles
    pub fn spawns_obstacles(&self) -> bool {
        matches!(self, RoundVariant::Obstacle)
    }

    /// Whether the countdown runs (obstacle rounds are endless)
    pub fn is_timed(&self) -> bool {
        matches!(self, RoundVariant::Prompt)
    }

    /// Tick source period
    pub fn tick_period_ms(&self) -> u32 {
        match self {
            RoundVariant::Prompt => PROMPT_TICK_MS,
            RoundVariant::Obstacle => FRAME_TICK_MS,
        }
    }

    pub fn scoring(&self) -> ScoringStrategy {
        match self {
            RoundVariant::Prompt => ScoringStrategy::FlatMultiplier,
            RoundVariant::Obstacle => ScoringStrategy::SpeedRamp,
        }
    }
}

/// When typed text is checked against the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Every keystroke is checked; an exact match counts immediately
    #[default]
    ExactMatch,
    /// Only an explicit confirm key (Enter) submits
    ConfirmKey,
}

/// How the hidden half of a hint is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HintStyle {
    /// One mask symbol per hidden character: `sha___`
    #[default]
    Masked,
    /// Fixed ellipsis: `sha...`
    Ellipsis,
}

impl HintStyle {
    /// Reveal the first half (rounded up) of `word`
    pub fn render(&self, word: &str) -> String {
        let len = word.chars().count();
        let shown = len.div_ceil(2);
        let mut hint: String = word.chars().take(shown).collect();
        match self {
            HintStyle::Masked => {
                hint.extend(std::iter::repeat_n(HINT_MASK, len - shown));
            }
            HintStyle::Ellipsis => {
                if len > shown {
                    hint.push_str(HINT_ELLIPSIS);
                }
            }
        }
        hint
    }
}

/// Obstacle field geometry (pixels, frames)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGeometry {
    /// Obstacles spawn at this x
    pub width: f32,
    /// Right edge of the player; an obstacle left of it collides
    pub player_boundary: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Newest obstacle must be this far from the right edge before another spawns
    pub min_spawn_gap: f32,
    /// Spawn attempt interval range in seconds
    pub spawn_interval_min_secs: f32,
    pub spawn_interval_max_secs: f32,
    pub frames_per_sec: u32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            player_boundary: PLAYER_X + PLAYER_WIDTH,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            min_spawn_gap: MIN_SPAWN_GAP,
            spawn_interval_min_secs: SPAWN_INTERVAL_MIN_SECS,
            spawn_interval_max_secs: SPAWN_INTERVAL_MAX_SECS,
            frames_per_sec: FRAMES_PER_SEC,
        }
    }
}

impl FieldGeometry {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > self.player_boundary) || !(self.player_boundary >= 0.0) {
            return Err(ConfigError::InvalidField(
                "player boundary must lie inside the field",
            ));
        }
        if !(self.spawn_interval_min_secs > 0.0)
            || !(self.spawn_interval_max_secs > self.spawn_interval_min_secs)
        {
            return Err(ConfigError::InvalidField("spawn interval range is empty"));
        }
        if self.frames_per_sec == 0 {
            return Err(ConfigError::InvalidField("frame rate must be positive"));
        }
        Ok(())
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub variant: RoundVariant,
    pub input_mode: InputMode,
    pub hint_style: HintStyle,
    /// Fixed RNG seed; seeded from the clock when absent
    pub seed: Option<u64>,
    pub field: FieldGeometry,
}

impl Settings {
    /// Settings for a variant with everything else default
    pub fn for_variant(variant: RoundVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()
    }
}
