//! Score awards and difficulty escalation

use super::difficulty::DifficultyProfile;
use crate::consts::*;

/// How a correct word is rewarded and how pacing follows the score
pub trait ScoringPolicy {
    /// Points awarded for one correct word
    fn score_for_correct(&self, profile: &DifficultyProfile) -> u64;

    /// Obstacle speed for a cumulative score. Constant unless the policy ramps.
    fn speed_for_score(&self, base_speed: f32, _score: u64) -> f32 {
        base_speed
    }
}

/// `base * multiplier`, rounded. Pacing never changes.
#[derive(Debug, Clone, Copy)]
pub struct FlatMultiplier {
    pub base: u64,
}

impl Default for FlatMultiplier {
    fn default() -> Self {
        Self { base: BASE_SCORE }
    }
}

impl ScoringPolicy for FlatMultiplier {
    fn score_for_correct(&self, profile: &DifficultyProfile) -> u64 {
        (self.base as f32 * profile.score_multiplier).round() as u64
    }
}

/// Flat points per word; speed steps up every `step_score` points crossed
#[derive(Debug, Clone, Copy)]
pub struct SpeedRamp {
    pub points: u64,
    pub step_score: u64,
    pub speed_step: f32,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self {
            points: BASE_SCORE,
            step_score: SPEED_STEP_SCORE,
            speed_step: SPEED_STEP,
        }
    }
}

impl ScoringPolicy for SpeedRamp {
    fn score_for_correct(&self, _profile: &DifficultyProfile) -> u64 {
        self.points
    }

    fn speed_for_score(&self, base_speed: f32, score: u64) -> f32 {
        let steps = score.checked_div(self.step_score).unwrap_or(0);
        base_speed + steps as f32 * self.speed_step
    }
}

/// Selectable scoring strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringStrategy {
    FlatMultiplier,
    SpeedRamp,
}

impl ScoringStrategy {
    pub fn policy(&self) -> Box<dyn ScoringPolicy> {
        match self {
            ScoringStrategy::FlatMultiplier => Box::new(FlatMultiplier::default()),
            ScoringStrategy::SpeedRamp => Box::new(SpeedRamp::default()),
        }
    }
}
