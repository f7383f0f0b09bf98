//! Round state and the types the renderer reads
//!
//! All data for one playthrough lives in `RoundState`. The engine owns at most
//! one of these at a time.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultyProfile};

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

/// Lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "outcome", rename_all = "lowercase")]
pub enum RoundStatus {
    /// No round in progress
    Menu,
    /// Round running, accepting input and ticks
    Active,
    /// Round over. Terminal until restart or return to menu.
    Finished(Outcome),
}

/// A word riding toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge x; decreases every frame
    pub x: f32,
    pub word: String,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Distance travelled from the spawn edge
    pub fn travelled(&self, field_width: f32) -> f32 {
        field_width - self.x
    }
}

/// Notifications for the renderer (animations, sounds, redraws)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Something in the snapshot changed
    StateChanged,
    /// Correct word
    Success { word: String },
    /// Wrong word
    Error { typed: String },
    /// An obstacle reached the player
    Collision { word: String },
    Spawned { id: u32, word: String },
    SpeedUp { speed: f32 },
    HintRevealed { hint: String },
    RoundEnded { summary: RoundSummary },
}

/// Final numbers for a finished round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: u64,
    pub words_correct: u32,
    /// Percent, rounded
    pub accuracy: u32,
    /// Whole seconds, rounded
    pub elapsed_secs: u64,
    pub outcome: Outcome,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    #[serde(flatten)]
    pub status: RoundStatus,
    pub difficulty: Option<Difficulty>,
    pub score: u64,
    pub lives: u32,
    pub words_correct: u32,
    pub total_attempts: u32,
    pub accuracy: u32,
    pub time_remaining: u32,
    pub current_word: Option<String>,
    pub obstacles: Vec<Obstacle>,
    pub hint: Option<String>,
    pub game_speed: f32,
    pub summary: Option<RoundSummary>,
}

impl RoundSnapshot {
    /// Snapshot shown while no round exists
    pub fn menu() -> Self {
        Self {
            status: RoundStatus::Menu,
            difficulty: None,
            score: 0,
            lives: 0,
            words_correct: 0,
            total_attempts: 0,
            accuracy: 0,
            time_remaining: 0,
            current_word: None,
            obstacles: Vec::new(),
            hint: None,
            game_speed: 0.0,
            summary: None,
        }
    }
}

/// `round(100 * correct / attempts)`, 0 with no attempts
pub fn accuracy_percent(words_correct: u32, total_attempts: u32) -> u32 {
    if total_attempts == 0 {
        return 0;
    }
    (100.0 * words_correct as f64 / total_attempts as f64).round() as u32
}

/// Mutable state of one playthrough
#[derive(Debug, Clone)]
pub struct RoundState {
    pub profile: DifficultyProfile,
    pub score: u64,
    pub lives: u32,
    pub words_correct: u32,
    pub total_attempts: u32,
    /// Correct words needed to win; `None` for endless rounds
    pub word_goal: Option<u32>,
    /// Prompt rounds: the word to type
    pub current_word: Option<String>,
    /// Obstacle rounds: oldest (leftmost) first
    pub obstacles: VecDeque<Obstacle>,
    pub time_remaining: u32,
    /// Clock reading (seconds) at start
    pub started_at: f64,
    pub hint_used: bool,
    /// Partial reveal of the current target, cleared when the target changes
    pub hint: Option<String>,
    pub status: RoundStatus,
    /// Obstacle speed in pixels per frame
    pub game_speed: f32,
    /// Frames until the next spawn attempt
    pub spawn_cooldown: u32,
    /// Set once the round finishes
    pub summary: Option<RoundSummary>,
    next_id: u32,
}

impl RoundState {
    /// Fresh active round for a profile
    pub fn new(profile: &DifficultyProfile, started_at: f64) -> Self {
        Self {
            profile: profile.clone(),
            score: 0,
            lives: profile.initial_lives,
            words_correct: 0,
            total_attempts: 0,
            word_goal: profile.word_goal,
            current_word: None,
            obstacles: VecDeque::new(),
            time_remaining: profile.time_limit_secs,
            started_at,
            hint_used: false,
            hint: None,
            status: RoundStatus::Active,
            game_speed: profile.base_speed.unwrap_or(crate::consts::DEFAULT_SPEED),
            spawn_cooldown: 0,
            summary: None,
            next_id: 1,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.profile.id
    }

    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The word the player must type right now
    pub fn target(&self) -> Option<&str> {
        match self.obstacles.front() {
            Some(obstacle) => Some(&obstacle.word),
            None => self.current_word.as_deref(),
        }
    }

    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.words_correct, self.total_attempts)
    }

    /// Take one life. Returns true if any remain.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }

    /// True once the word goal (if any) is met
    pub fn goal_reached(&self) -> bool {
        self.word_goal.is_some_and(|goal| self.words_correct >= goal)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            status: self.status,
            difficulty: Some(self.difficulty()),
            score: self.score,
            lives: self.lives,
            words_correct: self.words_correct,
            total_attempts: self.total_attempts,
            accuracy: self.accuracy(),
            time_remaining: self.time_remaining,
            current_word: self.current_word.clone(),
            obstacles: self.obstacles.iter().cloned().collect(),
            hint: self.hint.clone(),
            game_speed: self.game_speed,
            summary: self.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_percent() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(3, 4), 75);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(5, 5), 100);
    }

    #[test]
    fn test_new_round_from_profile() {
        let profile = DifficultyProfile::builtin(Difficulty::Easy);
        let round = RoundState::new(&profile, 12.5);
        assert_eq!(round.lives, 5);
        assert_eq!(round.score, 0);
        assert_eq!(round.time_remaining, 120);
        assert_eq!(round.status, RoundStatus::Active);
        assert!(!round.hint_used);
        assert_eq!(round.target(), None);
    }

    #[test]
    fn test_target_prefers_obstacle_head() {
        let profile = DifficultyProfile::builtin(Difficulty::Medium);
        let mut round = RoundState::new(&profile, 0.0);
        round.current_word = Some("prompt".into());
        assert_eq!(round.target(), Some("prompt"));
        let id = round.next_obstacle_id();
        round.obstacles.push_back(Obstacle {
            id,
            x: 800.0,
            word: "rock".into(),
            width: 40.0,
            height: 50.0,
        });
        assert_eq!(round.target(), Some("rock"));
    }

    #[test]
    fn test_lose_life_saturates() {
        let profile = DifficultyProfile::builtin(Difficulty::Hard);
        let mut round = RoundState::new(&profile, 0.0);
        assert!(round.lose_life());
        assert!(round.lose_life());
        assert!(!round.lose_life());
        assert!(!round.lose_life());
        assert_eq!(round.lives, 0);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = serde_json::to_value(RoundSnapshot::menu()).unwrap();
        assert_eq!(json["status"], "menu");

        let profile = DifficultyProfile::builtin(Difficulty::Easy);
        let mut round = RoundState::new(&profile, 0.0);
        round.status = RoundStatus::Finished(Outcome::Win);
        let json = serde_json::to_value(round.snapshot()).unwrap();
        assert_eq!(json["status"], "finished");
        assert_eq!(json["outcome"], "win");
        assert_eq!(json["difficulty"], "easy");
    }
}
