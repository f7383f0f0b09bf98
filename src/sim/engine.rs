//! Round lifecycle: Menu -> Active -> Finished
//!
//! The engine owns the single live `RoundState`, the RNG and the tick source
//! handle. It never renders; the front end reads `snapshot()` and drains
//! `GameEvent`s after each command.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::{Difficulty, DifficultyRegistry};
use super::error::{ConfigError, GameError};
use super::scoring::ScoringPolicy;
use super::state::{GameEvent, Outcome, RoundSnapshot, RoundState, RoundStatus, RoundSummary};
use super::tick::{self, TickResult};
use super::words::WordBank;
use crate::platform::{Clock, TickHandle, TickSchedule, TickScheduler};
use crate::settings::{InputMode, Settings};

/// What happened to a piece of typed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not evaluated (no active round, blank text, nothing to type)
    Ignored,
    /// Keystroke accepted but not a match yet
    Pending,
    Correct,
    Incorrect,
}

impl InputOutcome {
    /// Whether the front end should clear its input field
    pub fn clears_input(&self) -> bool {
        matches!(self, InputOutcome::Correct | InputOutcome::Incorrect)
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Game round state machine
pub struct GameEngine<S: TickScheduler, C: Clock> {
    settings: Settings,
    registry: DifficultyRegistry,
    bank: WordBank,
    policy: Box<dyn ScoringPolicy>,
    rng: Pcg32,
    scheduler: S,
    clock: C,
    tick_handle: Option<TickHandle>,
    round: Option<RoundState>,
    events: Vec<GameEvent>,
}

impl<S: TickScheduler, C: Clock> GameEngine<S, C> {
    /// Create an engine. Word pools for every registered tier are checked
    /// up front so a round can never start without words.
    pub fn new(
        settings: Settings,
        registry: DifficultyRegistry,
        bank: WordBank,
        scheduler: S,
        clock: C,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        for difficulty in registry.tiers() {
            bank.check_pool(difficulty)?;
        }
        let seed = settings
            .seed
            .unwrap_or_else(|| (clock.now_secs() * 1000.0) as u64);
        log::info!(
            "Engine ready: variant={}, input={:?}, seed={}",
            settings.variant.as_str(),
            settings.input_mode,
            seed
        );
        Ok(Self {
            policy: settings.variant.scoring().policy(),
            settings,
            registry,
            bank,
            rng: Pcg32::seed_from_u64(seed),
            scheduler,
            clock,
            tick_handle: None,
            round: None,
            events: Vec::new(),
        })
    }

    /// Engine with built-in profiles and words
    pub fn with_defaults(settings: Settings, scheduler: S, clock: C) -> Result<Self, ConfigError> {
        Self::new(
            settings,
            DifficultyRegistry::default(),
            WordBank::default(),
            scheduler,
            clock,
        )
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn status(&self) -> RoundStatus {
        self.round
            .as_ref()
            .map_or(RoundStatus::Menu, |round| round.status)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.round
            .as_ref()
            .map_or_else(RoundSnapshot::menu, RoundState::snapshot)
    }

    /// Final numbers, once the round is finished
    pub fn summary(&self) -> Option<RoundSummary> {
        self.round.as_ref().and_then(|round| round.summary)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start (or restart) a round from a difficulty key
    pub fn start(&mut self, key: &str) -> Result<(), GameError> {
        let difficulty =
            Difficulty::from_str(key).ok_or_else(|| GameError::InvalidDifficulty(key.to_string()))?;
        self.start_difficulty(difficulty)
    }

    /// Start (or restart) a round. On error nothing changes.
    pub fn start_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        let profile = self
            .registry
            .get(difficulty)
            .ok_or_else(|| GameError::InvalidDifficulty(difficulty.to_string()))?;
        self.bank.check_pool(difficulty)?;

        let variant = self.settings.variant;
        let field = self.settings.field;
        let mut round = RoundState::new(profile, self.clock.now_secs());
        let mut events = Vec::new();
        if variant.spawns_obstacles() {
            round.word_goal = None;
            tick::try_spawn(&mut round, &field, &self.bank, &mut self.rng, &mut events);
            round.spawn_cooldown = tick::spawn_delay_frames(&field, &mut self.rng);
        } else {
            round.current_word = Some(self.bank.sample(difficulty, &mut self.rng)?.to_string());
        }

        self.stop_ticking();
        self.tick_handle = Some(self.scheduler.start(TickSchedule {
            period_ms: variant.tick_period_ms(),
        }));
        log::info!(
            "Round started: {} ({} lives, {}s)",
            difficulty,
            round.lives,
            round.time_remaining
        );
        self.round = Some(round);
        self.events.extend(events);
        self.events.push(GameEvent::StateChanged);
        Ok(())
    }

    /// Advance one tick. Ignored unless a round is active.
    pub fn on_tick(&mut self) {
        let variant = self.settings.variant;
        let field = self.settings.field;
        let Some(round) = self.round.as_mut().filter(|r| r.is_active()) else {
            return;
        };

        if variant.is_timed() && tick::countdown(round) == TickResult::TimeExpired {
            self.end_round(Outcome::Loss);
            return;
        }

        if variant.spawns_obstacles() {
            if tick::move_obstacles(round, &field) == TickResult::Collision {
                self.handle_collision();
                if !self.status_is_active() {
                    return;
                }
            }
            if let Some(round) = self.round.as_mut() {
                tick::tick_spawner(round, &field, &self.bank, &mut self.rng, &mut self.events);
            }
        }
        self.events.push(GameEvent::StateChanged);
    }

    /// Apply queued input first, then one tick. A round cannot be won or
    /// lost on input that arrived in the same step as expiry.
    pub fn step<I, T>(&mut self, pending: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for text in pending {
            self.submit_input(text.as_ref());
        }
        self.on_tick();
    }

    /// Keystroke path. In exact-match mode a matching text is submitted at
    /// once; anything else waits. Confirm-key mode ignores keystrokes.
    pub fn input_changed(&mut self, text: &str) -> InputOutcome {
        if self.settings.input_mode == InputMode::ConfirmKey {
            return InputOutcome::Ignored;
        }
        let Some(target) = self.active_target() else {
            return InputOutcome::Ignored;
        };
        if normalize(text) == target {
            self.submit_input(text)
        } else {
            InputOutcome::Pending
        }
    }

    /// Evaluate typed text against the current target
    pub fn submit_input(&mut self, raw: &str) -> InputOutcome {
        let typed = normalize(raw);
        if typed.is_empty() {
            return InputOutcome::Ignored;
        }
        let Some(target) = self.active_target() else {
            return InputOutcome::Ignored;
        };
        let Some(round) = self.round.as_mut() else {
            return InputOutcome::Ignored;
        };
        round.total_attempts += 1;

        if typed != target {
            self.events.push(GameEvent::Error { typed });
            if !round.lose_life() {
                self.end_round(Outcome::Loss);
            } else {
                self.events.push(GameEvent::StateChanged);
            }
            return InputOutcome::Incorrect;
        }

        round.score += self.policy.score_for_correct(&round.profile);
        round.words_correct += 1;
        round.hint = None;
        self.events.push(GameEvent::Success { word: target });

        if self.settings.variant.spawns_obstacles() {
            round.obstacles.pop_front();
            let base = round.profile.base_speed.unwrap_or(crate::consts::DEFAULT_SPEED);
            let speed = self.policy.speed_for_score(base, round.score);
            if speed > round.game_speed {
                log::debug!("Speed increased to {}", speed);
                round.game_speed = speed;
                self.events.push(GameEvent::SpeedUp { speed });
            }
        } else {
            match self.bank.sample(round.difficulty(), &mut self.rng) {
                Ok(word) => round.current_word = Some(word.to_string()),
                Err(err) => log::warn!("No next word: {}", err),
            }
        }

        if round.goal_reached() {
            self.end_round(Outcome::Win);
        } else {
            self.events.push(GameEvent::StateChanged);
        }
        InputOutcome::Correct
    }

    /// Leading obstacle hit the player: costs a life like a wrong word.
    /// A replacement is spawned while lives remain.
    pub fn handle_collision(&mut self) {
        let field = self.settings.field;
        let Some(round) = self.round.as_mut().filter(|r| r.is_active()) else {
            return;
        };
        let Some(obstacle) = round.obstacles.pop_front() else {
            return;
        };
        round.hint = None;
        self.events.push(GameEvent::Collision {
            word: obstacle.word,
        });
        if round.lose_life() {
            tick::try_spawn(round, &field, &self.bank, &mut self.rng, &mut self.events);
            self.events.push(GameEvent::StateChanged);
        } else {
            self.end_round(Outcome::Loss);
        }
    }

    /// One-time partial reveal of the current target. Returns the hint when
    /// this call revealed it; repeated calls change nothing.
    pub fn request_hint(&mut self) -> Option<String> {
        let style = self.settings.hint_style;
        let round = self.round.as_mut().filter(|r| r.is_active() && !r.hint_used)?;
        let hint = style.render(round.target()?);
        round.hint_used = true;
        round.hint = Some(hint.clone());
        self.events.push(GameEvent::HintRevealed { hint: hint.clone() });
        self.events.push(GameEvent::StateChanged);
        Some(hint)
    }

    /// Finish the active round and stop its tick source
    pub fn end_round(&mut self, outcome: Outcome) {
        let now = self.clock.now_secs();
        let Some(round) = self.round.as_mut().filter(|r| r.is_active()) else {
            return;
        };
        let summary = RoundSummary {
            score: round.score,
            words_correct: round.words_correct,
            accuracy: round.accuracy(),
            elapsed_secs: (now - round.started_at).max(0.0).round() as u64,
            outcome,
        };
        round.status = RoundStatus::Finished(outcome);
        round.summary = Some(summary);
        log::info!(
            "Round over: {:?}, score {}, accuracy {}%",
            outcome,
            summary.score,
            summary.accuracy
        );
        self.stop_ticking();
        self.events.push(GameEvent::RoundEnded { summary });
        self.events.push(GameEvent::StateChanged);
    }

    /// Drop the round and go back to the menu
    pub fn return_to_menu(&mut self) {
        self.stop_ticking();
        if self.round.take().is_some() {
            self.events.push(GameEvent::StateChanged);
        }
    }

    fn stop_ticking(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn status_is_active(&self) -> bool {
        self.status() == RoundStatus::Active
    }

    fn active_target(&self) -> Option<String> {
        self.round
            .as_ref()
            .filter(|r| r.is_active())
            .and_then(|r| r.target())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualClock, ManualScheduler};
    use crate::settings::{FieldGeometry, HintStyle, RoundVariant};
    use proptest::prelude::*;

    type Engine = GameEngine<ManualScheduler, ManualClock>;

    fn engine(variant: RoundVariant) -> (Engine, ManualClock) {
        let settings = Settings {
            seed: Some(42),
            ..Settings::for_variant(variant)
        };
        let clock = ManualClock::new(1_000.0);
        let engine =
            GameEngine::with_defaults(settings, ManualScheduler::new(), clock.clone()).unwrap();
        (engine, clock)
    }

    fn engine_with(settings: Settings) -> Engine {
        GameEngine::with_defaults(settings, ManualScheduler::new(), ManualClock::new(0.0))
            .unwrap()
    }

    fn target(engine: &Engine) -> String {
        engine.round().unwrap().target().unwrap().to_string()
    }

    #[test]
    fn test_start_initializes_round() {
        for d in Difficulty::ALL {
            let (mut engine, _) = engine(RoundVariant::Prompt);
            engine.start(d.as_str()).unwrap();
            let round = engine.round().unwrap();
            let profile = DifficultyRegistry::default().get(d).unwrap().clone();
            assert_eq!(round.lives, profile.initial_lives);
            assert_eq!(round.score, 0);
            assert_eq!(round.time_remaining, profile.time_limit_secs);
            assert_eq!(engine.status(), RoundStatus::Active);
            assert!(round.current_word.is_some());
            assert_eq!(engine.scheduler().active_count(), 1);
            assert_eq!(engine.scheduler().active()[0].1.period_ms, 1000);
        }
    }

    #[test]
    fn test_invalid_difficulty_changes_nothing() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        let err = engine.start("impossible").unwrap_err();
        assert_eq!(err, GameError::InvalidDifficulty("impossible".into()));
        assert_eq!(engine.status(), RoundStatus::Menu);
        assert_eq!(engine.scheduler().active_count(), 0);

        // A live round survives a bad restart
        engine.start("easy").unwrap();
        let before = target(&engine);
        assert!(engine.start("").is_err());
        assert_eq!(engine.status(), RoundStatus::Active);
        assert_eq!(target(&engine), before);
        assert_eq!(engine.scheduler().active_count(), 1);
    }

    #[test]
    fn test_unregistered_tier_is_invalid() {
        let registry = DifficultyRegistry::from_profiles([
            crate::sim::difficulty::DifficultyProfile::builtin(Difficulty::Easy),
        ])
        .unwrap();
        let mut engine = GameEngine::new(
            Settings::default(),
            registry,
            WordBank::default(),
            ManualScheduler::new(),
            ManualClock::new(0.0),
        )
        .unwrap();
        assert!(matches!(
            engine.start("hard"),
            Err(GameError::InvalidDifficulty(_))
        ));
        assert!(engine.start("easy").is_ok());
    }

    #[test]
    fn test_empty_pool_rejected_at_startup() {
        let bank = WordBank::new([
            (Difficulty::Easy, vec!["sun".into()]),
            (Difficulty::Medium, vec![]),
            (Difficulty::Hard, vec!["eclipse".into()]),
        ]);
        let result = GameEngine::new(
            Settings::default(),
            DifficultyRegistry::default(),
            bank,
            ManualScheduler::new(),
            ManualClock::new(0.0),
        );
        assert_eq!(
            result.err(),
            Some(ConfigError::EmptyPool(Difficulty::Medium))
        );
    }

    #[test]
    fn test_correct_word_scores_with_multiplier() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        engine.start("medium").unwrap();
        let word = target(&engine);
        let typed = format!("  {}  ", word.to_uppercase());
        assert_eq!(engine.submit_input(&typed), InputOutcome::Correct);
        let round = engine.round().unwrap();
        assert_eq!(round.score, 15);
        assert_eq!(round.words_correct, 1);
        assert_eq!(round.total_attempts, 1);
        assert_eq!(round.lives, 4);
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::Success { word }));
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        assert_eq!(engine.submit_input("word"), InputOutcome::Ignored);
        engine.start("easy").unwrap();
        assert_eq!(engine.submit_input("   "), InputOutcome::Ignored);
        assert_eq!(engine.submit_input(""), InputOutcome::Ignored);
        assert_eq!(engine.round().unwrap().total_attempts, 0);
    }

    #[test]
    fn test_wrong_words_until_loss() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        engine.start("easy").unwrap();
        assert!(!engine.round().unwrap().current_word.as_ref().unwrap().is_empty());
        for i in 0..5 {
            assert_eq!(engine.status(), RoundStatus::Active, "attempt {i}");
            assert_eq!(engine.submit_input("zzzz"), InputOutcome::Incorrect);
        }
        assert_eq!(engine.status(), RoundStatus::Finished(Outcome::Loss));
        assert_eq!(engine.round().unwrap().lives, 0);
        assert_eq!(engine.scheduler().active_count(), 0);

        // Finished is terminal for input and ticks
        assert_eq!(engine.submit_input("zzzz"), InputOutcome::Ignored);
        engine.on_tick();
        assert_eq!(engine.round().unwrap().total_attempts, 5);
    }

    #[test]
    fn test_timer_expiry_loses() {
        let (mut engine, clock) = engine(RoundVariant::Prompt);
        engine.start("hard").unwrap();
        for _ in 0..79 {
            engine.on_tick();
            clock.advance(1.0);
        }
        assert_eq!(engine.status(), RoundStatus::Active);
        assert_eq!(engine.round().unwrap().time_remaining, 1);
        engine.on_tick();
        assert_eq!(engine.status(), RoundStatus::Finished(Outcome::Loss));
        assert!(engine.round().unwrap().lives > 0);

        let summary = engine.summary().unwrap();
        assert_eq!(summary.elapsed_secs, 79);
        assert_eq!(summary.accuracy, 0);
        assert_eq!(summary.outcome, Outcome::Loss);
    }

    #[test]
    fn test_word_goal_wins() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        engine.start("easy").unwrap();
        for _ in 0..9 {
            let word = target(&engine);
            engine.submit_input(&word);
        }
        assert_eq!(engine.status(), RoundStatus::Active);
        let word = target(&engine);
        engine.submit_input(&word);
        assert_eq!(engine.status(), RoundStatus::Finished(Outcome::Win));
        let round = engine.round().unwrap();
        assert_eq!(round.lives, 5);
        assert!(round.time_remaining > 0);
        assert_eq!(engine.summary().unwrap().words_correct, 10);
        assert!(
            engine
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::RoundEnded { .. }))
        );
    }

    #[test]
    fn test_input_before_expiry_in_same_step() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        engine.start("easy").unwrap();
        for _ in 0..9 {
            let word = target(&engine);
            engine.submit_input(&word);
        }
        for _ in 0..119 {
            engine.on_tick();
        }
        assert_eq!(engine.round().unwrap().time_remaining, 1);

        // Last word and last second land together: the word counts first
        let word = target(&engine);
        engine.step([word]);
        assert_eq!(engine.status(), RoundStatus::Finished(Outcome::Win));
    }

    #[test]
    fn test_accuracy_summary() {
        let (mut engine, clock) = engine(RoundVariant::Prompt);
        engine.start("easy").unwrap();
        for _ in 0..3 {
            let word = target(&engine);
            engine.submit_input(&word);
        }
        engine.submit_input("nope");
        clock.advance(12.4);
        engine.end_round(Outcome::Loss);
        let summary = engine.summary().unwrap();
        assert_eq!(summary.accuracy, 75);
        assert_eq!(summary.elapsed_secs, 12);
        assert_eq!(summary.score, 30);
        assert_eq!(engine.snapshot().accuracy, 75);
    }

    #[test]
    fn test_hint_once_per_round() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        assert_eq!(engine.request_hint(), None);
        engine.start("medium").unwrap();
        let word = target(&engine);
        let hint = engine.request_hint().unwrap();
        assert_eq!(hint, HintStyle::Masked.render(&word));
        let after_one = engine.snapshot();

        assert_eq!(engine.request_hint(), None);
        assert_eq!(engine.snapshot(), after_one);
        assert_eq!(engine.round().unwrap().score, 0);

        // Hint text goes away with the word it belongs to
        engine.submit_input(&word);
        assert_eq!(engine.snapshot().hint, None);
        assert!(engine.round().unwrap().hint_used);
    }

    #[test]
    fn test_ellipsis_hint() {
        let mut engine = engine_with(Settings {
            hint_style: HintStyle::Ellipsis,
            seed: Some(9),
            ..Settings::default()
        });
        engine.start("hard").unwrap();
        let word = target(&engine);
        let hint = engine.request_hint().unwrap();
        let shown: String = word.chars().take(word.chars().count().div_ceil(2)).collect();
        assert_eq!(hint, format!("{shown}..."));
    }

    #[test]
    fn test_exact_match_mode() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        engine.start("easy").unwrap();
        let word = target(&engine);
        let partial: String = word.chars().take(2).collect();
        assert_eq!(engine.input_changed(&partial), InputOutcome::Pending);
        assert_eq!(engine.round().unwrap().total_attempts, 0);
        assert_eq!(engine.input_changed(&word), InputOutcome::Correct);
        assert_eq!(engine.round().unwrap().words_correct, 1);
    }

    #[test]
    fn test_confirm_key_mode() {
        let mut engine = engine_with(Settings {
            input_mode: InputMode::ConfirmKey,
            seed: Some(3),
            ..Settings::default()
        });
        engine.start("easy").unwrap();
        let word = target(&engine);
        assert_eq!(engine.input_changed(&word), InputOutcome::Ignored);
        assert_eq!(engine.round().unwrap().words_correct, 0);
        assert_eq!(engine.submit_input(&word), InputOutcome::Correct);
        assert!(InputOutcome::Correct.clears_input());
        assert!(!InputOutcome::Pending.clears_input());
    }

    #[test]
    fn test_restart_replaces_tick_source() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        engine.start("easy").unwrap();
        let first = engine.scheduler().active()[0].0;
        engine.submit_input(&target(&engine));
        engine.start("hard").unwrap();
        assert_eq!(engine.scheduler().active_count(), 1);
        assert_ne!(engine.scheduler().active()[0].0, first);
        assert_eq!(engine.scheduler().cancelled(), &[first]);
        let round = engine.round().unwrap();
        assert_eq!(round.score, 0);
        assert_eq!(round.words_correct, 0);
        assert_eq!(round.lives, 3);

        // Restart from Finished
        engine.end_round(Outcome::Loss);
        assert_eq!(engine.scheduler().active_count(), 0);
        engine.start("medium").unwrap();
        assert_eq!(engine.status(), RoundStatus::Active);
        assert_eq!(engine.scheduler().active_count(), 1);
    }

    #[test]
    fn test_return_to_menu() {
        let (mut engine, _) = engine(RoundVariant::Prompt);
        engine.start("easy").unwrap();
        engine.return_to_menu();
        assert_eq!(engine.status(), RoundStatus::Menu);
        assert!(engine.round().is_none());
        assert_eq!(engine.scheduler().active_count(), 0);
        assert_eq!(engine.snapshot(), RoundSnapshot::menu());
        engine.on_tick();
        assert_eq!(engine.request_hint(), None);
    }

    #[test]
    fn test_same_seed_same_words() {
        let (mut a, _) = engine(RoundVariant::Prompt);
        let (mut b, _) = engine(RoundVariant::Prompt);
        a.start("medium").unwrap();
        b.start("medium").unwrap();
        for _ in 0..5 {
            let word = target(&a);
            assert_eq!(word, target(&b));
            a.submit_input(&word);
            b.submit_input(&word);
        }
    }

    fn obstacle_engine() -> Engine {
        // Long spawn interval so only the initial obstacle exists
        let field = FieldGeometry {
            spawn_interval_min_secs: 100.0,
            spawn_interval_max_secs: 200.0,
            ..FieldGeometry::default()
        };
        engine_with(Settings {
            variant: RoundVariant::Obstacle,
            seed: Some(7),
            field,
            ..Settings::default()
        })
    }

    #[test]
    fn test_obstacle_round_start() {
        let mut engine = obstacle_engine();
        engine.start("medium").unwrap();
        let round = engine.round().unwrap();
        assert_eq!(round.obstacles.len(), 1);
        assert_eq!(round.obstacles[0].x, 800.0);
        assert_eq!(round.current_word, None);
        assert_eq!(round.word_goal, None);
        assert_eq!(round.game_speed, 2.5);
        assert_eq!(engine.scheduler().active()[0].1.period_ms, 16);
    }

    #[test]
    fn test_obstacle_collision_costs_life() {
        let mut engine = obstacle_engine();
        engine.start("medium").unwrap();
        let first = engine.round().unwrap().obstacles[0].id;
        for _ in 0..264 {
            engine.on_tick();
        }
        assert_eq!(engine.round().unwrap().lives, 4);
        engine.on_tick();

        let round = engine.round().unwrap();
        assert_eq!(round.lives, 3);
        assert_eq!(round.obstacles.len(), 1);
        assert_ne!(round.obstacles[0].id, first);
        assert_eq!(round.obstacles[0].x, 800.0);
        // Collisions are not typing attempts
        assert_eq!(round.total_attempts, 0);
    }

    #[test]
    fn test_obstacle_collisions_until_loss() {
        let mut engine = obstacle_engine();
        engine.start("hard").unwrap();
        let mut ticks = 0;
        while engine.status() == RoundStatus::Active && ticks < 10_000 {
            engine.on_tick();
            ticks += 1;
        }
        assert_eq!(engine.status(), RoundStatus::Finished(Outcome::Loss));
        let round = engine.round().unwrap();
        assert_eq!(round.lives, 0);
        assert!(round.obstacles.is_empty());
        assert_eq!(engine.scheduler().active_count(), 0);
    }

    #[test]
    fn test_obstacle_untimed() {
        let mut engine = obstacle_engine();
        engine.start("hard").unwrap();
        for _ in 0..100 {
            engine.on_tick();
        }
        assert_eq!(engine.round().unwrap().time_remaining, 80);
    }

    #[test]
    fn test_obstacle_cleared_by_typing() {
        let mut engine = obstacle_engine();
        engine.start("medium").unwrap();
        let word = target(&engine);
        assert_eq!(engine.submit_input(&word), InputOutcome::Correct);
        let round = engine.round().unwrap();
        assert!(round.obstacles.is_empty());
        // Flat 10, multiplier ignored
        assert_eq!(round.score, 10);
        // Nothing to type until the next spawn
        assert_eq!(engine.submit_input("anything"), InputOutcome::Ignored);
    }

    #[test]
    fn test_obstacle_speed_ramps_every_hundred() {
        let mut engine = engine_with(Settings {
            variant: RoundVariant::Obstacle,
            seed: Some(1),
            ..Settings::default()
        });
        engine.start("medium").unwrap();
        let mut cleared = 0;
        let mut ticks = 0;
        while cleared < 10 && ticks < 100_000 {
            if let Some(word) = engine.round().and_then(|r| r.target()).map(str::to_string) {
                engine.submit_input(&word);
                cleared += 1;
            } else {
                engine.on_tick();
                ticks += 1;
            }
        }
        let round = engine.round().unwrap();
        assert_eq!(round.score, 100);
        assert_eq!(round.game_speed, 3.0);
        assert_eq!(round.lives, 4);
        assert!(
            engine
                .drain_events()
                .contains(&GameEvent::SpeedUp { speed: 3.0 })
        );
    }

    #[test]
    fn test_obstacle_hint_targets_leading_word() {
        let mut engine = obstacle_engine();
        engine.start("easy").unwrap();
        let word = target(&engine);
        assert_eq!(engine.request_hint(), Some(HintStyle::Masked.render(&word)));
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_and_attempts_bounded(
            seed in any::<u64>(),
            actions in proptest::collection::vec(0u8..4, 1..200),
        ) {
            let mut engine = engine_with(Settings { seed: Some(seed), ..Settings::default() });
            engine.start("medium").unwrap();
            let mut last_score = 0;
            for action in actions {
                match action {
                    0 => {
                        if let Some(word) = engine.round().and_then(|r| r.target()).map(str::to_string) {
                            engine.submit_input(&word);
                        }
                    }
                    1 => { engine.submit_input("xyzzy"); }
                    2 => engine.on_tick(),
                    _ => { engine.request_hint(); }
                }
                let round = engine.round().unwrap();
                prop_assert!(round.score >= last_score);
                prop_assert!(round.total_attempts >= round.words_correct);
                prop_assert_eq!(
                    round.accuracy(),
                    crate::sim::state::accuracy_percent(round.words_correct, round.total_attempts)
                );
                if round.lives == 0 {
                    prop_assert_eq!(round.status, RoundStatus::Finished(Outcome::Loss));
                }
                last_score = round.score;
            }
        }
    }
}
