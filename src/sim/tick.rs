//! Per-tick round advancement
//!
//! Countdown for timed rounds, obstacle motion and the spawn timer for
//! obstacle rounds. The engine decides what a result means for the round.

use rand::Rng;

use super::state::{GameEvent, Obstacle, RoundState};
use super::words::WordBank;
use crate::settings::FieldGeometry;

/// What a tick did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Continue,
    /// Countdown hit zero
    TimeExpired,
    /// Leading obstacle crossed the player boundary
    Collision,
}

/// Advance the countdown by one second
pub fn countdown(round: &mut RoundState) -> TickResult {
    round.time_remaining = round.time_remaining.saturating_sub(1);
    if round.time_remaining == 0 {
        TickResult::TimeExpired
    } else {
        TickResult::Continue
    }
}

/// Move every obstacle left by the current speed and check the leading one
pub fn move_obstacles(round: &mut RoundState, field: &FieldGeometry) -> TickResult {
    let speed = round.game_speed;
    for obstacle in round.obstacles.iter_mut() {
        obstacle.x -= speed;
    }
    match round.obstacles.front() {
        Some(lead) if lead.x < field.player_boundary => TickResult::Collision,
        _ => TickResult::Continue,
    }
}

/// Whether the newest obstacle is far enough from the spawn edge
pub fn can_spawn(round: &RoundState, field: &FieldGeometry) -> bool {
    round
        .obstacles
        .back()
        .is_none_or(|newest| newest.travelled(field.width) > field.min_spawn_gap)
}

/// Place a new obstacle at the right edge if spacing allows.
/// Returns the new obstacle's ID.
pub fn try_spawn<R: Rng + ?Sized>(
    round: &mut RoundState,
    field: &FieldGeometry,
    bank: &WordBank,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<u32> {
    if !can_spawn(round, field) {
        return None;
    }
    let word = match bank.sample(round.difficulty(), rng) {
        Ok(word) => word.to_string(),
        Err(err) => {
            log::warn!("Skipping spawn: {}", err);
            return None;
        }
    };
    let id = round.next_obstacle_id();
    log::debug!("Spawned obstacle {} '{}'", id, word);
    events.push(GameEvent::Spawned {
        id,
        word: word.clone(),
    });
    round.obstacles.push_back(Obstacle {
        id,
        x: field.width,
        word,
        width: field.obstacle_width,
        height: field.obstacle_height,
    });
    Some(id)
}

/// Random frames until the next spawn attempt
pub fn spawn_delay_frames<R: Rng + ?Sized>(field: &FieldGeometry, rng: &mut R) -> u32 {
    let secs = rng.random_range(field.spawn_interval_min_secs..field.spawn_interval_max_secs);
    ((secs * field.frames_per_sec as f32).round() as u32).max(1)
}

/// Run the spawn timer for one frame. An attempt happens when the cooldown
/// runs out, and the next one is scheduled whether or not it placed anything.
pub fn tick_spawner<R: Rng + ?Sized>(
    round: &mut RoundState,
    field: &FieldGeometry,
    bank: &WordBank,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    round.spawn_cooldown = round.spawn_cooldown.saturating_sub(1);
    if round.spawn_cooldown == 0 {
        try_spawn(round, field, bank, rng, events);
        round.spawn_cooldown = spawn_delay_frames(field, rng);
    }
}
