//! Fixed timestep simulation tick
//!
//! One call advances the board by `TICK_MS`. Order within a tick matters:
//! hunter timer, ghosts, contact check, player, contact check, pickup.

use rand::Rng;

use super::ai::update_ghosts;
use super::collision::{CaptureOutcome, attempt_move, detect_captures};
use super::flow::Trigger;
use super::grid::Tile;
use super::state::{Direction, GameEvent, GameState, Phase};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steer the player (applied before movement)
    pub direction: Option<Direction>,
    /// Idle/demo mode - the game steers the player itself
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the trigger for the phase machine when the tick ended the
/// player's life or cleared the board. Does nothing outside `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<Trigger> {
    if state.phase != Phase::Playing {
        return None;
    }
    state.time_ticks += 1;

    if let Some(dir) = input.direction {
        state.player.dir = dir;
    }
    if input.autopilot {
        if let Some(dir) = autopilot_direction(state) {
            state.player.dir = dir;
        }
    }

    update_power_timer(state);

    update_ghosts(state);
    if let CaptureOutcome::PlayerCaught { lives_left } = detect_captures(state) {
        return Some(Trigger::PlayerCaught { lives_left });
    }

    state.player.move_timer += TICK_MS;
    if state.player.move_timer < PLAYER_PERIOD_MS {
        return None;
    }
    state.player.move_timer = 0;

    let dir = state.player.dir;
    if !attempt_move(&state.grid, &mut state.player, dir, true) {
        return None;
    }
    if let CaptureOutcome::PlayerCaught { lives_left } = detect_captures(state) {
        return Some(Trigger::PlayerCaught { lives_left });
    }

    consume_pickup(state)
}

/// Count hunter mode down; the tick it runs out every ghost calms down
fn update_power_timer(state: &mut GameState) {
    if state.power_ms <= 0 {
        return;
    }
    state.power_ms -= TICK_MS;
    if state.power_ms <= 0 {
        state.power_ms = 0;
        for ghost in &mut state.ghosts {
            ghost.scared = false;
        }
        log::debug!("hunter mode over");
        state.events.push(GameEvent::PowerExpired);
    }
}

/// Eat whatever is under the player and check for a cleared board
fn consume_pickup(state: &mut GameState) -> Option<Trigger> {
    let tile = state.grid.take_pickup(state.player.pos)?;
    state.dots_eaten += 1;

    match tile {
        Tile::PowerPellet => {
            state.score += POWER_PELLET_SCORE;
            state.combo = 1;
            state.power_ms = POWER_DURATION_MS;
            for ghost in &mut state.ghosts {
                ghost.scared = true;
            }
            log::debug!("hunter mode for {} ms", POWER_DURATION_MS);
            state.events.push(GameEvent::PowerPelletEaten);
        }
        _ => {
            state.score += DOT_SCORE;
            state.events.push(GameEvent::DotEaten);
        }
    }

    if state.dots_eaten < TOTAL_PICKUPS {
        return None;
    }

    state.events.push(GameEvent::LevelWon { level: state.level });
    Some(Trigger::LevelCleared {
        final_level: state.level >= MAX_LEVEL,
    })
}

/// Demo steering: keep going while the corridor is open, otherwise pick a
/// random open turn that isn't a U-turn (U-turn only from a dead end).
pub fn autopilot_direction(state: &mut GameState) -> Option<Direction> {
    let current = state.player.dir;
    let mut probe = state.player;
    let open: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&d| d != current.reverse() && attempt_move(&state.grid, &mut probe, d, false))
        .collect();

    if open.is_empty() {
        return Some(current.reverse());
    }
    // Only re-decide at junctions, and only once per player step
    if state.player.move_timer + TICK_MS < PLAYER_PERIOD_MS {
        return None;
    }
    if open.len() == 1 {
        return Some(open[0]);
    }
    let i = state.rng().random_range(0..open.len());
    Some(open[i])
}
