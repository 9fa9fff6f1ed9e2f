//! Ghost pursuit
//!
//! Each ghost picks a target cell from its archetype, then greedily steps to
//! the neighbour closest to that target. Ghosts never turn around unless they
//! are boxed in. While frightened they random-walk instead.

use glam::IVec2;
use rand::Rng;

use super::collision::attempt_move;
use super::grid::Grid;
use super::state::{Direction, Entity, EntityKind, GameState};
use crate::consts::*;
use crate::manhattan;

/// Ghost at `slot` is frightened (vulnerable and hunter mode running)
#[inline]
pub fn is_frightened(state: &GameState, slot: usize) -> bool {
    state.ghosts[slot].scared && state.power_active()
}

/// Milliseconds a ghost waits between steps
pub fn move_period(state: &GameState, slot: usize) -> i32 {
    if is_frightened(state, slot) {
        return FRIGHTENED_PERIOD_MS;
    }
    let base = state.ghosts[slot]
        .kind
        .profile()
        .map(|p| p.base_period_ms)
        .unwrap_or(PLAYER_PERIOD_MS);
    // Ghosts speed up as the board empties
    base - i32::from(state.dots_eaten >> 3)
}

/// Cell the ghost at `slot` is steering toward
pub fn target_tile(state: &GameState, slot: usize) -> IVec2 {
    let player = &state.player;
    let facing = player.dir.offset();
    let ghost = &state.ghosts[slot];

    match ghost.kind {
        EntityKind::Ambusher => {
            let mut target = player.pos + facing * 4;
            // Arcade overflow quirk: facing up also shifts the target left
            if player.dir == Direction::Up {
                target.x -= 4;
            }
            target
        }
        EntityKind::Flanker => {
            let ahead = player.pos + facing * 2;
            let chaser = state.ghosts[0].pos;
            ahead + (ahead - chaser)
        }
        EntityKind::Wanderer => {
            if manhattan(player.pos, ghost.pos) <= SCATTER_RADIUS {
                SCATTER_CORNER
            } else {
                player.pos
            }
        }
        EntityKind::Chaser | EntityKind::Player => player.pos,
    }
}

/// Best non-reversing direction toward `target`.
///
/// Candidates are scanned in priority order (up, left, down, right) and only
/// a strictly shorter squared distance replaces the current best, so ties go
/// to the earlier direction. Falls back to reversing when boxed in.
pub fn choose_direction(grid: &Grid, ghost: &Entity, target: IVec2) -> Direction {
    let reverse = ghost.dir.reverse();
    let mut best: Option<(i32, Direction)> = None;

    for dir in Direction::ALL {
        if dir == reverse {
            continue;
        }
        let next = ghost.pos + dir.offset();
        if !grid.in_bounds(next) || grid.tile(next).blocks() {
            continue;
        }
        let distance = (target - next).length_squared();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, dir));
        }
    }

    best.map(|(_, dir)| dir).unwrap_or(reverse)
}

/// Random walk: start from a random direction and take the first open,
/// non-reversing one. Reverse only when nothing else is open.
fn frightened_step(grid: &Grid, ghost: &mut Entity, start: usize) {
    let reverse = ghost.dir.reverse();
    for i in 0..4 {
        let dir = Direction::from_index(start + i);
        if dir != reverse && attempt_move(grid, ghost, dir, true) {
            return;
        }
    }
    attempt_move(grid, ghost, reverse, true);
}

/// Advance every ghost's move timer and step the ones that are due
pub fn update_ghosts(state: &mut GameState) {
    for slot in 0..state.ghosts.len() {
        state.ghosts[slot].move_timer += TICK_MS;
        if state.ghosts[slot].move_timer < move_period(state, slot) {
            continue;
        }
        state.ghosts[slot].move_timer = 0;

        if is_frightened(state, slot) {
            let start = state.rng().random_range(0..4);
            frightened_step(&state.grid, &mut state.ghosts[slot], start);
        } else {
            let target = target_tile(state, slot);
            let dir = choose_direction(&state.grid, &state.ghosts[slot], target);
            attempt_move(&state.grid, &mut state.ghosts[slot], dir, true);
        }
    }
}
