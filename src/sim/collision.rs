//! Grid movement and player/ghost contact
//!
//! Movement is one cell at a time. The only non-trivial geometry is the
//! tunnel: stepping off either edge of the board lands on the opposite edge of
//! the tunnel row.

use glam::IVec2;

use super::grid::Grid;
use super::state::{Direction, Entity, GameEvent, GameState};
use crate::consts::*;

/// Where a step from `pos` toward `dir` would land, or None if it hits a wall
pub fn destination(grid: &Grid, pos: IVec2, dir: Direction) -> Option<IVec2> {
    let mut next = pos + dir.offset();

    // Tunnel warp
    let seam = MAP_COLS as i32 - 1;
    if next.x < 0 {
        next = IVec2::new(seam, TUNNEL_ROW);
    } else if next.x >= seam {
        next = IVec2::new(0, TUNNEL_ROW);
    }

    if grid.tile(next).blocks() {
        None
    } else {
        Some(next)
    }
}

/// Try to step `entity` one cell toward `dir`.
///
/// With `commit == false` this is a pure feasibility probe: the entity is
/// never touched. With `commit == true` a successful step updates position
/// and facing.
pub fn attempt_move(grid: &Grid, entity: &mut Entity, dir: Direction, commit: bool) -> bool {
    match destination(grid, entity.pos, dir) {
        Some(next) => {
            if commit {
                entity.pos = next;
                entity.dir = dir;
            }
            true
        }
        None => false,
    }
}

/// Result of checking player/ghost contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Nobody shares the player's cell
    None,
    /// Frightened ghosts were eaten (count)
    GhostsEaten(u32),
    /// A ghost got the player; lives already decremented
    PlayerCaught { lives_left: u8 },
}

/// Resolve every ghost standing on the player's cell.
///
/// Frightened ghosts (while hunter mode runs) are sent home and scored with
/// the running combo. Any other ghost captures the player and stops the scan.
pub fn detect_captures(state: &mut GameState) -> CaptureOutcome {
    let mut eaten = 0;
    for i in 0..state.ghosts.len() {
        if state.ghosts[i].pos != state.player.pos {
            continue;
        }

        if state.power_ms > 0 && state.ghosts[i].scared {
            let points = state.combo * CAPTURE_BONUS;
            state.score += points;
            state.combo += 1;

            let ghost = &mut state.ghosts[i];
            ghost.pos = GHOST_HOME;
            ghost.scared = false;
            log::debug!("{} eaten for {} points", ghost.kind.name(), points);
            state.events.push(GameEvent::GhostEaten {
                kind: ghost.kind,
                points,
            });
            eaten += 1;
        } else {
            state.lives = state.lives.saturating_sub(1);
            log::debug!(
                "player caught by {} ({} lives left)",
                state.ghosts[i].kind.name(),
                state.lives
            );
            state.events.push(GameEvent::PlayerCaught {
                lives_left: state.lives,
            });
            return CaptureOutcome::PlayerCaught {
                lives_left: state.lives,
            };
        }
    }

    if eaten > 0 {
        CaptureOutcome::GhostsEaten(eaten)
    } else {
        CaptureOutcome::None
    }
}
