//! Plain-text view of the board and HUD

use std::fmt::Write;

use crate::game::Game;
use crate::highscores::HighScores;
use crate::sim::{Entity, EntityKind, GameState, Phase};

/// Ticks per half-period of the frightened flash
const FLASH_TICKS: u64 = 8;

fn player_glyph(player: &Entity) -> char {
    // Animation phase: open/closed mouth
    if player.scared { 'c' } else { 'C' }
}

fn ghost_glyph(state: &GameState, ghost: &Entity) -> char {
    if ghost.scared && state.power_active() {
        if state.power_warning() && (state.time_ticks / FLASH_TICKS) % 2 == 1 {
            return 'w';
        }
        return 'm';
    }
    match ghost.kind {
        EntityKind::Chaser => 'R',
        EntityKind::Ambusher => 'P',
        EntityKind::Flanker => 'B',
        EntityKind::Wanderer => 'Y',
        EntityKind::Player => '?',
    }
}

/// Render the maze with every entity on it, one line per row
pub fn draw_board(state: &GameState) -> String {
    let mut rows: Vec<Vec<char>> = state
        .grid
        .rows()
        .map(|row| row.iter().map(|t| t.as_char()).collect())
        .collect();

    let mut put = |e: &Entity, ch: char| {
        if let Some(cell) = rows
            .get_mut(e.row() as usize)
            .and_then(|r| r.get_mut(e.col() as usize))
        {
            *cell = ch;
        }
    };
    put(&state.player, player_glyph(&state.player));
    // Later ghosts draw over earlier ones
    for ghost in &state.ghosts {
        put(ghost, ghost_glyph(state, ghost));
    }

    let mut out = String::with_capacity(rows.len() * (rows[0].len() + 1));
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// Score, lives and level on one line
pub fn hud_line(state: &GameState) -> String {
    let mut line = format!(
        "SCORE {:>6}  LIVES {}  LEVEL {}",
        state.score, state.lives, state.level
    );
    if state.power_active() {
        let _ = write!(line, "  POWER {:>2}s", (state.power_ms + 999) / 1000);
    }
    line
}

pub fn ranking_table(scores: &HighScores) -> String {
    if scores.is_empty() {
        return "No scores yet\n".to_string();
    }
    let mut out = String::new();
    for (i, e) in scores.entries.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {:<10} {:>7}", i + 1, e.name, e.score);
    }
    out
}

/// Whole screen for the current phase
pub fn draw(game: &Game) -> String {
    let state = game.state();
    match state.phase {
        Phase::Menu => "MAZE CHASE\n\n[Enter] Start  [H] Help  [R] Ranking  [Esc] Quit\n".to_string(),
        Phase::Help => "Eat every dot. Power pellets let you eat the ghosts.\n[Esc] Back\n".to_string(),
        Phase::Ranking => format!("HIGH SCORES\n{}[Esc] Back\n", ranking_table(game.scores())),
        Phase::EnterName => format!("NAME: {}_\n", game.name()),
        _ => {
            let banner = match state.phase {
                Phase::StartLevel => format!("READY {}", (game.countdown_ms() + 999) / 1000),
                Phase::Paused => "PAUSED".to_string(),
                Phase::LifeLost => "CAUGHT!".to_string(),
                Phase::GameOver => "GAME OVER".to_string(),
                Phase::GameComplete => "YOU WIN".to_string(),
                _ => String::new(),
            };
            format!("{}{}\n{}\n", draw_board(state), hud_line(state), banner)
        }
    }
}
