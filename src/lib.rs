//! Maze Chase - A fixed-timestep arcade maze-chase simulation
//!
//! Core modules:
//! - `sim`: Simulation (grid, movement, pursuit AI, per-tick step, phase table)
//! - `clock`: Fixed-timestep accumulator
//! - `game`: Owns the simulation and drives it from wall-clock frames
//! - `highscores` / `persistence`: Bounded score table and its JSON file
//! - `audio`, `input`, `renderer`: Thin collaborator boundaries
//! - `settings`: Player preferences

pub mod audio;
pub mod clock;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Simulation rate (steps per second)
    pub const TARGET_TPS: i32 = 60;
    /// Fixed simulation timestep in milliseconds (integer, as the arcade loop used)
    pub const TICK_MS: i32 = 1000 / TARGET_TPS;
    /// Most ticks run for one frame; any further backlog waits for later frames
    pub const MAX_SUBSTEPS: usize = 8;

    /// Grid dimensions. The last column is the tunnel seam.
    pub const MAP_ROWS: usize = 31;
    pub const MAP_COLS: usize = 29;
    /// Row that wraps horizontally
    pub const TUNNEL_ROW: i32 = 14;
    /// Pickups on a fresh board (240 dots + 4 power pellets)
    pub const TOTAL_PICKUPS: u16 = 244;

    /// Scoring
    pub const DOT_SCORE: u32 = 10;
    pub const POWER_PELLET_SCORE: u32 = 50;
    /// Multiplied by the capture combo
    pub const CAPTURE_BONUS: u32 = 200;

    /// Hunter mode duration after a power pellet
    pub const POWER_DURATION_MS: i32 = 10_000;
    /// Frightened ghosts start flashing inside this window
    pub const POWER_WARNING_MS: i32 = 3_000;

    /// Movement periods
    pub const PLAYER_PERIOD_MS: i32 = 100;
    pub const FRIGHTENED_PERIOD_MS: i32 = 150;

    /// Lives and levels
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 3;
    pub const MAX_LEVEL: u8 = 9;

    /// Spawn points (x = column, y = row)
    pub const PLAYER_START: IVec2 = IVec2::new(14, 23);
    pub const GHOST_HOME: IVec2 = IVec2::new(14, 13);
    /// Where the wanderer retreats when it gets too close
    pub const SCATTER_CORNER: IVec2 = IVec2::new(0, MAP_ROWS as i32 - 1);
    pub const SCATTER_RADIUS: i32 = 8;

    /// Presentation pacing the core keeps time for
    pub const COUNTDOWN_MS: i32 = 3_000;
    pub const DEATH_ANIMATION_MS: i32 = 1_100;
    pub const BANNER_MS: i32 = 2_000;
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}
