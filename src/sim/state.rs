//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]. Collaborators read it;
//! only [`crate::game::Game`] drives it.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen
    Menu,
    /// Typing a name before a new run
    EnterName,
    /// "Ready" countdown before play resumes
    StartLevel,
    /// Active gameplay
    Playing,
    /// Death animation after a capture
    LifeLost,
    /// Game is paused
    Paused,
    /// Run ended with no lives left
    GameOver,
    /// Final level cleared
    GameComplete,
    Help,
    Ranking,
}

/// Cardinal directions. Ordinal order doubles as the AI tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Priority order: up, left, down, right
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Unit step (x = column, y = row)
    #[inline]
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Down => IVec2::new(0, 1),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    #[inline]
    pub fn reverse(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps modulo 4
    #[inline]
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 4]
    }
}

/// Per-archetype constants for the ghosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostProfile {
    /// Slot in `GameState::ghosts`
    pub slot: usize,
    /// Move period at the start of a level (ms)
    pub base_period_ms: i32,
    /// Spawn cell
    pub start: IVec2,
}

/// Entity archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Heads straight for the player
    Chaser,
    /// Aims four tiles ahead of the player
    Ambusher,
    /// Pincers the player using the chaser's position
    Flanker,
    /// Chases from afar, retreats to a corner up close
    Wanderer,
}

impl EntityKind {
    pub const GHOSTS: [EntityKind; 4] = [
        EntityKind::Chaser,
        EntityKind::Ambusher,
        EntityKind::Flanker,
        EntityKind::Wanderer,
    ];

    /// Ghost constants (None for the player)
    pub fn profile(self) -> Option<GhostProfile> {
        let (slot, base_period_ms, start) = match self {
            EntityKind::Player => return None,
            EntityKind::Chaser => (0, 125, IVec2::new(14, 11)),
            EntityKind::Ambusher => (1, 135, IVec2::new(14, 13)),
            EntityKind::Flanker => (2, 145, IVec2::new(12, 13)),
            EntityKind::Wanderer => (3, 155, IVec2::new(15, 13)),
        };
        Some(GhostProfile {
            slot,
            base_period_ms,
            start,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Chaser => "chaser",
            EntityKind::Ambusher => "ambusher",
            EntityKind::Flanker => "flanker",
            EntityKind::Wanderer => "wanderer",
        }
    }
}

/// Player or ghost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub dir: Direction,
    /// Cell position (x = column, y = row)
    pub pos: IVec2,
    /// Milliseconds accumulated toward the next step
    pub move_timer: i32,
    /// Ghosts: vulnerable to capture. Player: mouth animation phase.
    pub scared: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: IVec2) -> Self {
        Self {
            kind,
            dir: Direction::Up,
            pos,
            move_timer: 0,
            scared: false,
        }
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.x
    }
}

/// Things collaborators (audio, HUD) react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DotEaten,
    PowerPelletEaten,
    PowerExpired,
    GhostEaten { kind: EntityKind, points: u32 },
    PlayerCaught { lives_left: u8 },
    LevelStarted { level: u8 },
    LevelWon { level: u8 },
    GameOver { score: u32 },
    GameComplete { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for the frightened random walk
    pub seed: u64,
    rng: Pcg32,
    pub grid: Grid,
    pub player: Entity,
    /// Chaser, ambusher, flanker, wanderer (in that order)
    pub ghosts: [Entity; 4],
    pub phase: Phase,
    pub prev_phase: Phase,
    pub score: u32,
    pub lives: u8,
    /// Pickups consumed on the current board
    pub dots_eaten: u16,
    /// Level / reward counter (1-based)
    pub level: u8,
    /// Capture multiplier for the current power-up window
    pub combo: u32,
    /// Hunter mode time remaining (ms)
    pub power_ms: i32,
    /// Time left in LifeLost / GameOver / GameComplete (ms)
    pub phase_timer_ms: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        let ghosts = EntityKind::GHOSTS.map(|kind| {
            let start = kind.profile().map(|p| p.start).unwrap_or(GHOST_HOME);
            Entity::new(kind, start)
        });
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid: Grid::new(),
            player: Entity::new(EntityKind::Player, PLAYER_START),
            ghosts,
            phase: Phase::Menu,
            prev_phase: Phase::Menu,
            score: 0,
            lives: START_LIVES,
            dots_eaten: 0,
            level: 1,
            combo: 1,
            power_ms: 0,
            phase_timer_ms: 0,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.reset_positions();
        state
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Switch phase, remembering the previous one and arming its timer
    pub fn enter(&mut self, next: Phase) {
        self.prev_phase = self.phase;
        self.phase = next;
        self.phase_timer_ms = match next {
            Phase::LifeLost => DEATH_ANIMATION_MS,
            Phase::GameOver | Phase::GameComplete => BANNER_MS,
            _ => 0,
        };
    }

    /// Put everyone back on their spawn cell and end hunter mode
    pub fn reset_positions(&mut self) {
        self.player = Entity::new(EntityKind::Player, PLAYER_START);
        for ghost in &mut self.ghosts {
            let start = ghost.kind.profile().map(|p| p.start).unwrap_or(GHOST_HOME);
            *ghost = Entity::new(ghost.kind, start);
        }
        self.power_ms = 0;
        self.combo = 1;
    }

    /// Fresh run: score, lives and level back to their starting values
    pub fn new_game(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
        self.dots_eaten = 0;
        self.reset_positions();
        self.grid.reset_to_template();
    }

    /// Board cleared: keep score and lives, advance the level
    pub fn next_level(&mut self) {
        self.dots_eaten = 0;
        self.lives = self.lives.min(MAX_LIVES);
        self.level = self.level.saturating_add(1);
        self.reset_positions();
        self.grid.reset_to_template();
    }

    /// Hunter mode is running
    #[inline]
    pub fn power_active(&self) -> bool {
        self.power_ms > 0
    }

    /// Hunter mode is about to run out (frightened ghosts flash)
    pub fn power_warning(&self) -> bool {
        self.power_active() && self.power_ms <= POWER_WARNING_MS
    }

    pub fn ghost(&self, kind: EntityKind) -> Option<&Entity> {
        kind.profile().map(|p| &self.ghosts[p.slot])
    }

    /// Flip the player's animation phase (once per presented frame)
    pub fn toggle_player_phase(&mut self) {
        self.player.scared = !self.player.scared;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
