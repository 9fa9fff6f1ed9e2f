//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (ghost slots)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod flow;
pub mod grid;
pub mod state;
pub mod tick;

pub use ai::{choose_direction, target_tile, update_ghosts};
pub use collision::{CaptureOutcome, attempt_move, destination, detect_captures};
pub use flow::{Command, Effect, Transition, Trigger, transition};
pub use grid::{Grid, Tile};
pub use state::{Direction, Entity, EntityKind, GameEvent, GameState, GhostProfile, Phase};
pub use tick::{TickInput, tick};
