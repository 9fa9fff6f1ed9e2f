//! Rendering module
//!
//! Reads game state only. A text renderer is provided for terminals and
//! headless runs.

pub mod text;

pub use text::{draw, draw_board, hud_line};
