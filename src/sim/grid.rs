//! Maze layout and the consumable overlay
//!
//! The template is parsed once from the ASCII maze below and kept untouched.
//! Play happens on a mutable copy that is restored at every level start.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAP_COLS, MAP_ROWS, TUNNEL_ROW};

/// Classic 28-column maze. The seam column is appended when parsing.
const MAZE: [&str; MAP_ROWS] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o#  #.#   #.##.#   #.#  #o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "######.##### ## #####.######",
    "######.##          ##.######",
    "######.## ###  ### ##.######",
    "######.## ##    ## ##.######",
    "      .   ########   .      ",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "######.##          ##.######",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// A single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    /// Open cell, or a pickup that has been eaten
    #[default]
    Empty,
    /// Open cell that never held a pickup (the tunnel seam)
    Floor,
    Dot,
    PowerPellet,
}

impl Tile {
    pub fn from_char(ch: char) -> Self {
        match ch {
            '#' => Tile::Wall,
            '.' => Tile::Dot,
            'o' => Tile::PowerPellet,
            ' ' => Tile::Empty,
            _ => Tile::Floor,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Dot => '.',
            Tile::PowerPellet => 'o',
            Tile::Empty | Tile::Floor => ' ',
        }
    }

    #[inline]
    pub fn blocks(self) -> bool {
        self == Tile::Wall
    }

    #[inline]
    pub fn is_pickup(self) -> bool {
        matches!(self, Tile::Dot | Tile::PowerPellet)
    }
}

type Cells = [[Tile; MAP_COLS]; MAP_ROWS];

/// Template plus the per-session copy
#[derive(Debug, Clone)]
pub struct Grid {
    template: Cells,
    cells: Cells,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Parse the maze and start from a fresh copy
    pub fn new() -> Self {
        let mut template = [[Tile::Wall; MAP_COLS]; MAP_ROWS];
        for (row, line) in MAZE.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                template[row][col] = Tile::from_char(ch);
            }
        }
        // Seam column is only open where the tunnel crosses it
        template[TUNNEL_ROW as usize][MAP_COLS - 1] = Tile::Floor;

        Self {
            template,
            cells: template,
        }
    }

    /// Tile at (row, col). Panics when out of range.
    #[inline]
    pub fn tile_at(&self, row: usize, col: usize) -> Tile {
        self.cells[row][col]
    }

    #[inline]
    pub fn set_tile(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row][col] = tile;
    }

    /// Tile at a cell position (x = column, y = row)
    #[inline]
    pub fn tile(&self, cell: IVec2) -> Tile {
        assert!(self.in_bounds(cell), "cell {cell} outside the grid");
        self.cells[cell.y as usize][cell.x as usize]
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < MAP_COLS && (cell.y as usize) < MAP_ROWS
    }

    /// Restore every pickup
    pub fn reset_to_template(&mut self) {
        self.cells = self.template;
    }

    /// Remove the pickup at `cell`, returning what was there
    pub fn take_pickup(&mut self, cell: IVec2) -> Option<Tile> {
        let tile = self.tile(cell);
        if tile.is_pickup() {
            self.cells[cell.y as usize][cell.x as usize] = Tile::Empty;
            Some(tile)
        } else {
            None
        }
    }

    pub fn pickups_remaining(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|t| t.is_pickup())
            .count()
    }

    /// Rows of the current board for text rendering
    pub fn rows(&self) -> impl Iterator<Item = &[Tile; MAP_COLS]> {
        self.cells.iter()
    }
}
