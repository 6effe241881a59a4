// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban Core - Game Tree and Move Records
//!
//! This crate provides the read-only game model consumed by the board surface:
//! - Colors, coordinates and moves (with GTP coordinate strings)
//! - A rectangular board with capture rules
//! - Per-node analysis records (points lost, ownership, policy, candidates)
//! - The `GameSource` trait and an in-memory append-only `GameTree`

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod analysis;
pub mod board;
pub mod rules;
pub mod tree;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use analysis::{CandidateMove, Evaluation};
pub use tree::{GameNode, GameSource, GameTree, NodeId};

/// Column letters used by GTP, skipping the customary `I`.
pub const GTP_COLUMNS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZabcdefghjklmnopqrstuvwxyz";

/// Largest supported board dimension (one label per GTP column letter)
pub const MAX_BOARD_SIZE: u8 = 50;

/// Player color in a Go game (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (traditionally goes first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// Board coordinate of an intersection.
///
/// `x` counts columns from the left, `y` counts rows from the bottom, so GTP
/// row 1 is `y == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: u8,
    /// Y coordinate (row, from the bottom)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if coordinate is inside a board of the given size
    pub fn is_valid(&self, size: BoardSize) -> bool {
        self.x < size.width && self.y < size.height
    }
}

/// Number of intersections along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: u8,
    pub height: u8,
}

impl BoardSize {
    /// Create a board size, rejecting empty or unlabelable dimensions
    pub fn new(width: u8, height: u8) -> Result<Self, GameError> {
        let valid = |n: u8| (1..=MAX_BOARD_SIZE).contains(&n);
        if !valid(width) || !valid(height) {
            return Err(GameError::InvalidBoardSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Square board
    pub fn square(size: u8) -> Result<Self, GameError> {
        Self::new(size, size)
    }

    /// Total number of intersections
    pub fn points(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Index into a row-major analysis vector that starts at the top row
    pub fn analysis_index(&self, coord: Coord) -> usize {
        (self.height - 1 - coord.y) as usize * self.width as usize + coord.x as usize
    }

    /// Iterate all coordinates in analysis-vector order (top row first)
    pub fn analysis_order(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height)
            .rev()
            .flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}

/// GTP column label for a column index
pub fn gtp_column(x: u8) -> Option<char> {
    GTP_COLUMNS.chars().nth(x as usize)
}

/// A stone placement or a pass by one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move
    pub player: Color,
    /// Target intersection, `None` for a pass
    pub coord: Option<Coord>,
}

impl Move {
    /// A stone placed at `coord`
    pub fn play(player: Color, coord: Coord) -> Self {
        Self {
            player,
            coord: Some(coord),
        }
    }

    /// A pass
    pub fn pass(player: Color) -> Self {
        Self { player, coord: None }
    }

    pub fn is_pass(&self) -> bool {
        self.coord.is_none()
    }

    /// Color of the player who did not make this move
    pub fn opponent(&self) -> Color {
        self.player.opposite()
    }

    /// Parse a GTP vertex such as `D4`, `q16` or `pass`
    pub fn from_gtp(text: &str, player: Color, size: BoardSize) -> Result<Self, GameError> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("pass") {
            return Ok(Self::pass(player));
        }

        let invalid = || GameError::InvalidGtp(text.to_string());
        let mut chars = text.chars();
        let column = chars.next().ok_or_else(invalid)?;
        // Single-letter columns are case-insensitive on boards up to 25 wide
        let x = if size.width <= 25 {
            GTP_COLUMNS[..25].find(column.to_ascii_uppercase())
        } else {
            GTP_COLUMNS.find(column)
        }
        .ok_or_else(invalid)?;
        let row: usize = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 || row > size.height as usize || x >= size.width as usize {
            return Err(invalid());
        }

        Ok(Self::play(player, Coord::new(x as u8, (row - 1) as u8)))
    }

    /// Format this move as a GTP vertex
    pub fn gtp(&self) -> String {
        match self.coord {
            None => "pass".to_string(),
            Some(c) => match gtp_column(c.x) {
                Some(column) => format!("{}{}", column, c.y as u32 + 1),
                None => format!("?{}", c.y as u32 + 1),
            },
        }
    }
}

/// Errors that can occur while building or navigating a game
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The coordinate is outside the board
    #[error("Invalid coordinate")]
    InvalidCoordinate,

    /// The position is already occupied
    #[error("Position already occupied")]
    OccupiedPosition,

    /// The move would result in self-capture (suicide)
    #[error("Move would result in self-capture")]
    SelfCapture,

    /// Board dimensions outside 1..=50
    #[error("Invalid board size {width}x{height}")]
    InvalidBoardSize { width: u8, height: u8 },

    /// Text that is not a GTP vertex
    #[error("Invalid GTP move: {0}")]
    InvalidGtp(String),

    /// A node id that does not belong to this tree
    #[error("Unknown node {0}")]
    UnknownNode(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nineteen() -> BoardSize {
        BoardSize::square(19).unwrap()
    }

    #[test]
    fn gtp_parse_skips_i() {
        let mv = Move::from_gtp("J10", Color::Black, nineteen()).unwrap();
        assert_eq!(mv.coord, Some(Coord::new(8, 9)));

        let mv = Move::from_gtp("d4", Color::White, nineteen()).unwrap();
        assert_eq!(mv.coord, Some(Coord::new(3, 3)));
        assert_eq!(mv.gtp(), "D4");
    }

    #[test]
    fn gtp_pass_and_garbage() {
        assert!(Move::from_gtp("PASS", Color::Black, nineteen())
            .unwrap()
            .is_pass());
        assert!(Move::from_gtp("I5", Color::Black, nineteen()).is_err());
        assert!(Move::from_gtp("Z1", Color::Black, nineteen()).is_err());
        assert!(Move::from_gtp("A20", Color::Black, nineteen()).is_err());
        assert!(Move::from_gtp("", Color::Black, nineteen()).is_err());
    }

    #[test]
    fn analysis_index_starts_top_left() {
        let size = BoardSize::new(3, 2).unwrap();
        assert_eq!(size.analysis_index(Coord::new(0, 1)), 0);
        assert_eq!(size.analysis_index(Coord::new(2, 0)), 5);
        let order: Vec<_> = size.analysis_order().collect();
        assert_eq!(order[0], Coord::new(0, 1));
        assert_eq!(order[3], Coord::new(0, 0));
    }

    #[test]
    fn board_size_bounds() {
        assert!(BoardSize::new(0, 9).is_err());
        assert!(BoardSize::new(51, 9).is_err());
        assert_eq!(BoardSize::new(9, 13).unwrap().points(), 117);
    }
}
