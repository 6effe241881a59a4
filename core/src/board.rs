// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::{BoardSize, Color, Coord};
use std::collections::HashMap;

/// Rectangular grid of stones and empty intersections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Dimensions of the board
    size: BoardSize,
    /// Positions on the board, row-major from the bottom row
    positions: Vec<Option<Color>>,
}

impl Board {
    /// Create a new empty board with the specified size
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            positions: vec![None; size.points()],
        }
    }

    /// Get the stone at the specified coordinate
    pub fn get(&self, coord: Coord) -> Option<Color> {
        if !coord.is_valid(self.size) {
            return None;
        }

        self.positions[self.coord_to_index(coord)]
    }

    /// Place a stone at the specified coordinate
    pub fn place(&mut self, coord: Coord, color: Color) -> bool {
        if !coord.is_valid(self.size) {
            return false;
        }

        let idx = self.coord_to_index(coord);
        if self.positions[idx].is_some() {
            return false;
        }

        self.positions[idx] = Some(color);
        true
    }

    /// Remove a stone at the specified coordinate
    pub fn remove(&mut self, coord: Coord) -> bool {
        if !coord.is_valid(self.size) {
            return false;
        }

        let idx = self.coord_to_index(coord);
        self.positions[idx].take().is_some()
    }

    fn coord_to_index(&self, coord: Coord) -> usize {
        (coord.y as usize) * (self.size.width as usize) + (coord.x as usize)
    }

    /// Get adjacent coordinates (up, down, left, right) inside the board
    pub fn adjacent_coords(&self, coord: Coord) -> Vec<Coord> {
        let mut result = Vec::with_capacity(4);
        let (x, y) = (coord.x, coord.y);

        if y + 1 < self.size.height {
            result.push(Coord::new(x, y + 1));
        }
        if y > 0 {
            result.push(Coord::new(x, y - 1));
        }
        if x > 0 {
            result.push(Coord::new(x - 1, y));
        }
        if x + 1 < self.size.width {
            result.push(Coord::new(x + 1, y));
        }

        result
    }

    /// Get the dimensions of the board
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// All stones currently on the board
    pub fn stones(&self) -> HashMap<Coord, Color> {
        let width = self.size.width as usize;
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(idx, stone)| {
                stone.map(|color| {
                    (
                        Coord::new((idx % width) as u8, (idx / width) as u8),
                        color,
                    )
                })
            })
            .collect()
    }

    /// Count stones of the given color
    pub fn count_stones_for(&self, color: Color) -> usize {
        self.positions
            .iter()
            .filter(|stone| **stone == Some(color))
            .count()
    }
}
