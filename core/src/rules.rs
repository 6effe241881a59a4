// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capture and legality rules

use crate::{board::Board, Color, Coord, GameError};
use std::collections::HashSet;

/// Place a stone and remove any opponent groups left without liberties.
///
/// Returns the captured coordinates. The board is left untouched on error.
pub fn apply_move(board: &mut Board, coord: Coord, color: Color) -> Result<Vec<Coord>, GameError> {
    if !coord.is_valid(board.size()) {
        return Err(GameError::InvalidCoordinate);
    }
    if board.get(coord).is_some() {
        return Err(GameError::OccupiedPosition);
    }

    let mut next = board.clone();
    next.place(coord, color);

    let mut captured = Vec::new();
    for neighbor in next.adjacent_coords(coord) {
        // A group touching the new stone on several sides is removed once
        if captured.contains(&neighbor) {
            continue;
        }
        if next.get(neighbor) == Some(color.opposite()) {
            let group = find_group(&next, neighbor);
            if liberties(&next, &group) == 0 {
                captured.extend(group);
            }
        }
    }
    for c in &captured {
        next.remove(*c);
    }

    if liberties(&next, &find_group(&next, coord)) == 0 {
        return Err(GameError::SelfCapture);
    }

    if !captured.is_empty() {
        tracing::trace!(x = coord.x, y = coord.y, count = captured.len(), "Stones captured");
    }
    *board = next;
    Ok(captured)
}

/// Calculate the number of liberties for a group of stones
pub fn liberties(board: &Board, group: &[Coord]) -> usize {
    let mut liberties_set = HashSet::new();

    for &coord in group {
        for neighbor in board.adjacent_coords(coord) {
            if board.get(neighbor).is_none() {
                liberties_set.insert(neighbor);
            }
        }
    }

    liberties_set.len()
}

/// Find all stones in a group connected to the stone at coord
pub fn find_group(board: &Board, coord: Coord) -> Vec<Coord> {
    let target_color = match board.get(coord) {
        Some(color) => color,
        None => return Vec::new(),
    };

    let mut group = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = vec![coord];

    while let Some(current) = queue.pop() {
        if !visited.insert(current) {
            continue;
        }
        group.push(current);

        for neighbor in board.adjacent_coords(current) {
            if board.get(neighbor) == Some(target_color) && !visited.contains(&neighbor) {
                queue.push(neighbor);
            }
        }
    }

    group
}
