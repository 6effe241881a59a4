// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pointer to intersection hit testing

use super::layout::GridGeometry;
use egui::Pos2;
use goban_core::Coord;

/// Nearest axis position to `pixel` as `(distance, index)`.
///
/// Linear scan keeping the first minimum, so ties go to the lowest index.
/// `None` only for an empty axis.
pub fn nearest(pixel: f32, positions: &[f32]) -> Option<(f32, usize)> {
    let mut best: Option<(f32, usize)> = None;
    for (i, p) in positions.iter().enumerate() {
        let d = (p - pixel).abs();
        match best {
            Some((best_d, _)) if d >= best_d => {}
            _ => best = Some((d, i)),
        }
    }
    best
}

/// Result of testing a pointer position against the whole grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardHit {
    /// Nearest intersection on both axes
    pub coord: Coord,
    /// Larger of the two axis distances
    pub distance: f32,
    /// Whether the pointer is strictly inside the dead zone
    pub on_intersection: bool,
}

/// Nearest intersection to `pos`; on it only when closer than half a spacing
pub fn hit_test(pos: Pos2, geometry: &GridGeometry) -> Option<BoardHit> {
    let (xd, xi) = nearest(pos.x, &geometry.x)?;
    let (yd, yi) = nearest(pos.y, &geometry.y)?;
    let distance = xd.max(yd);
    Some(BoardHit {
        coord: Coord::new(xi as u8, yi as u8),
        distance,
        on_intersection: distance < geometry.grid_spacing / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_hit_and_first_minimum_tie_break() {
        let positions = [10.0, 20.0, 30.0];
        assert_eq!(nearest(20.0, &positions), Some((0.0, 1)));
        assert_eq!(nearest(15.0, &positions), Some((5.0, 0)));
        assert_eq!(nearest(-100.0, &positions), Some((110.0, 0)));
        assert_eq!(nearest(1.0, &[]), None);
    }

    #[test]
    fn duplicate_positions_pick_lowest_index() {
        assert_eq!(nearest(7.0, &[5.0, 9.0, 9.0]), Some((2.0, 0)));
        assert_eq!(nearest(9.0, &[5.0, 9.0, 9.0]), Some((0.0, 1)));
    }
}
