// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grid layout: intersection pixel positions for a surface size

use egui::{Pos2, Rect, Vec2};
use goban_core::{BoardSize, Coord};

/// Margin in grid spacings left of the first and right of the last column
pub const MARGIN_X: [f32; 2] = [1.5, 0.75];
/// Margin in grid spacings below the first and above the last row
pub const MARGIN_Y: [f32; 2] = [1.125, 0.75];

/// Pixel geometry of the board grid, rebuilt on every resize
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    pub board_size: BoardSize,
    /// Surface size the layout was computed for
    pub surface: Vec2,
    /// Column positions, left to right
    pub x: Vec<f32>,
    /// Row positions, bottom to top
    pub y: Vec<f32>,
    /// Distance between adjacent intersections
    pub grid_spacing: f32,
    pub stone_radius: f32,
}

impl GridGeometry {
    /// Lay out `size` on a `surface_width` x `surface_height` surface.
    ///
    /// A single spacing keeps cells square; leftover space is split evenly on
    /// both sides of each axis. Positions are snapped to whole pixels from
    /// the margin edge so lines do not blur.
    pub fn compute(size: BoardSize, surface_width: f32, surface_height: f32, stone_size_ratio: f32) -> Self {
        let width = non_negative(surface_width);
        let height = non_negative(surface_height);

        let x_units = (size.width - 1) as f32 + MARGIN_X[0] + MARGIN_X[1];
        let y_units = (size.height - 1) as f32 + MARGIN_Y[0] + MARGIN_Y[1];
        let grid_spacing = (width / x_units).min(height / y_units).max(0.0);

        let extra_x = (width - x_units * grid_spacing) / 2.0;
        let extra_y = (height - y_units * grid_spacing) / 2.0;
        let axis = |count: u8, margin: f32, extra: f32| -> Vec<f32> {
            (0..count)
                .map(|i| extra + ((margin + i as f32) * grid_spacing + 0.5).floor())
                .collect()
        };

        Self {
            board_size: size,
            surface: Vec2::new(width, height),
            x: axis(size.width, MARGIN_X[0], extra_x),
            y: axis(size.height, MARGIN_Y[0], extra_y),
            grid_spacing,
            stone_radius: grid_spacing * stone_size_ratio,
        }
    }

    /// False for a zero-sized surface; nothing should be drawn then
    pub fn is_drawable(&self) -> bool {
        self.grid_spacing > 0.0
    }

    /// Pixel position of an intersection
    pub fn position(&self, coord: Coord) -> Option<Pos2> {
        let x = self.x.get(coord.x as usize)?;
        let y = self.y.get(coord.y as usize)?;
        Some(Pos2::new(*x, *y))
    }

    /// The whole surface in board space
    pub fn surface_rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.surface)
    }

    /// Star point intersections: the cross product of both axes' indices
    pub fn star_points(&self) -> Vec<Coord> {
        let ys = star_point_indices(self.board_size.height);
        star_point_indices(self.board_size.width)
            .into_iter()
            .flat_map(|x| ys.iter().map(move |&y| Coord::new(x, y)))
            .collect()
    }
}

fn non_negative(v: f32) -> f32 {
    if v > 0.0 {
        v
    } else {
        0.0
    }
}

/// Star point indices along one axis, ascending.
///
/// Inset 3 from the edge on axes up to 11 lines, 4 beyond; none below 7
/// lines; the center only on odd axes longer than 7.
pub fn star_point_indices(count: u8) -> Vec<u8> {
    if count < 7 {
        return Vec::new();
    }
    let inset = if count <= 11 { 3 } else { 4 };
    let mut indices = vec![inset - 1, count - inset];
    if count % 2 == 1 && count > 7 {
        indices.push(count / 2);
    }
    indices.sort_unstable();
    indices
}
