// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grid layout and hit testing

mod common;

use egui::Pos2;
use goban_core::{BoardSize, Coord};
use goban_ui_egui::components::board::{hit_test, star_point_indices, GridGeometry};
use proptest::prelude::*;

/// 19x19 on a surface where the spacing comes out at exactly 40 pixels
fn integral_19() -> GridGeometry {
    GridGeometry::compute(BoardSize::square(19).unwrap(), 810.0, 795.0, 0.5)
}

#[test]
fn integral_spacing_gives_exact_steps() {
    let geometry = integral_19();
    assert_eq!(geometry.grid_spacing, 40.0);
    assert_eq!(geometry.stone_radius, 20.0);
    assert_eq!(geometry.x[0], 60.0);
    assert_eq!(geometry.y[0], 45.0);
    for axis in [&geometry.x, &geometry.y] {
        for pair in axis.windows(2) {
            assert_eq!(pair[1] - pair[0], 40.0);
        }
    }
}

#[test]
fn leftover_space_is_centered() {
    // Width-limited: 9x9 needs 10.25 x 9.875 spacings
    let geometry = GridGeometry::compute(BoardSize::square(9).unwrap(), 410.0, 600.0, 0.5);
    assert_eq!(geometry.grid_spacing, 40.0);
    let extra_y = (600.0 - 9.875 * 40.0) / 2.0;
    assert_eq!(geometry.y[0], extra_y + 45.0);
    assert_eq!(geometry.x[0], 60.0);
}

#[test]
fn rectangular_board_uses_both_dimensions() {
    let geometry = GridGeometry::compute(BoardSize::new(13, 5).unwrap(), 600.0, 300.0, 0.5);
    assert_eq!(geometry.x.len(), 13);
    assert_eq!(geometry.y.len(), 5);
    assert!(geometry.is_drawable());
}

#[test]
fn midpoint_between_lines_is_a_dead_zone() {
    let geometry = integral_19();
    // Exactly half a spacing right of column 3
    let hit = hit_test(Pos2::new(200.0, 45.0), &geometry).unwrap();
    assert_eq!(hit.coord, Coord::new(3, 0));
    assert_eq!(hit.distance, 20.0);
    assert!(!hit.on_intersection);

    let hit = hit_test(Pos2::new(199.5, 45.0), &geometry).unwrap();
    assert_eq!(hit.coord, Coord::new(3, 0));
    assert!(hit.on_intersection);
}

#[test]
fn combined_distance_is_the_larger_axis() {
    let geometry = integral_19();
    let hit = hit_test(Pos2::new(65.0, 45.0 + 19.0), &geometry).unwrap();
    assert_eq!(hit.coord, Coord::new(0, 0));
    assert_eq!(hit.distance, 19.0);
    assert!(hit.on_intersection);
}

#[test]
fn far_outside_snaps_to_edge_but_misses() {
    let geometry = integral_19();
    let hit = hit_test(Pos2::new(-500.0, 5000.0), &geometry).unwrap();
    assert_eq!(hit.coord, Coord::new(0, 18));
    assert!(!hit.on_intersection);
}

#[test]
fn star_point_sets() {
    assert_eq!(star_point_indices(9), vec![2, 4, 6]);
    assert_eq!(star_point_indices(13), vec![3, 6, 9]);
    assert_eq!(star_point_indices(19), vec![3, 9, 15]);

    let stars = integral_19().star_points();
    assert_eq!(stars.len(), 9);
    assert!(stars.contains(&Coord::new(9, 9)));
    assert!(stars.contains(&Coord::new(3, 15)));
}

#[test]
fn star_points_on_rectangular_board() {
    let geometry = GridGeometry::compute(BoardSize::new(19, 5).unwrap(), 800.0, 300.0, 0.5);
    // Short axis has no star points, so neither has the board
    assert!(geometry.star_points().is_empty());
}

proptest! {
    #[test]
    fn layout_is_deterministic(size in 1u8..=25, w in 0.0f32..2000.0, h in 0.0f32..2000.0) {
        let size = BoardSize::square(size).unwrap();
        prop_assert_eq!(GridGeometry::compute(size, w, h, 0.5), GridGeometry::compute(size, w, h, 0.5));
    }

    #[test]
    fn steps_stay_within_a_pixel_of_spacing(
        width in 1u8..=25,
        height in 1u8..=25,
        w in 50.0f32..2000.0,
        h in 50.0f32..2000.0,
    ) {
        let geometry = GridGeometry::compute(BoardSize::new(width, height).unwrap(), w, h, 0.5);
        prop_assert_eq!(geometry.x.len(), width as usize);
        prop_assert_eq!(geometry.y.len(), height as usize);
        let g = geometry.grid_spacing;
        for axis in [&geometry.x, &geometry.y] {
            for pair in axis.windows(2) {
                let step = pair[1] - pair[0];
                prop_assert!(step >= 0.0);
                prop_assert!((step - g).abs() <= 1.0 + 1e-3, "step {} spacing {}", step, g);
            }
        }
    }

    #[test]
    fn every_intersection_hits_itself(size in 2u8..=19, w in 200.0f32..1500.0, h in 200.0f32..1500.0) {
        let geometry = GridGeometry::compute(BoardSize::square(size).unwrap(), w, h, 0.5);
        prop_assume!(geometry.grid_spacing >= 2.0);
        for x in 0..size {
            for y in 0..size {
                let coord = Coord::new(x, y);
                let hit = hit_test(geometry.position(coord).unwrap(), &geometry).unwrap();
                prop_assert_eq!(hit.coord, coord);
                prop_assert!(hit.on_intersection);
            }
        }
    }
}
