// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common builders for board surface integration tests

#![allow(dead_code)]

use egui::{Color32, Pos2, Rect};
use goban_core::{BoardSize, Coord, GameSource, GameTree, Move, NodeId};
use goban_ui_egui::components::board::{
    BoardFrame, DrawCommand, DrawList, GridGeometry, Layer, OverlayRenderer, OverlayToggles, RenderContext,
};
use goban_ui_egui::BoardUiConfig;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Route `tracing` output through the test harness; `RUST_LOG` overrides
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Square game after replaying whitespace separated GTP moves
pub fn game(size: u8, moves: &str) -> GameTree {
    init_logging();
    let mut game = GameTree::new(BoardSize::square(size).unwrap());
    for vertex in moves.split_whitespace() {
        game.play_gtp(vertex).unwrap();
    }
    game
}

/// Coordinate of a GTP vertex on `game`'s board
pub fn at(game: &GameTree, vertex: &str) -> Coord {
    Move::from_gtp(vertex, game.next_player(), game.board_size())
        .unwrap()
        .coord
        .unwrap()
}

/// Node `depth` moves below the root on the current line
pub fn node_at(game: &GameTree, depth: usize) -> NodeId {
    game.nodes_from_root()[depth].id
}

/// Layout on a 400x400 surface with the default stone size
pub fn geometry(game: &GameTree) -> GridGeometry {
    GridGeometry::compute(game.board_size(), 400.0, 400.0, BoardUiConfig::default().stone_size)
}

pub fn center(geometry: &GridGeometry, coord: Coord) -> Pos2 {
    geometry.position(coord).unwrap()
}

pub fn render(game: &GameTree, toggles: OverlayToggles) -> (GridGeometry, BoardFrame) {
    render_with(game, toggles, None, None)
}

pub fn render_with(
    game: &GameTree,
    toggles: OverlayToggles,
    ghost: Option<Coord>,
    pass_control: Option<Rect>,
) -> (GridGeometry, BoardFrame) {
    let geometry = geometry(game);
    let renderer = OverlayRenderer::new(BoardUiConfig::default());
    let frame = renderer.draw_contents(&RenderContext {
        geometry: &geometry,
        game,
        toggles,
        ghost,
        pass_control,
    });
    (geometry, frame)
}

/// Filled circles of one layer as `(center, radius, color)`
pub fn filled_circles(list: &DrawList, layer: Layer) -> Vec<(Pos2, f32, Color32)> {
    list.layer(layer)
        .filter_map(|command| match command {
            DrawCommand::FilledCircle { center, radius, color } => Some((*center, *radius, *color)),
            _ => None,
        })
        .collect()
}

/// Full size stone bodies of one layer
pub fn stone_bodies(list: &DrawList, layer: Layer, geometry: &GridGeometry) -> Vec<(Pos2, Color32)> {
    filled_circles(list, layer)
        .into_iter()
        .filter(|(_, radius, _)| *radius == geometry.stone_radius)
        .map(|(center, _, color)| (center, color))
        .collect()
}

/// Constant vector of `len` entries
pub fn uniform(len: usize, value: f32) -> Vec<f32> {
    vec![value; len]
}
