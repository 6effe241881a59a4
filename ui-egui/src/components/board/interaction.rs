// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board interaction handling

use super::hit_test::hit_test;
use super::layout::GridGeometry;
use crate::msg::BoardAction;
use egui::Pos2;
use goban_core::{Coord, GameSource};

/// Preview state of the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Ghost stone shown at an empty intersection
    Previewing(Coord),
}

/// Outcome of one pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerResponse {
    /// The board contents must be redrawn
    pub redraw: bool,
    /// Action for the application, if any
    pub action: Option<BoardAction>,
}

/// Ghost stone state machine driven by pointer events
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    ghost: Option<Coord>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current ghost stone, if previewing
    pub fn ghost(&self) -> Option<Coord> {
        self.ghost
    }

    pub fn state(&self) -> InteractionState {
        match self.ghost {
            Some(coord) => InteractionState::Previewing(coord),
            None => InteractionState::Idle,
        }
    }

    /// Pointer pressed: preview a stone on an empty intersection under it
    pub fn pointer_down(
        &mut self,
        pos: Pos2,
        geometry: Option<&GridGeometry>,
        game: &dyn GameSource,
    ) -> PointerResponse {
        let Some(geometry) = geometry.filter(|g| g.is_drawable()) else {
            return PointerResponse::default();
        };

        let previous = self.ghost;
        self.ghost = hit_test(pos, geometry)
            .filter(|hit| hit.on_intersection)
            .map(|hit| hit.coord)
            .filter(|coord| !game.stones().contains_key(coord));

        PointerResponse {
            redraw: previous != self.ghost,
            action: None,
        }
    }

    /// Pointer dragged; same rules as a press
    pub fn pointer_move(
        &mut self,
        pos: Pos2,
        geometry: Option<&GridGeometry>,
        game: &dyn GameSource,
    ) -> PointerResponse {
        self.pointer_down(pos, geometry, game)
    }

    /// Pointer released: confirm the ghost stone, or inspect the move under
    /// the pointer when there is none
    pub fn pointer_up(
        &mut self,
        pos: Pos2,
        geometry: Option<&GridGeometry>,
        game: &dyn GameSource,
    ) -> PointerResponse {
        // Every release ends the preview, even on a surface too small to draw
        let ghost = self.ghost.take();
        let Some(geometry) = geometry.filter(|g| g.is_drawable()) else {
            return PointerResponse {
                redraw: ghost.is_some(),
                action: None,
            };
        };

        let action = match ghost {
            Some(coord) => {
                tracing::debug!(x = coord.x, y = coord.y, "Confirming placement");
                Some(BoardAction::ConfirmPlacement(coord))
            }
            None => hit_test(pos, geometry)
                .filter(|hit| hit.on_intersection)
                .and_then(|hit| inspect(hit.coord, game)),
        };

        PointerResponse {
            redraw: true,
            action,
        }
    }
}

/// Most recent move on the current line played at `coord`
fn inspect(coord: Coord, game: &dyn GameSource) -> Option<BoardAction> {
    let node = game
        .nodes_from_root()
        .into_iter()
        .rev()
        .find(|node| node.single_move().and_then(|mv| mv.coord) == Some(coord))?;

    tracing::debug!(node = %node.id, analysis = ?node.evaluation, "Inspecting move");
    if let Some(parent) = game.parent(node) {
        tracing::debug!(node = %parent.id, analysis = ?parent.evaluation, "Parent analysis");
    }
    Some(BoardAction::InspectNode(node.id))
}
