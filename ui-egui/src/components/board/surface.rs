// SPDX-License-Identifier: MIT OR Apache-2.0

//! Toolkit independent board surface
//!
//! Owns the layout, the ghost stone controller and the two cached draw
//! lists. A host feeds it resize and pointer events in board space and
//! paints whatever [`BoardSurface::grid`] and [`BoardSurface::frame`] hold.

use super::draw::DrawList;
use super::interaction::{InteractionController, PointerResponse};
use super::layout::GridGeometry;
use super::renderer::{BoardFrame, OverlayRenderer, OverlayToggles, RenderContext};
use crate::ui_config::BoardUiConfig;
use egui::{Pos2, Rect};
use goban_core::{Coord, GameSource};

pub struct BoardSurface {
    renderer: OverlayRenderer,
    controller: InteractionController,
    geometry: Option<GridGeometry>,
    grid: DrawList,
    frame: BoardFrame,
    toggles: OverlayToggles,
    pass_control: Option<Rect>,
    redraws: u64,
}

impl BoardSurface {
    pub fn new(config: BoardUiConfig) -> Self {
        Self {
            renderer: OverlayRenderer::new(config),
            controller: InteractionController::new(),
            geometry: None,
            grid: DrawList::new(),
            frame: BoardFrame::default(),
            toggles: OverlayToggles::default(),
            pass_control: None,
            redraws: 0,
        }
    }

    pub fn config(&self) -> &BoardUiConfig {
        self.renderer.config()
    }

    /// Replace the theme; takes effect on the next resize or redraw
    pub fn set_config(&mut self, config: BoardUiConfig, game: &dyn GameSource) {
        self.renderer.set_config(config);
        if let Some(geometry) = &self.geometry {
            let (w, h) = (geometry.surface.x, geometry.surface.y);
            self.resize(w, h, game);
        }
    }

    /// Current layout; `None` until a drawable size was seen
    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    /// Static grid pass of the last layout
    pub fn grid(&self) -> &DrawList {
        &self.grid
    }

    /// Content pass of the last redraw
    pub fn frame(&self) -> &BoardFrame {
        &self.frame
    }

    pub fn ghost(&self) -> Option<Coord> {
        self.controller.ghost()
    }

    pub fn toggles(&self) -> OverlayToggles {
        self.toggles
    }

    pub fn set_toggles(&mut self, toggles: OverlayToggles) {
        self.toggles = toggles;
    }

    /// Pass control bounds in board space, used for the pass policy glyph
    /// Pass control rectangle in board space
    pub fn pass_control(&self) -> Option<Rect> {
        self.pass_control
    }

    pub fn set_pass_control(&mut self, rect: Option<Rect>) {
        self.pass_control = rect;
    }

    /// Number of content passes run so far
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Recompute the layout for a new surface size, then redraw both passes.
    ///
    /// Returns whether the surface is drawable at this size.
    pub fn resize(&mut self, width: f32, height: f32, game: &dyn GameSource) -> bool {
        let geometry = GridGeometry::compute(game.board_size(), width, height, self.config().stone_size);
        if geometry.is_drawable() {
            self.grid = self.renderer.draw_board(&geometry);
            self.geometry = Some(geometry);
        } else {
            tracing::debug!(width, height, "Surface too small to draw");
            self.grid = DrawList::new();
            self.geometry = None;
        }
        self.redraw(game);
        self.geometry.is_some()
    }

    /// Rebuild the content pass from the current game state
    pub fn redraw(&mut self, game: &dyn GameSource) {
        self.redraws += 1;
        self.frame = match &self.geometry {
            Some(geometry) if geometry.board_size == game.board_size() => {
                self.renderer.draw_contents(&RenderContext {
                    geometry,
                    game,
                    toggles: self.toggles,
                    ghost: self.controller.ghost(),
                    pass_control: self.pass_control,
                })
            }
            Some(_) => {
                tracing::warn!("Board size changed without a re-layout");
                BoardFrame::default()
            }
            None => BoardFrame::default(),
        };
    }

    pub fn pointer_down(&mut self, pos: Pos2, game: &dyn GameSource) -> PointerResponse {
        let response = self.controller.pointer_down(pos, self.geometry.as_ref(), game);
        self.apply(response, game)
    }

    pub fn pointer_move(&mut self, pos: Pos2, game: &dyn GameSource) -> PointerResponse {
        let response = self.controller.pointer_move(pos, self.geometry.as_ref(), game);
        self.apply(response, game)
    }

    pub fn pointer_up(&mut self, pos: Pos2, game: &dyn GameSource) -> PointerResponse {
        let response = self.controller.pointer_up(pos, self.geometry.as_ref(), game);
        self.apply(response, game)
    }

    fn apply(&mut self, response: PointerResponse, game: &dyn GameSource) -> PointerResponse {
        if response.redraw {
            self.redraw(game);
        }
        response
    }
}
