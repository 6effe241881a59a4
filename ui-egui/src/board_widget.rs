// SPDX-License-Identifier: MIT OR Apache-2.0

//! Go board widget for rendering the game board.
//!
//! Adapts [`BoardSurface`] to egui: maps screen positions into board space
//! (origin bottom-left, y up), feeds pointer events through the surface and
//! paints its draw lists with an [`egui::Painter`].

use crate::components::board::{BoardSurface, DrawCommand, DrawList, OverlayToggles};
use crate::msg::BoardAction;
use crate::ui_config::BoardUiConfig;
use crossbeam_channel::Sender;
use egui::{Align2, Color32, FontId, Pos2, Rect, Shape, Stroke, Vec2};
use goban_core::GameSource;
use std::f32::consts::TAU;

/// Segments used to approximate an ellipse
const ELLIPSE_SEGMENTS: usize = 48;
/// Pixel offset of outlined text
const TEXT_OUTLINE: f32 = 1.0;

/// Widget for rendering and interacting with a Go board
pub struct BoardWidget {
    surface: BoardSurface,
    /// Screen rect of the last layout
    rect: Option<Rect>,
    /// A press started inside the board and has not been released yet
    tracking: bool,
    last_pointer: Option<Pos2>,
    /// Game state changed since the last content pass
    dirty: bool,
}

impl BoardWidget {
    pub fn new(config: BoardUiConfig) -> Self {
        Self {
            surface: BoardSurface::new(config),
            rect: None,
            tracking: false,
            last_pointer: None,
            dirty: true,
        }
    }

    pub fn surface(&self) -> &BoardSurface {
        &self.surface
    }

    pub fn toggles(&self) -> OverlayToggles {
        self.surface.toggles()
    }

    pub fn set_toggles(&mut self, toggles: OverlayToggles) {
        if toggles != self.surface.toggles() {
            self.surface.set_toggles(toggles);
            self.dirty = true;
        }
    }

    /// Mark the game as changed; contents are rebuilt on the next frame
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Screen position to board space, relative to the last layout
    pub fn to_board(&self, pos: Pos2) -> Option<Pos2> {
        self.rect.map(|rect| to_board(rect, pos))
    }

    /// Board space to screen position, relative to the last layout
    pub fn to_screen(&self, pos: Pos2) -> Option<Pos2> {
        self.rect.map(|rect| to_screen(rect, pos))
    }

    /// Show the board in all available space.
    ///
    /// Emitted actions are returned and, when `actions` is given, also sent
    /// over the channel.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        game: &dyn GameSource,
        actions: Option<&Sender<BoardAction>>,
    ) -> Option<BoardAction> {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        if self.rect.map(|r| r.size()) != Some(rect.size()) || self.layout_stale(game) {
            self.rect = Some(rect);
            self.surface.resize(rect.width(), rect.height(), game);
            self.dirty = false;
        } else {
            self.rect = Some(rect);
            if self.dirty {
                self.surface.redraw(game);
                self.dirty = false;
            }
        }

        let action = self.handle_pointer(ui, rect, game);
        if let (Some(action), Some(tx)) = (action, actions) {
            if tx.send(action).is_err() {
                tracing::warn!(?action, "Board action receiver dropped");
            }
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, Color32::from(self.surface.config().board_color));
            let map = |p: Pos2| to_screen(rect, p);
            paint(&painter, self.surface.grid(), map);
            paint(&painter, &self.surface.frame().contents, map);
        }

        action
    }

    /// Tell the board where the pass button is, in screen space
    pub fn set_pass_button(&mut self, button: Option<Rect>) {
        let Some(rect) = self.rect else { return };
        let board = button.map(|b| Rect::from_two_pos(to_board(rect, b.min), to_board(rect, b.max)));
        if board != self.surface.pass_control() {
            self.surface.set_pass_control(board);
            self.dirty = true;
        }
    }

    /// Paint the pass policy glyph over the pass button
    pub fn paint_pass_glyph(&self, ui: &egui::Ui) {
        let Some(rect) = self.rect else { return };
        paint(ui.painter(), &self.surface.frame().pass_control, |p| to_screen(rect, p));
    }

    fn layout_stale(&self, game: &dyn GameSource) -> bool {
        self.surface
            .geometry()
            .is_some_and(|g| g.board_size != game.board_size())
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, rect: Rect, game: &dyn GameSource) -> Option<BoardAction> {
        let (pressed, down, released, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        let pos = pos?;
        let board_pos = to_board(rect, pos);

        let mut redraw = false;
        let mut action = None;
        if pressed && rect.contains(pos) {
            self.tracking = true;
            redraw |= self.surface.pointer_down(board_pos, game).redraw;
        } else if self.tracking && down && self.last_pointer != Some(pos) {
            redraw |= self.surface.pointer_move(board_pos, game).redraw;
        }
        if self.tracking && released {
            self.tracking = false;
            let response = self.surface.pointer_up(board_pos, game);
            redraw |= response.redraw;
            action = response.action;
        }
        self.last_pointer = Some(pos);

        if redraw {
            ui.ctx().request_repaint();
        }
        action
    }
}

fn to_board(rect: Rect, pos: Pos2) -> Pos2 {
    Pos2::new(pos.x - rect.min.x, rect.max.y - pos.y)
}

fn to_screen(rect: Rect, pos: Pos2) -> Pos2 {
    Pos2::new(rect.min.x + pos.x, rect.max.y - pos.y)
}

/// Paint a draw list in order, mapping board space through `map`
pub fn paint(painter: &egui::Painter, list: &DrawList, map: impl Fn(Pos2) -> Pos2) {
    for item in list.items() {
        match &item.command {
            DrawCommand::FilledCircle { center, radius, color } => {
                painter.circle_filled(map(*center), *radius, *color);
            }
            DrawCommand::CircleOutline {
                center,
                radius,
                width,
                color,
            } => {
                painter.circle_stroke(map(*center), *radius, Stroke::new(*width, *color));
            }
            DrawCommand::Line { from, to, width, color } => {
                painter.line_segment([map(*from), map(*to)], Stroke::new(*width, *color));
            }
            DrawCommand::FilledRect { rect, color } => {
                painter.rect_filled(Rect::from_two_pos(map(rect.min), map(rect.max)), 0.0, *color);
            }
            DrawCommand::FilledEllipse { center, radius, color } => {
                painter.add(Shape::convex_polygon(
                    ellipse_points(map(*center), *radius),
                    *color,
                    Stroke::NONE,
                ));
            }
            DrawCommand::Text {
                pos,
                text,
                size,
                color,
                outline,
            } => {
                let pos = map(*pos);
                let font = FontId::proportional(*size);
                if let Some(outline) = outline {
                    for offset in [
                        Vec2::new(-TEXT_OUTLINE, 0.0),
                        Vec2::new(TEXT_OUTLINE, 0.0),
                        Vec2::new(0.0, -TEXT_OUTLINE),
                        Vec2::new(0.0, TEXT_OUTLINE),
                    ] {
                        painter.text(pos + offset, Align2::CENTER_CENTER, text, font.clone(), *outline);
                    }
                }
                painter.text(pos, Align2::CENTER_CENTER, text, font, *color);
            }
        }
    }
}

fn ellipse_points(center: Pos2, radius: Vec2) -> Vec<Pos2> {
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
            center + Vec2::new(radius.x * angle.cos(), radius.y * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_and_board_space_are_inverse() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0));
        let screen = Pos2::new(130.0, 320.0);
        let board = to_board(rect, screen);
        assert_eq!(board, Pos2::new(30.0, 30.0));
        assert_eq!(to_screen(rect, board), screen);
        // Bottom-left corner of the widget is the board origin
        assert_eq!(to_board(rect, rect.left_bottom()), Pos2::ZERO);
    }

    #[test]
    fn moving_the_pass_button_schedules_a_redraw() {
        let mut widget = BoardWidget::new(BoardUiConfig::default());
        widget.rect = Some(Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0)));
        widget.dirty = false;

        let button = Rect::from_min_size(Pos2::new(520.0, 60.0), Vec2::new(40.0, 20.0));
        widget.set_pass_button(Some(button));
        assert!(widget.dirty);
        assert_eq!(
            widget.surface().pass_control(),
            Some(Rect::from_min_max(Pos2::new(420.0, 270.0), Pos2::new(460.0, 290.0)))
        );

        // Same place on the next frame
        widget.dirty = false;
        widget.set_pass_button(Some(button));
        assert!(!widget.dirty);

        widget.set_pass_button(None);
        assert!(widget.dirty);
        assert_eq!(widget.surface().pass_control(), None);
    }

    #[test]
    fn ellipse_is_closed_around_center() {
        let points = ellipse_points(Pos2::new(10.0, 10.0), Vec2::new(4.0, 2.0));
        assert_eq!(points.len(), ELLIPSE_SEGMENTS);
        assert!((points[0].x - 14.0).abs() < 1e-4);
        assert!((points[0].y - 10.0).abs() < 1e-4);
    }
}
