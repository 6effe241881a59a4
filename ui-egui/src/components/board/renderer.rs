// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board rendering logic
//!
//! Two passes: [`OverlayRenderer::draw_board`] emits the static grid and runs
//! only on re-layout; [`OverlayRenderer::draw_contents`] emits stones and
//! analysis overlays on every redraw. Each pass rebuilds its list from
//! scratch, and layer order is fixed by the order of calls below.

use super::draw::{DrawCommand, DrawList, Layer};
use super::eval_color::eval_color;
use super::layout::GridGeometry;
use crate::ui_config::BoardUiConfig;
use egui::{Color32, Pos2, Rect, Vec2};
use goban_core::{gtp_column, Color, Coord, GameNode, GameSource, Move, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Ownership marker side in grid spacings
const OWNERSHIP_MARKER: f32 = 0.2;
/// Hints with fewer visits than this share of the top hint are drawn smaller
const LOW_VISIT_SHARE: f64 = 0.1;
const LOW_VISIT_SCALE: f32 = 0.8;
/// Pass banner diameter as a share of the shorter surface side
const PASS_BANNER_SIZE: f32 = 0.22;

/// Runtime display switches, owned by the application's controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayToggles {
    /// Evaluation dots on every stone instead of the last few
    pub full_eval: bool,
    pub ownership: bool,
    pub policy: bool,
    /// Translucent previews of the current node's children
    pub children: bool,
    pub hints: bool,
    /// Both players are engine-controlled
    pub engine_self_play: bool,
    /// Evaluation color swatches on an empty board
    pub debug_palette: bool,
}

/// Inputs of one content pass
pub struct RenderContext<'a> {
    pub geometry: &'a GridGeometry,
    pub game: &'a dyn GameSource,
    pub toggles: OverlayToggles,
    /// Ghost stone from the interaction controller
    pub ghost: Option<Coord>,
    /// Pass button in board space, for the pass policy glyph
    pub pass_control: Option<Rect>,
}

/// Commands of one content pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardFrame {
    /// Everything drawn over the grid
    pub contents: DrawList,
    /// Glyphs drawn on the pass control
    pub pass_control: DrawList,
}

/// How a single stone glyph is drawn
#[derive(Debug, Clone, Copy)]
struct StoneStyle {
    color: Color32,
    outline: Option<Color32>,
    inner: Option<Color32>,
    eval: Option<Color32>,
    eval_scale: f32,
    scale: f32,
}

impl StoneStyle {
    fn fill(color: Color32) -> Self {
        Self {
            color,
            outline: None,
            inner: None,
            eval: None,
            eval_scale: 1.0,
            scale: 1.0,
        }
    }

    fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// A stone that survives on the board, with the move that put it there
struct VisibleStone<'a> {
    coord: Coord,
    mv: &'a Move,
    /// Moves back from the current node, 0 = current
    age: usize,
    node: &'a GameNode,
}

/// Board overlay renderer
pub struct OverlayRenderer {
    config: BoardUiConfig,
    /// Analysis vectors already reported as malformed
    malformed: Mutex<HashSet<(NodeId, &'static str)>>,
}

impl OverlayRenderer {
    pub fn new(config: BoardUiConfig) -> Self {
        Self {
            config,
            malformed: Mutex::new(HashSet::new()),
        }
    }

    /// Number of distinct analysis vectors skipped for their length
    pub fn malformed_count(&self) -> usize {
        self.malformed.lock().map(|seen| seen.len()).unwrap_or(0)
    }

    pub fn config(&self) -> &BoardUiConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BoardUiConfig) {
        self.config = config;
    }

    fn stone_color(&self, player: Color) -> Color32 {
        self.config.stones.get(player).into()
    }

    fn eval_color(&self, points_lost: f64) -> Option<Color32> {
        eval_color(points_lost, &self.config.eval_thresholds, &self.config.eval_colors).map(Color32::from)
    }

    fn eval_color_alpha(&self, points_lost: f64, alpha: f32) -> Option<Color32> {
        eval_color(points_lost, &self.config.eval_thresholds, &self.config.eval_colors)
            .map(|c| c.with_alpha(alpha))
    }

    /// Valid analysis vector of `node`; a malformed one is warned about once
    /// and then only traced at debug on later redraws
    fn checked(&self, node: &GameNode, what: &'static str, present: bool, valid: Option<&[f32]>) -> Option<Vec<f32>> {
        if present && valid.is_none() {
            let first = self
                .malformed
                .lock()
                .map(|mut seen| seen.insert((node.id, what)))
                .unwrap_or(true);
            if first {
                tracing::warn!(node = %node.id, "Ignoring {} with unexpected length", what);
            } else {
                tracing::debug!(node = %node.id, "Ignoring {} with unexpected length", what);
            }
        }
        valid.map(<[f32]>::to_vec)
    }

    /// Grid lines, star points and coordinate labels
    pub fn draw_board(&self, geometry: &GridGeometry) -> DrawList {
        let mut list = DrawList::new();
        if !geometry.is_drawable() {
            return list;
        }
        let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) =
            (geometry.x.first(), geometry.x.last(), geometry.y.first(), geometry.y.last())
        else {
            return list;
        };

        tracing::debug!(
            spacing = geometry.grid_spacing,
            width = geometry.surface.x,
            height = geometry.surface.y,
            "Board re-layout"
        );

        // Render grid
        let line_color: Color32 = self.config.line_color.into();
        for &x in &geometry.x {
            list.push(
                Layer::Grid,
                DrawCommand::Line {
                    from: Pos2::new(x, y0),
                    to: Pos2::new(x, y1),
                    width: 1.0,
                    color: line_color,
                },
            );
        }
        for &y in &geometry.y {
            list.push(
                Layer::Grid,
                DrawCommand::Line {
                    from: Pos2::new(x0, y),
                    to: Pos2::new(x1, y),
                    width: 1.0,
                    color: line_color,
                },
            );
        }

        // Render star points
        let star_radius = geometry.grid_spacing * self.config.starpoint_size;
        for coord in geometry.star_points() {
            if let Some(pos) = geometry.position(coord) {
                list.circle(Layer::StarPoint, pos, star_radius, line_color);
            }
        }

        // Coordinates, just outside the first column and row
        let offset = geometry.grid_spacing * self.config.coordinate_margin / 2.0;
        let size = geometry.grid_spacing / 1.5;
        let color: Color32 = self.config.coordinate_color.into();
        for (i, &x) in geometry.x.iter().enumerate() {
            let label = gtp_column(i as u8).map_or_else(|| "?".to_string(), |c| c.to_string());
            list.push(Layer::Coordinate, label_at(Pos2::new(x, y0 - offset), label, size, color));
        }
        for (i, &y) in geometry.y.iter().enumerate() {
            list.push(
                Layer::Coordinate,
                label_at(Pos2::new(x0 - offset, y), (i + 1).to_string(), size, color),
            );
        }

        list
    }

    /// Stones and analysis overlays for the current node
    pub fn draw_contents(&self, ctx: &RenderContext<'_>) -> BoardFrame {
        let mut frame = BoardFrame::default();
        if !ctx.geometry.is_drawable() {
            return frame;
        }

        let stones = ctx.game.stones();
        let list = &mut frame.contents;
        self.draw_stones(list, ctx, &stones);
        self.draw_debug_palette(list, ctx);
        self.draw_ownership(list, ctx, &stones);
        self.draw_policy(list, &mut frame.pass_control, ctx);
        let shown = self.draw_children(list, ctx);
        self.draw_hints(list, ctx, &shown);
        self.draw_ghost(list, ctx);
        self.draw_pass_banner(list, ctx);

        tracing::trace!(commands = list.len(), "Board contents redrawn");
        frame
    }

    fn draw_stone(&self, list: &mut DrawList, layer: Layer, geometry: &GridGeometry, coord: Coord, style: StoneStyle) {
        let Some(center) = geometry.position(coord) else {
            return;
        };
        let radius = geometry.stone_radius * style.scale;
        list.circle(layer, center, radius, style.color);
        if let Some(outline) = style.outline {
            list.ring(layer, center, radius, 0.05 * radius, outline);
        }
        if let Some(eval) = style.eval {
            let eval_radius = geometry.stone_radius * style.eval_scale * self.config.eval_dot_max_size;
            list.circle(layer, center, eval_radius, eval);
        }
        if let Some(inner) = style.inner {
            list.ring(layer, center, radius * 0.45 / 0.85, 0.125 * radius, inner);
        }
    }

    /// Occupied intersections with the newest move that reached each one
    fn visible_stones<'a>(game: &'a dyn GameSource, stones: &HashMap<Coord, Color>) -> Vec<VisibleStone<'a>> {
        let mut seen = HashSet::new();
        let mut visible = Vec::new();
        for (age, node) in game.nodes_from_root().into_iter().rev().enumerate() {
            for mv in node.moves_with_placements() {
                let Some(coord) = mv.coord else { continue };
                if stones.contains_key(&coord) && seen.insert(coord) {
                    visible.push(VisibleStone { coord, mv, age, node });
                }
            }
        }
        visible
    }

    fn draw_stones(&self, list: &mut DrawList, ctx: &RenderContext<'_>, stones: &HashMap<Coord, Color>) {
        let show_last = self.config.eval_off_show_last;
        for stone in Self::visible_stones(ctx.game, stones) {
            let eval_on = ctx.toggles.full_eval || stone.age < show_last;
            let eval = stone
                .node
                .points_lost()
                .filter(|_| eval_on)
                .and_then(|pl| self.eval_color(pl));
            let style = StoneStyle {
                color: self.stone_color(stone.mv.player),
                outline: Some(self.config.outlines.get(stone.mv.player).into()),
                inner: (stone.age == 0).then(|| self.stone_color(stone.mv.opponent())),
                eval,
                eval_scale: 1.0,
                scale: 1.0,
            };
            self.draw_stone(list, Layer::Stone, ctx.geometry, stone.coord, style);
        }
    }

    /// Every stone variant in every evaluation color, rows by points lost
    fn draw_debug_palette(&self, list: &mut DrawList, ctx: &RenderContext<'_>) {
        if !ctx.toggles.debug_palette || !ctx.game.current_node().is_root() {
            return;
        }
        let black = self.stone_color(Color::Black);
        let white = self.stone_color(Color::White);
        let outline_b: Color32 = self.config.outlines.black.into();
        let outline_w: Color32 = self.config.outlines.white.into();

        for row in 0..ctx.geometry.board_size.height {
            let Some(eval) = self.eval_color(row as f64) else { return };
            let variants = [
                (5, black, Some(outline_b), None),
                (6, black, Some(outline_b), Some(white)),
                (7, white, Some(outline_w), None),
                (8, white, Some(outline_w), Some(black)),
            ];
            for (column, color, outline, inner) in variants {
                let style = StoneStyle {
                    color,
                    outline,
                    inner,
                    eval: Some(eval),
                    eval_scale: 1.0,
                    scale: 1.0,
                };
                self.draw_stone(list, Layer::DebugPalette, ctx.geometry, Coord::new(column, row), style);
            }
            let Some(swatch) = self.eval_color_alpha(row as f64, 0.5) else { return };
            self.draw_stone(
                list,
                Layer::DebugPalette,
                ctx.geometry,
                Coord::new(9, row),
                StoneStyle::fill(swatch).scaled(0.8),
            );
        }
    }

    fn draw_ownership(&self, list: &mut DrawList, ctx: &RenderContext<'_>, stones: &HashMap<Coord, Color>) {
        if !ctx.toggles.ownership {
            return;
        }
        let size = ctx.geometry.board_size;
        let current = ctx.game.current_node();
        // One node stale is allowed so the heatmap does not flicker between moves
        let Some(ownership) = analysis_or_parent(ctx.game, current, |n| {
            self.checked(n, "ownership", n.evaluation.ownership.is_some(), n.evaluation.ownership_for(size))
        }) else {
            return;
        };

        let side = ctx.geometry.grid_spacing * OWNERSHIP_MARKER;
        for (coord, &value) in size.analysis_order().zip(&ownership) {
            if value == 0.0 {
                continue;
            }
            let owner = if value > 0.0 { Color::Black } else { Color::White };
            if stones.get(&coord) == Some(&owner) {
                continue;
            }
            let Some(center) = ctx.geometry.position(coord) else { continue };
            list.push(
                Layer::Ownership,
                DrawCommand::FilledRect {
                    rect: Rect::from_center_size(center, Vec2::splat(side)),
                    color: self.config.stones.get(owner).with_alpha(value.abs()),
                },
            );
        }
    }

    fn draw_policy(&self, list: &mut DrawList, pass_list: &mut DrawList, ctx: &RenderContext<'_>) {
        if !ctx.toggles.policy {
            return;
        }
        let size = ctx.geometry.board_size;
        let current = ctx.game.current_node();
        let own = |n: &GameNode| -> Option<Vec<f32>> {
            self.checked(n, "policy", n.evaluation.policy.is_some(), n.evaluation.policy_for(size))
        };
        // A stale policy is only acceptable when no human is choosing moves
        let policy = match own(current) {
            Some(policy) => policy,
            None if ctx.toggles.engine_self_play => match ctx.game.parent(current).and_then(own) {
                Some(policy) => policy,
                None => return,
            },
            None => return,
        };

        let best = policy.iter().copied().fold(f32::MIN, f32::max);
        for (coord, &p) in size.analysis_order().zip(&policy) {
            if p <= 0.0 {
                continue;
            }
            let mut alpha = self.config.ghost_alpha;
            if p == best {
                alpha += self.config.top_move_x_alpha;
            }
            let style = StoneStyle::fill(self.config.policy_color.with_alpha(alpha)).scaled(p.sqrt());
            self.draw_stone(list, Layer::Policy, ctx.geometry, coord, style);
        }

        let pass = policy[size.points()];
        if let Some(control) = ctx.pass_control.filter(|_| pass > 0.0) {
            pass_list.circle(
                Layer::Policy,
                control.center(),
                pass.sqrt() * control.height() / 2.0,
                self.config.policy_color.into(),
            );
        }
    }

    /// Child previews; returns the intersections they cover
    fn draw_children(&self, list: &mut DrawList, ctx: &RenderContext<'_>) -> HashSet<Coord> {
        let mut shown = HashSet::new();
        if !ctx.toggles.children {
            return shown;
        }
        let alpha = self.config.ghost_alpha;
        let scale = self.config.child_scale;
        for child in ctx.game.children(ctx.game.current_node()) {
            let Some(mv) = child.single_move() else { continue };
            let Some(coord) = mv.coord else { continue };
            shown.insert(coord);
            let style = StoneStyle {
                color: self.config.stones.get(mv.player).with_alpha(alpha),
                outline: None,
                inner: None,
                eval: child.points_lost().and_then(|pl| self.eval_color_alpha(pl, alpha)),
                eval_scale: scale,
                scale,
            };
            self.draw_stone(list, Layer::Children, ctx.geometry, coord, style);
        }
        shown
    }

    fn draw_hints(&self, list: &mut DrawList, ctx: &RenderContext<'_>, shown: &HashSet<Coord>) {
        if !ctx.toggles.hints || ctx.game.game_ended() {
            return;
        }
        let candidates = &ctx.game.current_node().candidate_moves;
        let Some(top) = candidates.first() else { return };
        let player = ctx.game.next_player();
        let size = ctx.geometry.board_size;

        for (i, candidate) in candidates.iter().enumerate() {
            let Some(coord) = candidate.coord(player, size) else { continue };
            if shown.contains(&coord) {
                continue;
            }
            let mut alpha = self.config.ghost_alpha;
            let mut scale = 1.0;
            if i == 0 {
                alpha += self.config.top_move_x_alpha;
            } else if (candidate.visits as f64) < LOW_VISIT_SHARE * top.visits as f64 {
                scale = LOW_VISIT_SCALE;
            }
            let Some(color) = self.eval_color_alpha(candidate.points_lost, alpha) else { continue };
            self.draw_stone(list, Layer::Hint, ctx.geometry, coord, StoneStyle::fill(color).scaled(scale));
        }
    }

    fn draw_ghost(&self, list: &mut DrawList, ctx: &RenderContext<'_>) {
        let Some(coord) = ctx.ghost else { return };
        let color = self
            .config
            .stones
            .get(ctx.game.next_player())
            .with_alpha(self.config.ghost_alpha);
        self.draw_stone(list, Layer::Ghost, ctx.geometry, coord, StoneStyle::fill(color));
    }

    fn draw_pass_banner(&self, list: &mut DrawList, ctx: &RenderContext<'_>) {
        let current = ctx.game.current_node();
        if current.is_root() || !current.is_pass() {
            return;
        }
        let text = if ctx.game.game_ended() { "game\nend" } else { "pass" };
        let surface = ctx.geometry.surface_rect();
        let size = surface.width().min(surface.height()) * PASS_BANNER_SIZE;
        list.push(
            Layer::PassBanner,
            DrawCommand::FilledEllipse {
                center: surface.center(),
                radius: Vec2::splat(size / 2.0),
                color: self.config.pass_banner_color.into(),
            },
        );
        list.push(
            Layer::PassBanner,
            DrawCommand::Text {
                pos: surface.center(),
                text: text.to_string(),
                size: size * 0.25,
                color: self.config.pass_text_color.into(),
                outline: Some(self.config.pass_text_outline.into()),
            },
        );
    }
}

fn label_at(pos: Pos2, text: String, size: f32, color: Color32) -> DrawCommand {
    DrawCommand::Text {
        pos,
        text,
        size,
        color,
        outline: None,
    }
}

/// Analysis of `node`, falling back to its parent's
fn analysis_or_parent<F>(game: &dyn GameSource, node: &GameNode, get: F) -> Option<Vec<f32>>
where
    F: Fn(&GameNode) -> Option<Vec<f32>>,
{
    get(node).or_else(|| game.parent(node).and_then(|p| get(p)))
}
