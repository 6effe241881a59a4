// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draw commands produced by a board pass
//!
//! Positions are board-space pixels: origin at the bottom-left corner of the
//! surface, y growing upward. [`crate::board_widget`] flips them for egui.

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Overlay layer, in draw order. Later layers occlude earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    Grid,
    StarPoint,
    Coordinate,
    Stone,
    DebugPalette,
    Ownership,
    Policy,
    Children,
    Hint,
    Ghost,
    PassBanner,
}

/// A single canvas primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    FilledCircle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    CircleOutline {
        center: Pos2,
        radius: f32,
        width: f32,
        color: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
    FilledRect {
        rect: Rect,
        color: Color32,
    },
    FilledEllipse {
        center: Pos2,
        radius: Vec2,
        color: Color32,
    },
    Text {
        pos: Pos2,
        text: String,
        size: f32,
        color: Color32,
        outline: Option<Color32>,
    },
}

impl DrawCommand {
    /// Anchor point of the primitive
    pub fn center(&self) -> Pos2 {
        match self {
            DrawCommand::FilledCircle { center, .. }
            | DrawCommand::CircleOutline { center, .. }
            | DrawCommand::FilledEllipse { center, .. } => *center,
            DrawCommand::Line { from, to, .. } => Pos2::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0),
            DrawCommand::FilledRect { rect, .. } => rect.center(),
            DrawCommand::Text { pos, .. } => *pos,
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            DrawCommand::FilledCircle { color, .. }
            | DrawCommand::CircleOutline { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::FilledRect { color, .. }
            | DrawCommand::FilledEllipse { color, .. }
            | DrawCommand::Text { color, .. } => *color,
        }
    }
}

/// A primitive tagged with the overlay that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub layer: Layer,
    pub command: DrawCommand,
}

/// Ordered command list for one pass; rebuilt from scratch every pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer, command: DrawCommand) {
        self.items.push(DrawItem { layer, command });
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Commands emitted by one layer, in order
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.command)
    }

    /// Per-layer command counts in draw order
    pub fn summary(&self) -> Vec<(Layer, usize)> {
        let mut summary: Vec<(Layer, usize)> = Vec::new();
        for item in &self.items {
            match summary.last_mut() {
                Some((layer, count)) if *layer == item.layer => *count += 1,
                _ => summary.push((item.layer, 1)),
            }
        }
        summary
    }

    pub fn circle(&mut self, layer: Layer, center: Pos2, radius: f32, color: Color32) {
        self.push(
            layer,
            DrawCommand::FilledCircle {
                center,
                radius,
                color,
            },
        );
    }

    pub fn ring(&mut self, layer: Layer, center: Pos2, radius: f32, width: f32, color: Color32) {
        self.push(
            layer,
            DrawCommand::CircleOutline {
                center,
                radius,
                width,
                color,
            },
        );
    }
}
