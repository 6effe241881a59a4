// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board rendering components

mod draw;
mod eval_color;
mod hit_test;
mod interaction;
mod layout;
mod renderer;
mod surface;

pub use draw::{DrawCommand, DrawItem, DrawList, Layer};
pub use eval_color::{eval_bucket, eval_color};
pub use hit_test::{hit_test, nearest, BoardHit};
pub use interaction::{InteractionController, InteractionState, PointerResponse};
pub use layout::{star_point_indices, GridGeometry, MARGIN_X, MARGIN_Y};
pub use renderer::{BoardFrame, OverlayRenderer, OverlayToggles, RenderContext};
pub use surface::BoardSurface;
