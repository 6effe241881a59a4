// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(clippy::all)]

//! Go board surface for egui
//!
//! Layout, hit testing, ghost stone interaction and analysis overlays for a
//! game tree exposed through [`goban_core::GameSource`].

pub mod board_widget;
pub mod components;
pub mod msg;
pub mod ui_config;

pub use board_widget::BoardWidget;
pub use components::board::{BoardSurface, OverlayToggles};
pub use msg::BoardAction;
pub use ui_config::BoardUiConfig;
