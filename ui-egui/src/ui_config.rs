// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board surface configuration
//!
//! Theme values and analysis display parameters consumed by the layout,
//! the evaluation color mapper and the overlay renderer. Runtime display
//! switches live in [`crate::components::board::OverlayToggles`] instead.

use anyhow::{Context, Result};
use egui::Color32;
use goban_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Complete configuration of the board surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardUiConfig {
    /// Board background
    pub board_color: SerializableColor,
    /// Stone radius as a fraction of grid spacing
    pub stone_size: f32,
    /// Grid line and star point color
    pub line_color: SerializableColor,
    /// Star point radius as a fraction of grid spacing
    pub starpoint_size: f32,
    /// Coordinate label offset outside the grid, in grid spacings
    pub coordinate_margin: f32,
    /// Coordinate label color
    pub coordinate_color: SerializableColor,
    /// Stone fill colors
    pub stones: PlayerColors,
    /// Stone outline colors
    pub outlines: PlayerColors,
    /// Evaluation bucket colors, best first; one more than `eval_thresholds`
    pub eval_colors: Vec<SerializableColor>,
    /// Ascending points-lost lower bounds of buckets 1..n
    pub eval_thresholds: Vec<f64>,
    /// Largest evaluation dot radius as a fraction of the stone radius
    pub eval_dot_max_size: f32,
    /// Alpha of ghost, hint, policy and child preview stones
    pub ghost_alpha: f32,
    /// Extra alpha for the top hint and the highest policy point
    pub top_move_x_alpha: f32,
    /// Policy glyph color
    pub policy_color: SerializableColor,
    /// Recent moves that keep their evaluation dot while full evaluation is off
    pub eval_off_show_last: usize,
    /// Scale of child move previews
    pub child_scale: f32,
    /// Pass banner fill
    pub pass_banner_color: SerializableColor,
    /// Pass banner label
    pub pass_text_color: SerializableColor,
    /// Pass banner label outline
    pub pass_text_outline: SerializableColor,
}

/// One color per player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerColors {
    pub black: SerializableColor,
    pub white: SerializableColor,
}

impl PlayerColors {
    pub fn get(&self, player: Color) -> SerializableColor {
        match player {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }
}

/// Serializable color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with its alpha replaced by `alpha` in 0..=1
    pub fn with_alpha(self, alpha: f32) -> Color32 {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, a)
    }
}

impl From<Color32> for SerializableColor {
    fn from(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self { r, g, b, a }
    }
}

impl From<SerializableColor> for Color32 {
    fn from(color: SerializableColor) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

/// Configuration values the renderer cannot work with
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("eval_thresholds must be finite and strictly ascending")]
    ThresholdsNotAscending,

    #[error("eval_colors needs {expected} entries (one more than eval_thresholds), got {actual}")]
    ColorTableSize { expected: usize, actual: usize },

    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl Default for BoardUiConfig {
    fn default() -> Self {
        Self {
            board_color: SerializableColor::rgb(217, 173, 102),
            stone_size: 0.505,
            line_color: SerializableColor::rgba(0, 0, 0, 170),
            starpoint_size: 0.1,
            coordinate_margin: 1.5,
            coordinate_color: SerializableColor::rgb(64, 64, 64),
            stones: PlayerColors {
                black: SerializableColor::rgb(10, 10, 10),
                white: SerializableColor::rgb(250, 250, 250),
            },
            outlines: PlayerColors {
                black: SerializableColor::rgb(40, 40, 40),
                white: SerializableColor::rgb(90, 90, 90),
            },
            eval_colors: vec![
                SerializableColor::rgb(30, 150, 0),   // best
                SerializableColor::rgb(171, 229, 46),
                SerializableColor::rgb(217, 227, 77),
                SerializableColor::rgb(230, 102, 26),
                SerializableColor::rgb(204, 0, 0),
                SerializableColor::rgb(114, 33, 107), // worst
            ],
            eval_thresholds: vec![0.5, 1.5, 3.0, 6.0, 12.0],
            eval_dot_max_size: 0.5,
            ghost_alpha: 0.6,
            top_move_x_alpha: 0.25,
            policy_color: SerializableColor::rgb(230, 51, 204),
            eval_off_show_last: 3,
            child_scale: 0.95,
            pass_banner_color: SerializableColor::rgba(115, 13, 115, 128),
            pass_text_color: SerializableColor::rgb(38, 38, 38),
            pass_text_outline: SerializableColor::rgb(242, 242, 242),
        }
    }
}

impl BoardUiConfig {
    /// Load config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid board config: {}", path.display()))?;
        tracing::info!("Loaded board config from {}", path.display());
        Ok(config)
    }

    /// Save config as pretty JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Check the invariants the renderer relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ascending = self.eval_thresholds.iter().all(|t| t.is_finite())
            && self.eval_thresholds.windows(2).all(|w| w[0] < w[1]);
        if !ascending {
            return Err(ConfigError::ThresholdsNotAscending);
        }

        let expected = self.eval_thresholds.len() + 1;
        if self.eval_colors.len() != expected {
            return Err(ConfigError::ColorTableSize {
                expected,
                actual: self.eval_colors.len(),
            });
        }

        check_range("stone_size", self.stone_size, 0.01, 1.0)?;
        check_range("starpoint_size", self.starpoint_size, 0.0, 1.0)?;
        check_range("coordinate_margin", self.coordinate_margin, 0.0, 1.5)?;
        check_range("eval_dot_max_size", self.eval_dot_max_size, 0.0, 1.0)?;
        check_range("ghost_alpha", self.ghost_alpha, 0.0, 1.0)?;
        check_range("top_move_x_alpha", self.top_move_x_alpha, 0.0, 1.0)?;
        check_range("child_scale", self.child_scale, 0.01, 1.0)?;
        Ok(())
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
