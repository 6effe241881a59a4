// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis records attached to game nodes by an external engine

use crate::{BoardSize, Color, Coord, Move};
use serde::{Deserialize, Serialize};

/// Engine evaluation of a node.
///
/// Ownership and policy are row-major starting at the top row; see
/// [`BoardSize::analysis_index`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Score lost by the move leading to this node, `None` until analyzed
    pub points_lost: Option<f64>,
    /// Signed ownership per intersection: positive for Black, magnitude is confidence
    pub ownership: Option<Vec<f32>>,
    /// Move probability per intersection, followed by the pass probability
    pub policy: Option<Vec<f32>>,
}

impl Evaluation {
    /// Ownership vector if it matches the board dimensions
    pub fn ownership_for(&self, size: BoardSize) -> Option<&[f32]> {
        self.ownership
            .as_deref()
            .filter(|o| o.len() == size.points())
    }

    /// Policy vector if it matches the board dimensions plus the pass entry
    pub fn policy_for(&self, size: BoardSize) -> Option<&[f32]> {
        self.policy
            .as_deref()
            .filter(|p| p.len() == size.points() + 1)
    }
}

/// One entry of the engine's ranked candidate list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMove {
    /// GTP vertex, e.g. `Q16` or `pass`
    #[serde(rename = "move")]
    pub gtp: String,
    /// Playouts spent on this move
    pub visits: u32,
    /// Score lost relative to the best move
    #[serde(rename = "pointsLost")]
    pub points_lost: f64,
}

impl CandidateMove {
    pub fn new(gtp: impl Into<String>, visits: u32, points_lost: f64) -> Self {
        Self {
            gtp: gtp.into(),
            visits,
            points_lost,
        }
    }

    /// Board coordinate of this candidate, `None` for a pass or unparseable text
    pub fn coord(&self, player: Color, size: BoardSize) -> Option<Coord> {
        Move::from_gtp(&self.gtp, player, size)
            .ok()
            .and_then(|mv| mv.coord)
    }
}
