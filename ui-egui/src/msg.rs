// SPDX-License-Identifier: MIT OR Apache-2.0

//! Actions the board surface emits to the application.

use goban_core::{Coord, NodeId};

/// Messages sent from the board to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    /// Play the previewed ghost stone at this intersection
    ConfirmPlacement(Coord),
    /// Show analysis and comments of an earlier move
    InspectNode(NodeId),
}
