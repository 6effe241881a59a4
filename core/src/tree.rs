// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only game tree and the read-only view the board surface consumes

use crate::{
    analysis::{CandidateMove, Evaluation},
    board::Board,
    rules, BoardSize, Color, Coord, GameError, Move,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a node inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A position in the game tree
#[derive(Debug, Clone, PartialEq)]
pub struct GameNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// Variations in creation order
    pub children: Vec<NodeId>,
    /// Setup stones (handicap, edits) applied before `mv`
    pub placements: Vec<Move>,
    /// The move that led to this node
    pub mv: Option<Move>,
    pub evaluation: Evaluation,
    /// Ranked engine candidates for the next move
    pub candidate_moves: Vec<CandidateMove>,
    pub comment: Option<String>,
}

impl GameNode {
    fn new(id: NodeId, parent: Option<NodeId>) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            placements: Vec::new(),
            mv: None,
            evaluation: Evaluation::default(),
            candidate_moves: Vec::new(),
            comment: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True when the node's move is a pass
    pub fn is_pass(&self) -> bool {
        self.mv.is_some_and(|mv| mv.is_pass())
    }

    /// The node's move, when it is the only thing the node does
    pub fn single_move(&self) -> Option<&Move> {
        if self.placements.is_empty() {
            self.mv.as_ref()
        } else {
            None
        }
    }

    /// Placements followed by the move, in application order
    pub fn moves_with_placements(&self) -> impl Iterator<Item = &Move> {
        self.placements.iter().chain(self.mv.iter())
    }

    /// Player who acted last in this node
    pub fn player(&self) -> Option<Color> {
        self.mv
            .or_else(|| self.placements.last().copied())
            .map(|mv| mv.player)
    }

    pub fn points_lost(&self) -> Option<f64> {
        self.evaluation.points_lost
    }
}

/// Read-only access to a game as seen by the board surface.
///
/// Implementations may change between frames (analysis arriving, moves
/// played); callers read one consistent snapshot per draw pass.
pub trait GameSource {
    fn board_size(&self) -> BoardSize;

    fn current_node(&self) -> &GameNode;

    fn node(&self, id: NodeId) -> Option<&GameNode>;

    /// Stones currently on the board at the current node
    fn stones(&self) -> HashMap<Coord, Color>;

    /// Player to move at the current node
    fn next_player(&self) -> Color;

    fn game_ended(&self) -> bool;

    fn parent<'a>(&'a self, node: &GameNode) -> Option<&'a GameNode> {
        node.parent.and_then(|id| self.node(id))
    }

    fn children<'a>(&'a self, node: &GameNode) -> Vec<&'a GameNode> {
        node.children.iter().filter_map(|id| self.node(*id)).collect()
    }

    /// Ancestor chain of the current node, root first, current node last
    fn nodes_from_root(&self) -> Vec<&GameNode> {
        let mut chain = vec![self.current_node()];
        while let Some(parent) = chain.last().and_then(|n| self.parent(n)) {
            chain.push(parent);
        }
        chain.reverse();
        chain
    }
}

#[derive(Debug, Clone)]
struct TreeEntry {
    node: GameNode,
    board: Board,
}

/// In-memory game tree with cached board snapshots per node
#[derive(Debug, Clone)]
pub struct GameTree {
    size: BoardSize,
    entries: Vec<TreeEntry>,
    current: NodeId,
}

impl GameTree {
    pub fn new(size: BoardSize) -> Self {
        let root = TreeEntry {
            node: GameNode::new(NodeId(0), None),
            board: Board::new(size),
        };
        Self {
            size,
            entries: vec![root],
            current: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Board at the current node
    pub fn board(&self) -> &Board {
        &self.entries[self.current.0].board
    }

    fn entry(&self, id: NodeId) -> Result<&TreeEntry, GameError> {
        self.entries.get(id.0).ok_or(GameError::UnknownNode(id.0))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut GameNode, GameError> {
        self.entries
            .get_mut(id.0)
            .map(|e| &mut e.node)
            .ok_or(GameError::UnknownNode(id.0))
    }

    /// Play the next player's stone at `coord`, following an existing
    /// variation when the same move was played here before
    pub fn play(&mut self, coord: Coord) -> Result<NodeId, GameError> {
        let mv = Move::play(self.next_player(), coord);
        if let Some(existing) = self.find_child(mv) {
            self.current = existing;
            return Ok(existing);
        }

        let mut board = self.board().clone();
        rules::apply_move(&mut board, coord, mv.player)?;
        Ok(self.append(Some(mv), Vec::new(), board))
    }

    /// The next player passes
    pub fn pass(&mut self) -> NodeId {
        let mv = Move::pass(self.next_player());
        if let Some(existing) = self.find_child(mv) {
            self.current = existing;
            return existing;
        }
        let board = self.board().clone();
        self.append(Some(mv), Vec::new(), board)
    }

    /// Play a GTP vertex such as `D4` or `pass` for the next player
    pub fn play_gtp(&mut self, text: &str) -> Result<NodeId, GameError> {
        let mv = Move::from_gtp(text, self.next_player(), self.size)?;
        match mv.coord {
            Some(coord) => self.play(coord),
            None => Ok(self.pass()),
        }
    }

    /// Add a setup node placing stones without capture checks
    pub fn place_stones(&mut self, placements: Vec<Move>) -> Result<NodeId, GameError> {
        let mut board = self.board().clone();
        for mv in &placements {
            let coord = mv.coord.ok_or(GameError::InvalidCoordinate)?;
            if !coord.is_valid(self.size) {
                return Err(GameError::InvalidCoordinate);
            }
            if !board.place(coord, mv.player) {
                return Err(GameError::OccupiedPosition);
            }
        }
        Ok(self.append(None, placements, board))
    }

    fn find_child(&self, mv: Move) -> Option<NodeId> {
        self.current_node()
            .children
            .iter()
            .copied()
            .find(|id| {
                let child = &self.entries[id.0].node;
                child.placements.is_empty() && child.mv == Some(mv)
            })
    }

    fn append(&mut self, mv: Option<Move>, placements: Vec<Move>, board: Board) -> NodeId {
        let id = NodeId(self.entries.len());
        let mut node = GameNode::new(id, Some(self.current));
        node.mv = mv;
        node.placements = placements;
        self.entries[self.current.0].node.children.push(id);
        self.entries.push(TreeEntry { node, board });
        self.current = id;
        tracing::trace!(node = %id, "Appended node");
        id
    }

    /// Step back to the parent; false at the root
    pub fn undo(&mut self) -> bool {
        match self.current_node().parent {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    /// Step into the main (first) variation; false at a leaf
    pub fn redo(&mut self) -> bool {
        match self.current_node().children.first() {
            Some(&child) => {
                self.current = child;
                true
            }
            None => false,
        }
    }

    pub fn set_current(&mut self, id: NodeId) -> Result<(), GameError> {
        self.entry(id)?;
        self.current = id;
        Ok(())
    }

    pub fn set_evaluation(&mut self, id: NodeId, evaluation: Evaluation) -> Result<(), GameError> {
        self.node_mut(id)?.evaluation = evaluation;
        Ok(())
    }

    pub fn set_candidate_moves(
        &mut self,
        id: NodeId,
        candidates: Vec<CandidateMove>,
    ) -> Result<(), GameError> {
        self.node_mut(id)?.candidate_moves = candidates;
        Ok(())
    }

    pub fn set_comment(&mut self, id: NodeId, comment: impl Into<String>) -> Result<(), GameError> {
        self.node_mut(id)?.comment = Some(comment.into());
        Ok(())
    }
}

impl GameSource for GameTree {
    fn board_size(&self) -> BoardSize {
        self.size
    }

    fn current_node(&self) -> &GameNode {
        &self.entries[self.current.0].node
    }

    fn node(&self, id: NodeId) -> Option<&GameNode> {
        self.entries.get(id.0).map(|e| &e.node)
    }

    fn stones(&self) -> HashMap<Coord, Color> {
        self.board().stones()
    }

    fn next_player(&self) -> Color {
        self.current_node()
            .player()
            .map_or(Color::Black, |p| p.opposite())
    }

    fn game_ended(&self) -> bool {
        let current = self.current_node();
        current.is_pass() && self.parent(current).is_some_and(|p| p.is_pass())
    }
}
