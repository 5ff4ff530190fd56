//! Exhaustive game tree.
//!
//! The tree enumerates every continuation from a position. A mover who can
//! win immediately always does: the first winning square becomes the only
//! child. Otherwise every empty square is a child, so the tallies count all
//! possible games rather than rational ones. This is simulation, not minimax,
//! and a mover taking a win ignores whatever the opponent threatened.
//!
//! Nodes live in an arena and are shared by board value. A position reached
//! through different move orders is built once and referenced from every
//! parent.

use crate::rules::{available_moves, is_won_by, winner};
use crate::tally::Tally;
use crate::types::{Board, BoardKey, CELLS, Mark};
use derive_more::Display;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Deepest recursion a build can reach: one level per square.
pub const MAX_DEPTH: usize = CELLS;

/// Index of a node in a [`GameTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct NodeId(usize);

/// A move from a node to one of its continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    cell: usize,
    child: NodeId,
}

impl Edge {
    /// Square played.
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// Node reached by playing [`Edge::cell`].
    pub fn child(&self) -> NodeId {
        self.child
    }
}

/// A position in the tree with its aggregated outcomes.
#[derive(Debug, Clone)]
pub struct TreeNode {
    board: Board,
    to_move: Mark,
    edges: Vec<Edge>,
    tally: Tally,
}

impl TreeNode {
    /// Position at this node.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark that would move next from this position.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Continuations in ascending cell order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outcomes of every game through this node.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// True for finished positions (a win or a full board).
    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Positions that cannot be reached by alternating play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TreeError {
    /// X must have the same number of marks as O, or one more.
    #[display("unbalanced board: {} X marks against {} O marks", x, o)]
    Unbalanced {
        /// Count of X marks.
        x: usize,
        /// Count of O marks.
        o: usize,
    },
    /// Both marks hold a complete line.
    #[display("both marks hold a winning line")]
    DoubleWin,
    /// The winner was not the last mark to move.
    #[display("{} holds a line but did not move last", _0)]
    WinnerOutOfTurn(Mark),
}

impl std::error::Error for TreeError {}

/// Fully built game tree, read-only once constructed.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    index: HashMap<BoardKey, NodeId>,
    root: NodeId,
}

impl GameTree {
    /// Builds the complete tree from the empty board with X to move.
    #[instrument]
    pub fn build() -> Self {
        let tree = TreeBuilder::new().build(Board::new(), Mark::X);
        info!(
            nodes = tree.len(),
            tally = ?tree.root().tally(),
            "Game tree built"
        );
        tree
    }

    /// Builds the tree of continuations from an arbitrary position.
    ///
    /// The mark to move is inferred from the mark counts. A board that is
    /// already won becomes a single leaf crediting the winner.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError`] for boards that alternating play cannot produce.
    #[instrument(skip(board), fields(key = %board.key()))]
    pub fn build_from(board: Board) -> Result<Self, TreeError> {
        let (x, o) = (board.count(Mark::X), board.count(Mark::O));
        let to_move = match x.checked_sub(o) {
            Some(0) => Mark::X,
            Some(1) => Mark::O,
            _ => return Err(TreeError::Unbalanced { x, o }),
        };

        let x_won = is_won_by(&board, Mark::X);
        let o_won = is_won_by(&board, Mark::O);
        if x_won && o_won {
            return Err(TreeError::DoubleWin);
        }

        let mut builder = TreeBuilder::new();
        if let Some(mark) = winner(&board) {
            if mark == to_move {
                return Err(TreeError::WinnerOutOfTurn(mark));
            }
            let root = builder.insert(board, to_move, Vec::new(), Tally::win(mark));
            return Ok(builder.finish(root));
        }

        let tree = builder.build(board, to_move);
        debug!(nodes = tree.len(), "Subtree built");
        Ok(tree)
    }

    /// Root node.
    pub fn root(&self) -> &TreeNode {
        self.get(self.root)
    }

    /// Identifier of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Node by identifier.
    ///
    /// Identifiers are only handed out by this tree, so lookups are in range.
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Node reached by following `edge`.
    pub fn child(&self, edge: &Edge) -> &TreeNode {
        self.get(edge.child)
    }

    /// Node for a position, if the enumeration reached it.
    pub fn node(&self, board: &Board) -> Option<&TreeNode> {
        self.index.get(&board.key()).map(|&id| self.get(id))
    }

    /// Number of distinct positions in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node, in completion order (children before parents).
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }
}

/// Depth-first builder holding the memo table for one build.
///
/// A node enters the table only after its whole subtree is finished, so a
/// table hit always yields a complete node.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<TreeNode>,
    table: HashMap<BoardKey, NodeId>,
}

impl TreeBuilder {
    /// Creates a builder with an empty table.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Enumerates every continuation of `board` with `to_move` moving first.
    ///
    /// Callers guarantee `to_move` matches the mark counts and that `board`
    /// is not already won; [`GameTree::build_from`] checks both.
    pub(crate) fn build(mut self, board: Board, to_move: Mark) -> GameTree {
        let root = self.expand(board, to_move, 0);
        self.finish(root)
    }

    fn finish(self, root: NodeId) -> GameTree {
        GameTree {
            nodes: self.nodes,
            index: self.table,
            root,
        }
    }

    fn expand(&mut self, board: Board, mover: Mark, depth: usize) -> NodeId {
        if depth > MAX_DEPTH {
            warn!(depth, key = %board.key(), "Depth cap reached, scoring as a tie");
            return self.insert(board, mover, Vec::new(), Tally::tie());
        }
        if let Some(&id) = self.table.get(&board.key()) {
            return id;
        }

        let moves = available_moves(&board);
        if moves.is_empty() {
            return self.insert(board, mover, Vec::new(), Tally::tie());
        }

        let winning = moves
            .iter()
            .map(|&cell| (cell, board.with_mark(cell, mover)))
            .find(|(_, next)| is_won_by(next, mover));
        if let Some((cell, next)) = winning {
            let child = self.win_leaf(next, mover);
            let edges = vec![Edge { cell, child }];
            return self.insert(board, mover, edges, Tally::win(mover));
        }

        let mut edges = Vec::with_capacity(moves.len());
        let mut tally = Tally::default();
        for cell in moves {
            let child = self.expand(board.with_mark(cell, mover), mover.opponent(), depth + 1);
            tally += self.nodes[child.0].tally;
            edges.push(Edge { cell, child });
        }
        self.insert(board, mover, edges, tally)
    }

    fn win_leaf(&mut self, board: Board, winner: Mark) -> NodeId {
        match self.table.get(&board.key()) {
            Some(&id) => id,
            None => self.insert(board, winner.opponent(), Vec::new(), Tally::win(winner)),
        }
    }

    fn insert(&mut self, board: Board, to_move: Mark, edges: Vec<Edge>, tally: Tally) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            board,
            to_move,
            edges,
            tally,
        });
        self.table.insert(board.key(), id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_board_is_tie_leaf() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        let tree = TreeBuilder::new().build(board, Mark::O);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().tally(), Tally::tie());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_immediate_win_is_sole_child() {
        // X to move can complete the top row at 2 or the left column at 6.
        let board: Board = "XX.XOO.O.".parse().unwrap();
        let tree = TreeBuilder::new().build(board, Mark::X);
        let root = tree.root();
        assert_eq!(root.edges().len(), 1);
        assert_eq!(root.edges()[0].cell(), 2);
        assert_eq!(root.tally(), Tally::win(Mark::X));
        let leaf = tree.child(&root.edges()[0]);
        assert!(leaf.is_leaf());
        assert!(is_won_by(leaf.board(), Mark::X));
    }

    #[test]
    fn test_memoized_nodes_are_shared() {
        let tree = GameTree::build();
        let follow = |node: &TreeNode, cell: usize| -> NodeId {
            node.edges()
                .iter()
                .find(|edge| edge.cell() == cell)
                .map(Edge::child)
                .unwrap()
        };
        // X0 O4 X8 and X8 O4 X0 reach the same position.
        let x0_o4 = tree.get(follow(tree.get(follow(tree.root(), 0)), 4));
        let x8_o4 = tree.get(follow(tree.get(follow(tree.root(), 8)), 4));
        assert_ne!(x0_o4.board(), x8_o4.board());
        assert_eq!(follow(x0_o4, 8), follow(x8_o4, 0));
    }

    #[test]
    fn test_build_from_rejects_unreachable_boards() {
        let unbalanced: Board = "XX.......".parse().unwrap();
        assert_eq!(
            GameTree::build_from(unbalanced).unwrap_err(),
            TreeError::Unbalanced { x: 2, o: 0 }
        );
        let double: Board = "XXXOOO...".parse().unwrap();
        assert_eq!(
            GameTree::build_from(double).unwrap_err(),
            TreeError::DoubleWin
        );
        let late: Board = "OOOXX.XX.".parse().unwrap();
        assert_eq!(
            GameTree::build_from(late).unwrap_err(),
            TreeError::WinnerOutOfTurn(Mark::O)
        );
    }

    #[test]
    fn test_depth_cap_stops_recursion() {
        let mut builder = TreeBuilder::new();
        let id = builder.expand(Board::new(), Mark::X, MAX_DEPTH + 1);
        let tree = builder.finish(id);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().tally(), Tally::tie());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_build_from_infers_mover() {
        let board: Board = "XX.XOO.O.".parse().unwrap();
        let tree = GameTree::build_from(board).unwrap();
        assert_eq!(tree.root().to_move(), Mark::X);
        assert_eq!(tree.root().tally(), Tally::win(Mark::X));

        let board: Board = "OO.XX.X..".parse().unwrap();
        let tree = GameTree::build_from(board).unwrap();
        assert_eq!(tree.root().to_move(), Mark::O);
    }

    #[test]
    fn test_build_from_won_board_is_leaf() {
        let board: Board = "XXXOO....".parse().unwrap();
        let tree = GameTree::build_from(board).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().tally(), Tally::win(Mark::X));
    }
}
