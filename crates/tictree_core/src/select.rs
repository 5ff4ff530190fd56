//! Move selection over a built [`GameTree`].
//!
//! Candidates are ranked by the mover's share of wins among all games
//! enumerated below each child. The first child (lowest cell) wins ties.

use crate::tally::Tally;
use crate::tree::{GameTree, TreeNode};
use serde::Serialize;
use tracing::{debug, instrument};

/// A candidate move with the outcomes enumerated beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveChoice {
    cell: usize,
    tally: Tally,
    fraction: f64,
}

impl MoveChoice {
    /// Square to play.
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// Outcomes of every game continuing through this move.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// The mover's win share for this move.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

/// Every continuation of `node` in cell order, scored for the node's mover.
pub fn rank_moves(tree: &GameTree, node: &TreeNode) -> Vec<MoveChoice> {
    let mover = node.to_move();
    node.edges()
        .iter()
        .map(|edge| {
            let tally = tree.child(edge).tally();
            MoveChoice {
                cell: edge.cell(),
                tally,
                fraction: tally.win_fraction(mover),
            }
        })
        .collect()
}

/// Continuation with the highest win share for the node's mover.
///
/// Returns `None` for leaves.
#[instrument(skip_all, fields(board = %node.board().key(), mover = %node.to_move()))]
pub fn best_move(tree: &GameTree, node: &TreeNode) -> Option<MoveChoice> {
    let best = rank_moves(tree, node)
        .into_iter()
        .reduce(|best, next| if next.fraction > best.fraction { next } else { best });
    if let Some(choice) = &best {
        debug!(cell = choice.cell, fraction = choice.fraction, "Selected move");
    }
    best
}
