//! Computer player backed by the exhaustive game tree.

use super::{PlayError, Player};
use tictree_core::{Board, Game, GameTree, Tally, TreeError, best_move};
use tracing::{debug, info, instrument};

/// Plays the continuation with the best enumerated win share.
///
/// The full tree only follows an immediate win where one exists, so a
/// position where a human passed up a win is missing from it. Such positions
/// get a subtree of their own, kept until play leaves it.
pub struct ComputerPlayer {
    name: String,
    tree: GameTree,
    detour: Option<GameTree>,
}

impl ComputerPlayer {
    /// Creates a computer player over a prebuilt tree.
    pub fn new(name: impl Into<String>, tree: GameTree) -> Self {
        Self {
            name: name.into(),
            tree,
            detour: None,
        }
    }

    /// Tree holding `board`, building a subtree when the main tree lacks it.
    #[instrument(skip_all, fields(board = %board.key()))]
    fn tree_for(&mut self, board: &Board) -> Result<&GameTree, TreeError> {
        if self.tree.node(board).is_some() {
            return Ok(&self.tree);
        }
        let stale = self
            .detour
            .as_ref()
            .is_none_or(|detour| detour.node(board).is_none());
        if stale {
            info!("Position left the precomputed tree, building a subtree");
            self.detour = Some(GameTree::build_from(*board)?);
        }
        Ok(self.detour.as_ref().unwrap_or(&self.tree))
    }
}

impl Player for ComputerPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(player = %self.name, mark = %game.to_move()))]
    fn choose_move(&mut self, game: &Game) -> Result<usize, PlayError> {
        let tree = self.tree_for(game.board())?;
        let node = tree.node(game.board()).ok_or(PlayError::NoMove)?;
        let choice = best_move(tree, node).ok_or(PlayError::NoMove)?;
        debug!(
            cell = choice.cell(),
            fraction = choice.fraction(),
            "Computer chose move"
        );
        Ok(choice.cell())
    }

    fn odds(&mut self, board: &Board) -> Option<Tally> {
        let tree = self.tree_for(board).ok()?;
        tree.node(board).map(|node| node.tally())
    }
}
