//! Move generation.

use crate::types::{Board, CELLS};
use tracing::instrument;

/// Returns every empty square in ascending index order.
///
/// An empty result on a board with no winner means the game is tied.
#[instrument]
pub fn available_moves(board: &Board) -> Vec<usize> {
    (0..CELLS).filter(|&pos| board.is_empty(pos)).collect()
}
