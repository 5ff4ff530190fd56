//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Mark, Square};
use strum::IntoEnumIterator;
use tracing::instrument;

/// The eight index triples that win the game.
#[rustfmt::skip]
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],             // Diagonals
];

/// Checks whether `mark` holds all three squares of some line.
#[instrument]
pub fn is_won_by(board: &Board, mark: Mark) -> bool {
    let held = Some(Square::Occupied(mark));
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == held))
}

/// Returns the mark holding a complete line, checking X first.
///
/// Boards reached by alternating play never have two winners.
#[instrument]
pub fn winner(board: &Board) -> Option<Mark> {
    Mark::iter().find(|&mark| is_won_by(board, mark))
}
