//! Game logic and rules for a single tic-tac-toe match.

use crate::rules::{is_full, is_won_by};
use crate::types::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Error that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is not on the board.
    #[display("Square {} is not between 0 and 8", _0)]
    OutOfRange(usize),

    /// The square is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// Tic-tac-toe game engine.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: usize,
    status: GameStatus,
}

impl Game {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves played so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Mark whose turn it is.
    pub fn to_move(&self) -> Mark {
        Mark::for_turn(self.turn)
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Makes a move at the given position (0-8) for the mark to move.
    ///
    /// # Errors
    ///
    /// Rejects moves after the game has ended, off the board, or onto an
    /// occupied square. A rejected move leaves the game untouched.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn make_move(&mut self, pos: usize) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        let mark = self.to_move();
        self.board = self.board.place(pos, mark)?;
        self.turn += 1;

        if is_won_by(&self.board, mark) {
            self.status = GameStatus::Won(mark);
        } else if is_full(&self.board) {
            self.status = GameStatus::Draw;
        }

        debug!(%mark, pos, status = ?self.status, "Move applied");
        Ok(self.status)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
