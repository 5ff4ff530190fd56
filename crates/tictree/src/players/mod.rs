//! Player trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::{HumanPlayer, InputError, parse_move};

use derive_more::Display;
use tictree_core::{Board, MoveError, Tally, TreeError};

/// Trait for players that can make moves.
pub trait Player {
    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Chooses a square (0-8) for the mark to move in `game`.
    fn choose_move(&mut self, game: &tictree_core::Game) -> Result<usize, PlayError>;

    /// Enumerated outcomes for `board`, if this player tracks them.
    fn odds(&mut self, _board: &Board) -> Option<Tally> {
        None
    }
}

/// Errors that end a game without a result.
#[derive(Debug, Display)]
pub enum PlayError {
    /// The input stream reached its end.
    #[display("Input closed before the game finished")]
    InputClosed,

    /// Reading or writing the console failed.
    #[display("Console I/O failed: {}", _0)]
    Io(std::io::Error),

    /// A player produced a move the game rejected.
    #[display("Illegal move: {}", _0)]
    IllegalMove(MoveError),

    /// The computer could not build a tree for the position.
    #[display("Cannot evaluate position: {}", _0)]
    Tree(TreeError),

    /// No continuation was available to choose.
    #[display("No move available")]
    NoMove,
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::Io(e) => Some(e),
            PlayError::IllegalMove(e) => Some(e),
            PlayError::Tree(e) => Some(e),
            PlayError::InputClosed | PlayError::NoMove => None,
        }
    }
}

impl From<std::io::Error> for PlayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<MoveError> for PlayError {
    fn from(err: MoveError) -> Self {
        Self::IllegalMove(err)
    }
}

impl From<TreeError> for PlayError {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}
