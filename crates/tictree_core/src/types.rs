//! Core domain types for tic-tac-toe.

use crate::game::MoveError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of squares on the board.
pub const CELLS: usize = 9;

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (moves on even turns).
    X,
    /// Mark O (moves on odd turns).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the mark that moves on the given zero-based turn.
    pub fn for_turn(turn: usize) -> Self {
        if turn % 2 == 0 { Mark::X } else { Mark::O }
    }

    /// Character used when rendering the mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

impl Square {
    /// Character used when rendering the square.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(mark) => mark.symbol(),
        }
    }

    fn digit(self) -> u16 {
        match self {
            Square::Empty => 0,
            Square::Occupied(Mark::X) => 1,
            Square::Occupied(Mark::O) => 2,
        }
    }
}

/// Packed base-3 encoding of a board's contents.
///
/// Two boards share a key exactly when every square matches, so the key can
/// stand in for the board in lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct BoardKey(u16);

impl BoardKey {
    /// Raw packed value (0..3^9).
    pub fn value(self) -> u16 {
        self.0
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELLS],
        }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }

    /// Number of squares holding a mark.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Returns a copy of the board with `mark` placed at `pos`.
    ///
    /// # Errors
    ///
    /// Fails if `pos` is off the board or the square is taken.
    #[instrument]
    pub fn place(&self, pos: usize, mark: Mark) -> Result<Board, MoveError> {
        match self.get(pos) {
            None => Err(MoveError::OutOfRange(pos)),
            Some(Square::Occupied(_)) => Err(MoveError::SquareOccupied(pos)),
            Some(Square::Empty) => Ok(self.with_mark(pos, mark)),
        }
    }

    /// Unchecked placement for callers that already hold an empty index.
    pub(crate) fn with_mark(&self, pos: usize, mark: Mark) -> Board {
        let mut next = *self;
        next.squares[pos] = Square::Occupied(mark);
        next
    }

    /// Value key identifying this board's contents.
    pub fn key(&self) -> BoardKey {
        BoardKey(
            self.squares
                .iter()
                .fold(0u16, |acc, square| acc * 3 + square.digit()),
        )
    }

    /// Renders the board as three lines of three symbols (`.`, `X`, `O`).
    pub fn render(&self) -> String {
        self.render_with(|_, square| square.symbol())
    }

    /// Renders the board for a move prompt: empty squares show their index,
    /// taken squares show `-`.
    pub fn render_options(&self) -> String {
        self.render_with(|pos, square| match square {
            Square::Empty => char::from_digit(pos as u32, 10).unwrap_or('?'),
            Square::Occupied(_) => '-',
        })
    }

    fn render_with(&self, symbol: impl Fn(usize, Square) -> char) -> String {
        let mut out = String::with_capacity(12);
        for (pos, square) in self.squares.iter().enumerate() {
            out.push(symbol(pos, *square));
            if pos % 3 == 2 {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardParseError {
    /// Input did not contain exactly nine squares.
    #[display("expected 9 squares, found {}", _0)]
    WrongLength(usize),
    /// Input contained a symbol other than `.`, `X` or `O`.
    #[display("unknown square symbol {:?}", _0)]
    UnknownSymbol(char),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses the nine-symbol form produced by [`Board::render`].
    ///
    /// Whitespace and `/` row separators are ignored; `-` and `_` are
    /// accepted as empty squares.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if symbols.len() != CELLS {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }

        let mut board = Board::new();
        for (pos, symbol) in symbols.into_iter().enumerate() {
            board.squares[pos] = match symbol {
                '.' | '-' | '_' => Square::Empty,
                'x' | 'X' => Square::Occupied(Mark::X),
                'o' | 'O' => Square::Occupied(Mark::O),
                other => return Err(BoardParseError::UnknownSymbol(other)),
            };
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_alternates_by_turn() {
        assert_eq!(Mark::for_turn(0), Mark::X);
        assert_eq!(Mark::for_turn(1), Mark::O);
        assert_eq!(Mark::for_turn(8), Mark::X);
        assert_eq!(Mark::X.opponent(), Mark::O);
    }

    #[test]
    fn test_place_rejects_taken_and_out_of_range() {
        let board = Board::new().place(4, Mark::X).unwrap();
        assert_eq!(board.place(4, Mark::O), Err(MoveError::SquareOccupied(4)));
        assert_eq!(board.place(9, Mark::O), Err(MoveError::OutOfRange(9)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_render_layout() {
        let board: Board = "X.O/.X./..O".parse().unwrap();
        assert_eq!(board.render(), "X.O\n.X.\n..O\n");
        assert_eq!(board.render_options(), "-1-\n3-5\n67-\n");
    }

    #[test]
    fn test_key_is_value_based() {
        let a = Board::new().with_mark(0, Mark::X).with_mark(4, Mark::O);
        let b = Board::new().with_mark(4, Mark::O).with_mark(0, Mark::X);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Board::new().key());
        assert_eq!(Board::new().key().value(), 0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(BoardParseError::WrongLength(2))
        );
        assert_eq!(
            "XO.......Z".parse::<Board>().unwrap_err(),
            BoardParseError::WrongLength(10)
        );
        assert_eq!(
            "XO......Z".parse::<Board>(),
            Err(BoardParseError::UnknownSymbol('Z'))
        );
    }
}
