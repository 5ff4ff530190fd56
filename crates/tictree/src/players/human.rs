//! Human player reading moves from a line-oriented console.

use super::{PlayError, Player};
use derive_more::Display;
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tictree_core::{Board, CELLS, Game};
use tracing::{debug, instrument};

/// Why a line of input was not accepted as a move.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// Not a number.
    #[display("Could not understand {} - pick again", _0)]
    Malformed(String),
    /// A number off the board.
    #[display("Square must be between 0 and 8 - pick again")]
    OutOfRange(i64),
    /// A square that already holds a mark.
    #[display("Square is taken - pick again")]
    Occupied(usize),
}

impl std::error::Error for InputError {}

/// Parses one line of input as a square on `board`.
#[instrument(skip(board))]
pub fn parse_move(raw: &str, board: &Board) -> Result<usize, InputError> {
    let raw = raw.trim();
    let square: i64 = raw
        .parse()
        .map_err(|_| InputError::Malformed(raw.to_string()))?;
    let pos = usize::try_from(square)
        .ok()
        .filter(|&pos| pos < CELLS)
        .ok_or(InputError::OutOfRange(square))?;
    if !board.is_empty(pos) {
        return Err(InputError::Occupied(pos));
    }
    Ok(pos)
}

/// Human player using keyboard input.
///
/// Input is shared so two humans can take turns on one terminal.
pub struct HumanPlayer<R, W> {
    name: String,
    input: Rc<RefCell<R>>,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: Rc<RefCell<R>>, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Consumes the player, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads raw bytes up to a newline; bytes that are not UTF-8 are kept
    /// as replacement characters and rejected later as malformed.
    fn read_line(&mut self) -> Result<String, PlayError> {
        let mut buf = Vec::new();
        let read = self.input.borrow_mut().read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Err(PlayError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(player = %self.name, mark = %game.to_move()))]
    fn choose_move(&mut self, game: &Game) -> Result<usize, PlayError> {
        writeln!(self.output, "Player {} - pick a square!", game.to_move())?;
        write!(self.output, "{}", game.board().render_options())?;
        self.output.flush()?;

        loop {
            let line = self.read_line()?;
            match parse_move(&line, game.board()) {
                Ok(pos) => return Ok(pos),
                Err(e) => {
                    debug!(error = %e, "Rejected input");
                    writeln!(self.output, "{}", e)?;
                    self.output.flush()?;
                }
            }
        }
    }
}
