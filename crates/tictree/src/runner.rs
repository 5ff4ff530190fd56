//! Game orchestration between two players.

use crate::players::{PlayError, Player};
use std::io::Write;
use tictree_core::{Game, GameStatus, Mark};
use tracing::{debug, info, instrument};

/// Runs one game between two players, printing to `output`.
pub struct Match<'a, W> {
    game: Game,
    player_x: Box<dyn Player + 'a>,
    player_o: Box<dyn Player + 'a>,
    output: W,
    show_odds: bool,
}

impl<'a, W: Write> Match<'a, W> {
    /// Creates a match with X moving first.
    pub fn new(player_x: Box<dyn Player + 'a>, player_o: Box<dyn Player + 'a>, output: W) -> Self {
        Self {
            game: Game::new(),
            player_x,
            player_o,
            output,
            show_odds: false,
        }
    }

    /// Print outcome odds after each move when a player can supply them.
    pub fn show_odds(mut self, show: bool) -> Self {
        self.show_odds = show;
        self
    }

    /// Current game state.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Consumes the match, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays until the game is won or drawn.
    ///
    /// # Errors
    ///
    /// Fails without declaring a result when a player cannot produce a move,
    /// for example because its input stream closed.
    #[instrument(skip(self), fields(x = %self.player_x.name(), o = %self.player_o.name()))]
    pub fn run(&mut self) -> Result<GameStatus, PlayError> {
        info!("Starting game");
        self.print_odds()?;

        loop {
            match self.game.status() {
                GameStatus::Won(mark) => {
                    writeln!(self.output, "Player {} has won", mark)?;
                    info!(%mark, "Game won");
                    return Ok(GameStatus::Won(mark));
                }
                GameStatus::Draw => {
                    writeln!(self.output, "The game was a draw")?;
                    info!("Game drawn");
                    return Ok(GameStatus::Draw);
                }
                GameStatus::InProgress => {}
            }

            let mark = self.game.to_move();
            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };

            debug!(player = %player.name(), %mark, "Waiting for move");
            let pos = player.choose_move(&self.game)?;
            writeln!(self.output, "{} ({}) plays {}", player.name(), mark, pos)?;
            self.game.make_move(pos)?;

            writeln!(self.output, "{}", self.game.board())?;
            if !self.game.status().is_over() {
                self.print_odds()?;
            }
        }
    }

    fn print_odds(&mut self) -> Result<(), PlayError> {
        if !self.show_odds {
            return Ok(());
        }
        let board = *self.game.board();
        let odds = self
            .player_x
            .odds(&board)
            .or_else(|| self.player_o.odds(&board));
        if let Some(tally) = odds {
            writeln!(self.output, "Odds: {}", tally)?;
        }
        Ok(())
    }
}
