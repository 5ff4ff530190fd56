//! Tictree - console tic-tac-toe
//!
//! Plays one game per invocation, or reports enumerated outcomes for a
//! position.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Instant;
use tictree::{
    Analysis, Cli, Command, ComputerPlayer, GameConfig, HumanPlayer, Match, Opponent, Player,
};
use tictree_core::{Board, GameTree, Mark};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        None => run_play(config),
        Some(Command::Play {
            opponent,
            computer_mark,
            hide_odds,
        }) => run_play(config.with_overrides(opponent, computer_mark, hide_odds)),
        Some(Command::Analyze { board, json }) => run_analyze(board.unwrap_or_default(), json),
    }
}

/// Play one game on the terminal
#[instrument(skip_all, fields(opponent = %config.opponent()))]
fn run_play(config: GameConfig) -> Result<()> {
    let input = Rc::new(RefCell::new(io::stdin().lock()));

    let (player_x, player_o): (Box<dyn Player>, Box<dyn Player>) = match config.opponent() {
        Opponent::Human => (
            Box::new(HumanPlayer::new("Player X", Rc::clone(&input), io::stdout())),
            Box::new(HumanPlayer::new("Player O", input, io::stdout())),
        ),
        Opponent::Computer => {
            let started = Instant::now();
            let tree = GameTree::build();
            info!(
                nodes = tree.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Game tree ready"
            );
            let computer: Box<dyn Player> = Box::new(ComputerPlayer::new("Computer", tree));
            let human: Box<dyn Player> = Box::new(HumanPlayer::new("You", input, io::stdout()));
            match config.computer_mark() {
                Mark::X => (computer, human),
                Mark::O => (human, computer),
            }
        }
    };

    let show_odds = *config.show_odds() && *config.opponent() == Opponent::Computer;
    Match::new(player_x, player_o, io::stdout())
        .show_odds(show_odds)
        .run()
        .context("Game abandoned without a result")?;
    Ok(())
}

/// Print the outcome report for a position
#[instrument(skip(board), fields(key = %board.key()))]
fn run_analyze(board: Board, json: bool) -> Result<()> {
    let analysis = Analysis::of(board).context("Cannot analyze position")?;
    let stdout = io::stdout().lock();
    if json {
        analysis.write_json(stdout)
    } else {
        analysis.write_table(stdout)
    }
}
