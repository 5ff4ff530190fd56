//! Command-line interface for tictree.

use crate::config::Opponent;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictree_core::{Board, Mark};

/// Tictree - tic-tac-toe against a friend or an exhaustive game tree
#[derive(Parser, Debug)]
#[command(name = "tictree")]
#[command(about = "Tic-tac-toe against a friend or an exhaustive game tree", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (plays one game when omitted)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game
    Play {
        /// Who plays against you
        #[arg(long, value_enum)]
        opponent: Option<Opponent>,

        /// Mark the computer plays (X or O)
        #[arg(long)]
        computer_mark: Option<Mark>,

        /// Do not print outcome odds after each move
        #[arg(long)]
        hide_odds: bool,
    },

    /// Print enumerated outcomes for a position and each of its moves
    Analyze {
        /// Position as nine symbols from `.XO`, row by row (default: empty board)
        #[arg(long)]
        board: Option<Board>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
