//! Tictree library - console tic-tac-toe driven by an exhaustive game tree.
//!
//! # Architecture
//!
//! - **Players**: humans typing square numbers, or the tree-backed computer
//! - **Runner**: the turn loop, board output and outcome odds
//! - **Analyze**: outcome reports for a position
//! - **Config**: TOML settings with command-line overrides
//!
//! # Example
//!
//! ```no_run
//! use std::{cell::RefCell, io, rc::Rc};
//! use tictree::{ComputerPlayer, HumanPlayer, Match};
//! use tictree_core::GameTree;
//!
//! # fn example() -> anyhow::Result<()> {
//! let input = Rc::new(RefCell::new(io::stdin().lock()));
//! let human = HumanPlayer::new("You", input, io::stdout());
//! let computer = ComputerPlayer::new("Computer", GameTree::build());
//! let _outcome = Match::new(Box::new(human), Box::new(computer), io::stdout()).run()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analyze;
mod cli;
mod config;
mod players;
mod runner;

pub use analyze::Analysis;
pub use cli::{Cli, Command};
pub use config::{ConfigError, GameConfig, Opponent};
pub use players::{ComputerPlayer, HumanPlayer, InputError, PlayError, Player, parse_move};
pub use runner::Match;
