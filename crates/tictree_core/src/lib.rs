//! Tic-tac-toe rules and an exhaustive precomputed game tree.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Mark`], [`Square`] and the packed [`BoardKey`]
//! - **Rules**: move generation, the eight win lines, draw detection
//! - **Game**: a validated single-match state machine
//! - **Tree**: every continuation from a position, tallied bottom-up
//! - **Select**: the continuation with the best win share for the mover
//!
//! # Example
//!
//! ```
//! use tictree_core::{GameTree, best_move};
//!
//! let tree = GameTree::build();
//! let opening = best_move(&tree, tree.root()).unwrap();
//! assert_eq!(opening.cell(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
pub mod rules;
mod select;
mod tally;
mod tree;
mod types;

pub use game::{Game, GameStatus, MoveError};
pub use rules::{WIN_LINES, available_moves, is_draw, is_full, is_won_by, winner};
pub use select::{MoveChoice, best_move, rank_moves};
pub use tally::Tally;
pub use tree::{Edge, GameTree, MAX_DEPTH, NodeId, TreeError, TreeNode};
pub use types::{Board, BoardKey, BoardParseError, CELLS, Mark, Square};
