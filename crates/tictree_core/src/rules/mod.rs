//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the game state machine and the tree builder share them.

pub mod draw;
pub mod moves;
pub mod win;

pub use draw::{is_draw, is_full};
pub use moves::available_moves;
pub use win::{WIN_LINES, is_won_by, winner};
