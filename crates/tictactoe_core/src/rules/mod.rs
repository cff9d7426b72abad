//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). The engine composes them
//! at the end of every turn and the opponent uses them to look ahead.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, completing_square, winning_line};
