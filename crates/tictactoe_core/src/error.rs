//! Move rejection types.

use crate::engine::Phase;
use crate::types::{BoardError, Sign};
use derive_more::{Display, Error};

/// Why a well-formed move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IllegalMove {
    /// The requesting mark is not the one to move.
    #[display("it's {}'s turn, not {}'s", expected, requested)]
    WrongTurn {
        /// Mark whose turn it is.
        expected: Sign,
        /// Mark that asked to move.
        requested: Sign,
    },
    /// The target square already holds a mark.
    #[display("square {} is already occupied", _0)]
    CellOccupied(usize),
    /// The round has already finished.
    #[display("game is already over ({:?})", _0)]
    GameOver(Phase),
}

/// Error returned when the engine rejects a move.
///
/// Every variant leaves the board and turn state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The index does not name a square.
    #[display("Square index {} is out of range (must be 0-8)", _0)]
    InvalidIndex(#[error(not(source))] usize),
    /// The board refused to overwrite a mark.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),
    /// The move breaks a rule of play.
    #[display("Illegal move: {}", _0)]
    IllegalMove(#[error(not(source))] IllegalMove),
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::InvalidIndex(index) => MoveError::InvalidIndex(index),
            BoardError::CellOccupied(index) => MoveError::CellOccupied(index),
        }
    }
}

impl From<IllegalMove> for MoveError {
    fn from(reason: IllegalMove) -> Self {
        MoveError::IllegalMove(reason)
    }
}
