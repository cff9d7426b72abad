//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Sign {
    /// Mark X.
    X,
    /// Mark O.
    O,
}

impl Sign {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Sign::X => Sign::O,
            Sign::O => Sign::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Sign),
}

impl Cell {
    /// Returns the occupying mark, if any.
    pub fn sign(self) -> Option<Sign> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(sign) => Some(sign),
        }
    }
}

/// Rejection raised by the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Index outside 0..=8.
    #[display("Square index {} is out of range (must be 0-8)", _0)]
    InvalidIndex(#[error(not(source))] usize),
    /// Square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given index (0-8).
    pub fn get_cell(&self, index: usize) -> Result<Cell, BoardError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(BoardError::InvalidIndex(index))
    }

    /// Places a mark on an empty square.
    ///
    /// The board refuses to overwrite a mark even though the engine checks
    /// emptiness before calling.
    #[instrument(skip(self))]
    pub fn set_cell(&mut self, index: usize, sign: Sign) -> Result<(), BoardError> {
        match self.get_cell(index)? {
            Cell::Empty => {
                self.cells[index] = Cell::Occupied(sign);
                Ok(())
            }
            Cell::Occupied(_) => Err(BoardError::CellOccupied(index)),
        }
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Cell::Empty))
    }

    /// Checks if a square holds the given mark.
    pub fn occupied_by(&self, index: usize, sign: Sign) -> bool {
        matches!(self.cells.get(index), Some(Cell::Occupied(s)) if *s == sign)
    }

    /// Number of squares holding a mark.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Clears every square.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; BOARD_SIZE];
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.cells[pos] {
                    Cell::Empty => write!(f, "{}", pos + 1)?,
                    Cell::Occupied(sign) => write!(f, "{}", sign)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
