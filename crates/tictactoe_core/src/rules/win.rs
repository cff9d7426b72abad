//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Sign};
use tracing::instrument;

/// The eight winning lines, in evaluation order.
///
/// Rows top to bottom, columns left to right, then the two diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the index into [`LINES`] of the first line fully held by `sign`.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, sign: Sign) -> Option<usize> {
    LINES
        .iter()
        .position(|line| line.iter().all(|&i| board.occupied_by(i, sign)))
}

/// Finds an empty square that would give `sign` three in a line.
///
/// A line qualifies when it holds exactly two of `sign` and one empty
/// square. The first qualifying line in [`LINES`] order wins.
#[instrument(skip(board))]
pub fn completing_square(board: &Board, sign: Sign) -> Option<usize> {
    LINES.iter().find_map(|line| {
        let mut count = 0;
        let mut empty = None;
        for &i in line {
            if board.occupied_by(i, sign) {
                count += 1;
            } else if board.is_empty(i) {
                empty = Some(i);
            }
        }
        if count == 2 { empty } else { None }
    })
}
