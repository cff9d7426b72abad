//! Rule-based opponent.
//!
//! The opponent never searches. It walks a fixed priority list and takes the
//! first square that matches:
//!
//! 1. a square that completes a line for itself (win)
//! 2. a square that completes a line for the human (block)
//! 3. the center
//! 4. the first free corner, in order 0, 2, 6, 8
//! 5. the first free edge, in order 1, 3, 5, 7

use crate::position::Position;
use crate::rules::{completing_square, is_full};
use crate::types::{Board, Sign};
use tracing::{debug, instrument};

/// Picks the opponent's next square, or `None` on a full board.
#[instrument(skip(board), fields(board = %board))]
pub fn select_move(board: &Board, ai: Sign, human: Sign) -> Option<Position> {
    if is_full(board) {
        debug!("No free square");
        return None;
    }

    if let Some(index) = completing_square(board, ai) {
        debug!(index, "Taking winning square");
        return Position::from_index(index);
    }

    if let Some(index) = completing_square(board, human) {
        debug!(index, "Blocking opponent line");
        return Position::from_index(index);
    }

    std::iter::once(Position::Center)
        .chain(Position::CORNERS)
        .chain(Position::EDGES)
        .find(|pos| board.is_empty(pos.to_index()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &str) -> Board {
        let mut board = Board::new();
        for (i, c) in marks.chars().enumerate() {
            match c {
                'X' => board.set_cell(i, Sign::X).unwrap(),
                'O' => board.set_cell(i, Sign::O).unwrap(),
                _ => {}
            }
        }
        board
    }

    #[test]
    fn test_takes_center_on_reply() {
        let board = board_from("X________");
        assert_eq!(select_move(&board, Sign::O, Sign::X), Some(Position::Center));
    }

    #[test]
    fn test_win_beats_block() {
        // Row 3-4-5 wins for O; row 6-7-8 would block X.
        let board = board_from("___OO_XX_");
        assert_eq!(
            select_move(&board, Sign::O, Sign::X),
            Some(Position::MiddleRight)
        );
    }

    #[test]
    fn test_block_beats_center() {
        let board = board_from("XX_______");
        assert_eq!(select_move(&board, Sign::O, Sign::X), Some(Position::TopRight));
    }

    #[test]
    fn test_corners_in_order_after_center() {
        let board = board_from("X___O____");
        assert_eq!(select_move(&board, Sign::O, Sign::X), Some(Position::TopRight));

        let board = board_from("X_O_X____");
        // X threatens 0-4-8; the block comes before any corner preference.
        assert_eq!(
            select_move(&board, Sign::O, Sign::X),
            Some(Position::BottomRight)
        );
    }

    #[test]
    fn test_edges_after_corners() {
        // Exercises the edge rule on its own. In an unfinished game with
        // center and corners taken, win or block always claims an edge first.
        let board = board_from("O_X_X_X_O");
        assert_eq!(select_move(&board, Sign::O, Sign::X), Some(Position::TopCenter));

        let board = board_from("OOX_X_X_O");
        assert_eq!(
            select_move(&board, Sign::O, Sign::X),
            Some(Position::MiddleLeft)
        );
    }

    #[test]
    fn test_own_line_checked_before_opponent_line() {
        // Row 6-7-8 for O appears after X's row 0-1-2 in line order, but the
        // opponent's own win is looked for first.
        let board = board_from("XX____OO_");
        assert_eq!(
            select_move(&board, Sign::O, Sign::X),
            Some(Position::BottomRight)
        );
    }

    #[test]
    fn test_edge_rule_preempted_in_unfinished_games() {
        // Every way of filling center and corners either completes a line or
        // leaves a side with two of one mark and an empty edge.
        for mask in 0u32..(1 << 5) {
            let mut board = Board::new();
            for (bit, index) in [4, 0, 2, 6, 8].into_iter().enumerate() {
                let sign = if mask & (1 << bit) == 0 { Sign::X } else { Sign::O };
                board.set_cell(index, sign).unwrap();
            }
            let finished = crate::rules::winning_line(&board, Sign::X).is_some()
                || crate::rules::winning_line(&board, Sign::O).is_some();
            let threat = completing_square(&board, Sign::O)
                .or_else(|| completing_square(&board, Sign::X));
            assert!(finished || threat.is_some(), "no threat on:\n{}", board);
            if !finished {
                let picked = select_move(&board, Sign::O, Sign::X);
                assert_eq!(picked.map(|p| p.to_index()), threat);
            }
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = board_from("XOXOXXOXO");
        assert_eq!(select_move(&board, Sign::O, Sign::X), None);
    }
}
