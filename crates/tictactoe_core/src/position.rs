//! Named squares of the tic-tac-toe board.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A position on the tic-tac-toe board (0-8, row-major).
///
/// ```text
/// [0][1][2]
/// [3][4][5]
/// [6][7][8]
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Corners in the order the opponent prefers them.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Edges in the order the opponent prefers them.
    pub const EDGES: [Position; 4] = [
        Position::TopCenter,
        Position::MiddleLeft,
        Position::MiddleRight,
        Position::BottomCenter,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses player input: a 1-based square number (1-9) or a label.
    ///
    /// Labels match case-insensitively and ignore `-`, `_` and spaces, so
    /// `"top left"`, `"top_left"` and `"Top-left"` are the same square.
    #[instrument]
    pub fn parse_input(s: &str) -> Option<Position> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return num.checked_sub(1).and_then(Self::from_index);
        }

        let wanted = normalize(s);
        if wanted.is_empty() {
            return None;
        }
        Position::iter().find(|pos| normalize(pos.label()) == wanted)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_covers_board() {
        for (i, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), i);
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_corner_and_edge_order() {
        let corners: Vec<_> = Position::CORNERS.iter().map(|p| p.to_index()).collect();
        let edges: Vec<_> = Position::EDGES.iter().map(|p| p.to_index()).collect();
        assert_eq!(corners, vec![0, 2, 6, 8]);
        assert_eq!(edges, vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_parse_input_numbers_are_one_based() {
        assert_eq!(Position::parse_input("1"), Some(Position::TopLeft));
        assert_eq!(Position::parse_input(" 9 "), Some(Position::BottomRight));
        assert_eq!(Position::parse_input("0"), None);
        assert_eq!(Position::parse_input("10"), None);
    }

    #[test]
    fn test_parse_input_labels() {
        assert_eq!(Position::parse_input("center"), Some(Position::Center));
        assert_eq!(Position::parse_input("Top left"), Some(Position::TopLeft));
        assert_eq!(
            Position::parse_input("bottom_center"),
            Some(Position::BottomCenter)
        );
        assert_eq!(Position::parse_input("middle"), None);
        assert_eq!(Position::parse_input(""), None);
    }
}
