//! Win detection logic for tic-tac-toe.

use super::super::{Board, Position, Side};
use tracing::instrument;

/// Every line that wins when filled by one side.
///
/// Scanned in order: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the side owning the first complete line found, `None`
/// otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Side> {
    for [a, b, c] in LINES {
        let mark = board.get(a);
        if mark == board.get(b) && mark == board.get(c) {
            if let Some(side) = mark.side() {
                return Some(side);
            }
        }
    }

    None
}

/// Returns true if `side` owns a complete line.
pub fn has_won(board: &Board, side: Side) -> bool {
    let mark = side.mark();
    LINES
        .iter()
        .any(|line| line.iter().all(|pos| board.get(*pos) == mark))
}

#[cfg(test)]
mod tests {
    use super::super::super::Mark;
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Mark::Player);
        board.set(Position::TopCenter, Mark::Player);
        board.set(Position::TopRight, Mark::Player);
        assert_eq!(check_winner(&board), Some(Side::Player));
        assert!(has_won(&board, Side::Player));
        assert!(!has_won(&board, Side::Computer));
    }

    #[test]
    fn test_winner_middle_column() {
        let mut board = Board::new();
        board.set(Position::TopCenter, Mark::Computer);
        board.set(Position::Center, Mark::Computer);
        board.set(Position::BottomCenter, Mark::Computer);
        assert_eq!(check_winner(&board), Some(Side::Computer));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        board.set(Position::TopRight, Mark::Computer);
        board.set(Position::Center, Mark::Computer);
        board.set(Position::BottomLeft, Mark::Computer);
        assert_eq!(check_winner(&board), Some(Side::Computer));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Mark::Player);
        board.set(Position::TopCenter, Mark::Computer);
        board.set(Position::TopRight, Mark::Player);
        assert_eq!(check_winner(&board), None);
    }
}
