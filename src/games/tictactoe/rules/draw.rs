//! Full-board detection for tic-tac-toe.

use super::super::{Board, Mark};

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner is a tie.
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|m| *m != Mark::Empty)
}
