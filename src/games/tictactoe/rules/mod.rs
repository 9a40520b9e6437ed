//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. They never look at turn or lifecycle
//! state, so the heuristic can run them on hypothetical boards.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, has_won};

use super::{Board, GameResult, Side};
use tracing::instrument;

/// Evaluates the board into a [`GameResult`].
///
/// A complete line decides the game; otherwise a full board is a tie and
/// anything else is still undetermined.
#[instrument(skip(board))]
pub fn check_outcome(board: &Board) -> GameResult {
    match check_winner(board) {
        Some(Side::Player) => GameResult::PlayerWon,
        Some(Side::Computer) => GameResult::ComputerWon,
        None if is_full(board) => GameResult::Tie,
        None => GameResult::Undetermined,
    }
}
