//! Computer move selection.
//!
//! Priority, first match wins:
//! 1. Immediate win
//! 2. Block the player's immediate win
//! 3. Take the center
//! 4. Random empty cell
//!
//! Cells are scanned in cell order so the first two tiers are deterministic.

use super::rules::has_won;
use super::{Board, Position, Side};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which tier of the heuristic picked a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Reason {
    /// Completes a computer line.
    #[display("win")]
    Win,
    /// Occupies the cell the player needs to complete a line.
    #[display("block")]
    Block,
    /// Center was free.
    #[display("center")]
    Center,
    /// Uniform pick among the remaining cells.
    #[display("random")]
    Random,
}

/// A cell chosen by the heuristic and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    /// Cell to mark.
    pub position: Position,
    /// Tier that produced it.
    pub reason: Reason,
}

/// Returns the first empty cell that completes a line for `side`.
pub fn find_immediate_win(board: &Board, side: Side) -> Option<Position> {
    Position::valid_moves(board)
        .into_iter()
        .find(|pos| has_won(&board.with(*pos, side.mark()), side))
}

/// The computer's fixed-priority heuristic opponent.
#[derive(Debug, Clone)]
pub struct HeuristicOpponent {
    rng: StdRng,
}

impl HeuristicOpponent {
    /// Creates an opponent with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an opponent whose random tier replays deterministically.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks the computer's next cell.
    ///
    /// Returns `None` only when the board is full.
    #[instrument(skip(self, board))]
    pub fn choose(&mut self, board: &Board) -> Option<Choice> {
        let choice = if let Some(position) = find_immediate_win(board, Side::Computer) {
            Choice {
                position,
                reason: Reason::Win,
            }
        } else if let Some(position) = find_immediate_win(board, Side::Player) {
            Choice {
                position,
                reason: Reason::Block,
            }
        } else if board.is_empty(Position::Center) {
            Choice {
                position: Position::Center,
                reason: Reason::Center,
            }
        } else {
            let open = Position::valid_moves(board);
            let position = *open.choose(&mut self.rng)?;
            Choice {
                position,
                reason: Reason::Random,
            }
        };

        debug!(position = %choice.position, reason = %choice.reason, "Computer chose cell");
        Some(choice)
    }
}

impl Default for HeuristicOpponent {
    fn default() -> Self {
        Self::new()
    }
}
