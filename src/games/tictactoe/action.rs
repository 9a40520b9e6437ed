//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events: validated before application and kept in the
//! match history.

use super::{Position, Side};
use serde::{Deserialize, Serialize};

/// A move: a side placing its mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The side making the move.
    pub side: Side,
    /// The cell the side marks.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(side: Side, position: Position) -> Self {
        Self { side, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.position)
    }
}

/// Why a move was rejected.
///
/// A rejected move leaves the match untouched and publishes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Cell id outside 1-9.
    #[display("Cell {} does not exist", _0)]
    InvalidCell(#[error(not(source))] u8),

    /// The cell already holds a mark.
    #[display("{} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// The match has ended.
    #[display("Game is already over")]
    GameOver,

    /// The side tried to move while the other side holds the turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(#[error(not(source))] Side),
}
