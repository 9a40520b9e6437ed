//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// One of the two sides of a match.
///
/// A side is both the holder of the turn and the actor of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Side {
    /// The human player (X, always moves first).
    #[display("Player")]
    Player,
    /// The computer opponent (O).
    #[display("Computer")]
    Computer,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    /// Returns the mark this side places.
    pub fn mark(self) -> Mark {
        match self {
            Side::Player => Mark::Player,
            Side::Computer => Mark::Computer,
        }
    }

    /// Banner text shown while this side holds the turn.
    pub fn turn_text(self) -> &'static str {
        match self {
            Side::Player => "Your turn",
            Side::Computer => "Opponent turn",
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Player's mark (X).
    Player,
    /// Computer's mark (O).
    Computer,
}

impl Mark {
    /// Returns the side owning this mark, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Mark::Empty => None,
            Mark::Player => Some(Side::Player),
            Mark::Computer => Some(Side::Computer),
        }
    }

    /// Single-character symbol, `None` for an empty cell.
    pub fn symbol(self) -> Option<char> {
        match self {
            Mark::Empty => None,
            Mark::Player => Some('X'),
            Mark::Computer => Some('O'),
        }
    }
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        side.mark()
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order.
    cells: [Mark; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; 9],
        }
    }

    /// Gets the mark at the given position.
    pub fn get(&self, pos: Position) -> Mark {
        self.cells[pos.to_index()]
    }

    /// Sets the mark at the given position.
    pub fn set(&mut self, pos: Position, mark: Mark) {
        self.cells[pos.to_index()] = mark;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Mark::Empty
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Mark; 9] {
        &self.cells
    }

    /// Empty positions, in cell order.
    pub fn available(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Number of marks on the board.
    pub fn placed(&self) -> usize {
        self.cells.iter().filter(|m| **m != Mark::Empty).count()
    }

    /// Returns a copy of the board with `mark` placed at `pos`.
    pub fn with(&self, pos: Position, mark: Mark) -> Self {
        let mut next = self.clone();
        next.set(pos, mark);
        next
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their cell id so a user can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (idx, pos) in Position::ALL.iter().enumerate() {
            match self.get(*pos).symbol() {
                Some(symbol) => result.push(symbol),
                None => result.push_str(&pos.cell_id().to_string()),
            }
            let col = idx % 3;
            if col < 2 {
                result.push('|');
            } else if idx < 8 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Side::Player.opponent(), Side::Computer);
        assert_eq!(Side::Computer.opponent(), Side::Player);
    }

    #[test]
    fn test_marks_round_trip_sides() {
        assert_eq!(Mark::from(Side::Player).side(), Some(Side::Player));
        assert_eq!(Mark::from(Side::Computer).side(), Some(Side::Computer));
        assert_eq!(Mark::Empty.side(), None);
    }

    #[test]
    fn test_display_shows_cell_ids_for_empty_cells() {
        let mut board = Board::new();
        board.set(Position::Center, Mark::Player);
        board.set(Position::BottomRight, Mark::Computer);
        assert_eq!(board.display(), "1|2|3\n-+-+-\n4|X|6\n-+-+-\n7|8|O");
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with(Position::TopLeft, Mark::Computer);
        assert!(board.is_empty(Position::TopLeft));
        assert_eq!(next.get(Position::TopLeft), Mark::Computer);
        assert_eq!(next.placed(), 1);
    }
}
