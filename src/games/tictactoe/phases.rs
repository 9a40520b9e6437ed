//! Lifecycle phase and result of a match.

use serde::{Deserialize, Serialize};

/// Where a match is in its lifecycle.
///
/// `NotStarted -> InProgress -> Ended`; only a reset goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Fresh board, waiting for the player's first move.
    #[display("Not started")]
    NotStarted,
    /// At least one move played, no result yet.
    #[display("In progress")]
    InProgress,
    /// Someone won or the board filled up.
    #[display("Ended")]
    Ended,
}

/// Outcome of a match.
///
/// `Undetermined` until the match ends; set exactly once per match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameResult {
    /// The human completed a line.
    #[display("Player won")]
    PlayerWon,
    /// The computer completed a line.
    #[display("Computer won")]
    ComputerWon,
    /// Board full, no line.
    #[display("Tie")]
    Tie,
    /// Match still open.
    #[default]
    #[display("")]
    Undetermined,
}

impl GameResult {
    /// Returns true once the result decides the match.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::Undetermined)
    }

    /// Text shown to the user, `None` while undetermined.
    pub fn display_text(&self) -> Option<&'static str> {
        match self {
            GameResult::PlayerWon => Some("Player won"),
            GameResult::ComputerWon => Some("Computer won"),
            GameResult::Tie => Some("Tie"),
            GameResult::Undetermined => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_text() {
        assert_eq!(GameResult::PlayerWon.to_string(), "Player won");
        assert_eq!(GameResult::ComputerWon.to_string(), "Computer won");
        assert_eq!(GameResult::Tie.to_string(), "Tie");
        assert_eq!(GameResult::Undetermined.to_string(), "");
        assert_eq!(GameResult::Undetermined.display_text(), None);
    }

    #[test]
    fn test_only_undetermined_is_open() {
        assert!(!GameResult::Undetermined.is_terminal());
        assert!(GameResult::Tie.is_terminal());
        assert!(GameResult::PlayerWon.is_terminal());
    }
}
