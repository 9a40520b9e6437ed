//! Synchronous match state machine.
//!
//! [`Game`] holds everything a single match needs (board, turn, lifecycle
//! flags, history) plus the reset epoch that outlives matches. It knows
//! nothing about timers or subscribers; [`crate::GameEngine`] wraps it.

use super::action::{Move, MoveError};
use super::phases::{GameResult, Phase};
use super::rules;
use super::{Board, Position, Side};
use tracing::{debug, info, instrument};

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// The move that was applied.
    pub applied: Move,
    /// True if this move took the match out of `NotStarted`.
    pub started: bool,
    /// Side holding the turn after the move.
    pub turn: Side,
    /// Result evaluated right after the move.
    pub result: GameResult,
}

impl MoveReport {
    /// True if the move ended the match.
    pub fn ended(&self) -> bool {
        self.result.is_terminal()
    }

    /// True if the computer should now reply.
    pub fn computer_to_move(&self) -> bool {
        !self.ended() && self.turn == Side::Computer
    }
}

/// Tic-tac-toe match state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Side,
    started: bool,
    result: GameResult,
    history: Vec<Move>,
    epoch: u64,
}

impl Game {
    /// Creates a new match with the player to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Side::Player,
            started: false,
            result: GameResult::Undetermined,
            history: Vec::new(),
            epoch: 0,
        }
    }

    /// Replays moves on a fresh match, stopping at the first rejection.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<Self, MoveError> {
        let mut game = Self::new();
        for mv in moves {
            game.apply(*mv)?;
        }
        Ok(game)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side holding the turn.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// True once the player has made the first move.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True once the match has a result.
    pub fn is_ended(&self) -> bool {
        self.result.is_terminal()
    }

    /// Returns the result, `Undetermined` while the match is open.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Moves applied in this match, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Current reset epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Lifecycle phase derived from the flags.
    pub fn phase(&self) -> Phase {
        if self.is_ended() {
            Phase::Ended
        } else if self.started {
            Phase::InProgress
        } else {
            Phase::NotStarted
        }
    }

    /// Empty cells in cell order.
    pub fn available_cells(&self) -> Vec<Position> {
        self.board.available()
    }

    /// Checks a move against the current state without applying it.
    pub fn validate(&self, mv: &Move) -> Result<(), MoveError> {
        if self.is_ended() {
            return Err(MoveError::GameOver);
        }
        if mv.side != self.turn {
            return Err(MoveError::WrongTurn(mv.side));
        }
        if !self.board.is_empty(mv.position) {
            return Err(MoveError::SquareOccupied(mv.position));
        }
        Ok(())
    }

    /// Applies a move.
    ///
    /// On `Err` nothing has changed. On success the cell is marked, the turn
    /// flips and the outcome is re-evaluated.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn apply(&mut self, mv: Move) -> Result<MoveReport, MoveError> {
        self.validate(&mv)?;

        self.board.set(mv.position, mv.side.mark());
        self.history.push(mv);
        self.turn = mv.side.opponent();

        let started = !self.started;
        if started {
            self.started = true;
            info!(first = %mv, "Game started");
        }

        self.result = rules::check_outcome(&self.board);
        if self.result.is_terminal() {
            info!(result = %self.result, moves = self.history.len(), "Game ended");
        } else {
            debug!(applied = %mv, turn = %self.turn, "Move applied");
        }

        Ok(MoveReport {
            applied: mv,
            started,
            turn: self.turn,
            result: self.result,
        })
    }

    /// Clears the match and bumps the epoch. Returns the new epoch.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn reset(&mut self) -> u64 {
        let epoch = self.epoch.wrapping_add(1);
        *self = Self {
            epoch,
            ..Self::new()
        };
        info!(epoch, "Game reset");
        epoch
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_player_move_starts_game() {
        let mut game = Game::new();
        assert_eq!(game.phase(), Phase::NotStarted);

        let report = game
            .apply(Move::new(Side::Player, Position::TopLeft))
            .expect("Valid move");

        assert!(report.started);
        assert!(report.computer_to_move());
        assert_eq!(game.phase(), Phase::InProgress);
        assert_eq!(game.turn(), Side::Computer);
    }

    #[test]
    fn test_computer_cannot_open() {
        let mut game = Game::new();
        let err = game
            .apply(Move::new(Side::Computer, Position::Center))
            .unwrap_err();
        assert_eq!(err, MoveError::WrongTurn(Side::Computer));
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_occupied_cell_rejected_without_change() {
        let mut game = Game::new();
        game.apply(Move::new(Side::Player, Position::Center)).unwrap();
        let before = game.clone();

        let err = game
            .apply(Move::new(Side::Computer, Position::Center))
            .unwrap_err();
        assert_eq!(err, MoveError::SquareOccupied(Position::Center));
        assert_eq!(game, before);
    }

    #[test]
    fn test_win_ends_game_and_blocks_further_moves() {
        let game = Game::replay(&[
            Move::new(Side::Player, Position::TopLeft),
            Move::new(Side::Computer, Position::Center),
            Move::new(Side::Player, Position::TopCenter),
            Move::new(Side::Computer, Position::BottomLeft),
            Move::new(Side::Player, Position::TopRight),
        ])
        .expect("Valid replay");

        assert_eq!(game.result(), GameResult::PlayerWon);
        assert_eq!(game.phase(), Phase::Ended);
        // Turn still flips on the winning move.
        assert_eq!(game.turn(), Side::Computer);

        let mut game = game;
        let err = game
            .apply(Move::new(Side::Computer, Position::BottomRight))
            .unwrap_err();
        assert_eq!(err, MoveError::GameOver);
    }

    #[test]
    fn test_reset_clears_match_and_bumps_epoch() {
        let mut game = Game::new();
        game.apply(Move::new(Side::Player, Position::Center)).unwrap();

        let epoch = game.reset();

        assert_eq!(epoch, 1);
        assert_eq!(game.epoch(), 1);
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.turn(), Side::Player);
        assert!(!game.is_started());
        assert!(!game.is_ended());
        assert!(game.history().is_empty());
        assert_eq!(game.available_cells().len(), 9);
    }
}
