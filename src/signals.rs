//! Observable engine state.
//!
//! State fields use `watch` channels: a new subscriber immediately sees the
//! latest value. One-off events (computer choices, resets) use `broadcast`
//! channels and only reach receivers subscribed before the event.

use crate::games::tictactoe::{Board, GameResult, MoveReport, Position, Side};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::trace;

/// Capacity of the event streams before slow receivers start lagging.
const EVENT_CAPACITY: usize = 16;

/// Token emitted on every reset. Carries the new reset epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("reset #{}", _0)]
pub struct ResetToken(pub u64);

/// Publish side of every engine signal.
#[derive(Debug)]
pub struct Signals {
    turn: watch::Sender<Side>,
    game_started: watch::Sender<bool>,
    game_ended: watch::Sender<bool>,
    result: watch::Sender<GameResult>,
    board: watch::Sender<Board>,
    computer_move: broadcast::Sender<Position>,
    reset: broadcast::Sender<ResetToken>,
}

impl Signals {
    /// Creates signals holding the state of a fresh match.
    pub fn new() -> Self {
        Self {
            turn: watch::Sender::new(Side::Player),
            game_started: watch::Sender::new(false),
            game_ended: watch::Sender::new(false),
            result: watch::Sender::new(GameResult::Undetermined),
            board: watch::Sender::new(Board::new()),
            computer_move: broadcast::Sender::new(EVENT_CAPACITY),
            reset: broadcast::Sender::new(EVENT_CAPACITY),
        }
    }

    /// Side to move, replayed to late subscribers.
    pub fn turn_changed(&self) -> watch::Receiver<Side> {
        self.turn.subscribe()
    }

    /// Whether the player has opened the match.
    pub fn game_started_changed(&self) -> watch::Receiver<bool> {
        self.game_started.subscribe()
    }

    /// Whether the match has a result.
    pub fn game_ended_changed(&self) -> watch::Receiver<bool> {
        self.game_ended.subscribe()
    }

    /// Match result, `Undetermined` until the end.
    pub fn result_changed(&self) -> watch::Receiver<GameResult> {
        self.result.subscribe()
    }

    /// Full board after every accepted move or reset.
    pub fn board_changed(&self) -> watch::Receiver<Board> {
        self.board.subscribe()
    }

    /// Cells chosen by the computer, in order.
    pub fn computer_move_chosen(&self) -> broadcast::Receiver<Position> {
        self.computer_move.subscribe()
    }

    /// One token per reset.
    pub fn reset_signal(&self) -> broadcast::Receiver<ResetToken> {
        self.reset.subscribe()
    }

    /// Publishes the effect of an accepted move.
    ///
    /// The result is published before the ended flag so a subscriber
    /// reacting to `game_ended_changed` reads the final result.
    pub(crate) fn publish_move(&self, report: &MoveReport, board: &Board) {
        self.board.send_replace(board.clone());
        self.turn.send_replace(report.turn);
        if report.started {
            self.game_started.send_replace(true);
        }
        if report.ended() {
            self.result.send_replace(report.result);
            self.game_ended.send_replace(true);
        }
        trace!(turn = %report.turn, result = %report.result, "Published move");
    }

    /// Publishes the computer's chosen cell.
    pub(crate) fn publish_computer_move(&self, position: Position) {
        // No receivers is fine: nobody is rendering.
        let _ = self.computer_move.send(position);
    }

    /// Publishes a fresh match and the reset token.
    pub(crate) fn publish_reset(&self, epoch: u64) {
        self.board.send_replace(Board::new());
        self.turn.send_replace(Side::Player);
        self.game_started.send_replace(false);
        self.result.send_replace(GameResult::Undetermined);
        self.game_ended.send_replace(false);
        let _ = self.reset.send(ResetToken(epoch));
        trace!(epoch, "Published reset");
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Game, Move};

    #[test]
    fn test_late_subscriber_sees_latest_turn() {
        let signals = Signals::new();
        let mut game = Game::new();
        let report = game.apply(Move::new(Side::Player, Position::Center)).unwrap();

        signals.publish_move(&report, game.board());

        assert_eq!(*signals.turn_changed().borrow(), Side::Computer);
        assert!(*signals.game_started_changed().borrow());
        assert!(!*signals.game_ended_changed().borrow());
        assert_eq!(signals.board_changed().borrow().get(Position::Center), game.board().get(Position::Center));
    }

    #[test]
    fn test_reset_emits_token_and_clears_state() {
        let signals = Signals::new();
        let mut resets = signals.reset_signal();
        let mut game = Game::new();
        let report = game.apply(Move::new(Side::Player, Position::Center)).unwrap();
        signals.publish_move(&report, game.board());

        signals.publish_reset(1);

        assert_eq!(resets.try_recv().unwrap(), ResetToken(1));
        assert_eq!(*signals.turn_changed().borrow(), Side::Player);
        assert!(!*signals.game_started_changed().borrow());
        assert_eq!(*signals.board_changed().borrow(), Board::new());
    }

    #[test]
    fn test_events_do_not_replay() {
        let signals = Signals::new();
        signals.publish_computer_move(Position::Center);

        let mut late = signals.computer_move_chosen();
        assert!(late.try_recv().is_err());
    }
}
