//! Game engine shared by every presentation component.

use crate::config::EngineConfig;
use crate::games::tictactoe::{
    Board, Choice, Game, GameResult, HeuristicOpponent, Move, MoveError, MoveReport, Phase,
    Position, Side,
};
use crate::signals::Signals;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Point-in-time copy of the engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// The board.
    pub board: Board,
    /// Side to move.
    pub turn: Side,
    /// Lifecycle phase.
    pub phase: Phase,
    /// True once the player has moved.
    pub started: bool,
    /// True once the match has a result.
    pub ended: bool,
    /// Match result.
    pub result: GameResult,
    /// Cell ids (1-9) still open.
    pub available: Vec<u8>,
    /// Moves applied this match.
    pub history: Vec<Move>,
    /// Reset epoch.
    pub epoch: u64,
}

#[derive(Debug)]
struct EngineInner {
    game: Game,
    opponent: HeuristicOpponent,
    pending: Option<JoinHandle<()>>,
}

/// Tic-tac-toe engine: human player versus the heuristic computer.
///
/// Cloning is cheap and every clone drives the same match. Construct one
/// engine and hand clones to each consumer.
///
/// When a move hands the turn to the computer, the engine spawns a task on
/// the current tokio runtime that waits [`EngineConfig::computer_delay`]
/// and then calls [`GameEngine::computer_play`] with the reset epoch
/// captured at scheduling time. A reset bumps the epoch, so a reply that
/// wakes after a reset does nothing.
#[derive(Debug, Clone)]
pub struct GameEngine {
    inner: Arc<Mutex<EngineInner>>,
    signals: Arc<Signals>,
    delay: Duration,
}

impl GameEngine {
    /// Creates an engine from configuration.
    #[instrument(skip(config), fields(delay_ms = config.computer_delay_ms(), seed = ?config.rng_seed()))]
    pub fn new(config: &EngineConfig) -> Self {
        let opponent = match config.rng_seed() {
            Some(seed) => HeuristicOpponent::with_seed(*seed),
            None => HeuristicOpponent::new(),
        };
        info!("Creating game engine");
        Self {
            inner: Arc::new(Mutex::new(EngineInner {
                game: Game::new(),
                opponent,
                pending: None,
            })),
            signals: Arc::new(Signals::new()),
            delay: config.computer_delay(),
        }
    }

    /// Subscription side of the engine.
    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        // Every mutation finishes before anything that could panic, so a
        // poisoned lock still guards a consistent match.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Player clicked a cell (1-9).
    ///
    /// Invalid requests are ignored: no state change, no events.
    #[instrument(skip(self))]
    pub fn request_move(&self, cell_id: u8) {
        let result = Position::from_cell_id(cell_id)
            .ok_or(MoveError::InvalidCell(cell_id))
            .and_then(|position| self.apply_move(position, Side::Player));

        if let Err(e) = result {
            debug!(cell_id, error = %e, "Ignoring move request");
        }
    }

    /// Applies a move for `side`.
    ///
    /// On `Err` nothing changed and nothing was published. On success the
    /// new state is published and, if the computer is now to move, its
    /// reply is scheduled.
    #[instrument(skip(self))]
    pub fn apply_move(&self, position: Position, side: Side) -> Result<MoveReport, MoveError> {
        let mut inner = self.lock();
        let report = inner.game.apply(Move::new(side, position))?;
        self.signals.publish_move(&report, inner.game.board());

        if report.computer_to_move() {
            self.schedule_computer(&mut inner);
        }
        Ok(report)
    }

    fn schedule_computer(&self, inner: &mut EngineInner) {
        let epoch = inner.game.epoch();
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(epoch, error = %e, "No tokio runtime, computer reply not scheduled");
                return;
            }
        };

        let engine = self.clone();
        let delay = self.delay;
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            engine.computer_play(epoch);
        });

        if let Some(previous) = inner.pending.replace(task) {
            previous.abort();
        }
        debug!(epoch, delay_ms = delay.as_millis() as u64, "Computer reply scheduled");
    }

    /// Runs the computer's reply for the match identified by `epoch`.
    ///
    /// Does nothing (and returns `None`) if the epoch is stale, the match
    /// has ended, or it is not the computer's turn.
    #[instrument(skip(self))]
    pub fn computer_play(&self, epoch: u64) -> Option<Choice> {
        let mut inner = self.lock();
        if inner.game.epoch() != epoch {
            debug!(live_epoch = inner.game.epoch(), "Discarding stale computer reply");
            return None;
        }
        if inner.game.is_ended() || inner.game.turn() != Side::Computer {
            debug!(turn = %inner.game.turn(), ended = inner.game.is_ended(), "Computer has nothing to play");
            return None;
        }
        inner.pending = None;

        let board = inner.game.board().clone();
        let choice = inner.opponent.choose(&board)?;
        let report = match inner.game.apply(Move::new(Side::Computer, choice.position)) {
            Ok(report) => report,
            Err(e) => {
                warn!(position = %choice.position, error = %e, "Computer chose an illegal cell");
                return None;
            }
        };

        self.signals.publish_move(&report, inner.game.board());
        self.signals.publish_computer_move(choice.position);
        info!(position = %choice.position, reason = %choice.reason, "Computer moved");
        Some(choice)
    }

    /// Plays the computer's reply now instead of waiting for the timer.
    pub fn play_computer_turn(&self) -> Option<Choice> {
        let epoch = {
            let mut inner = self.lock();
            if let Some(task) = inner.pending.take() {
                task.abort();
            }
            inner.game.epoch()
        };
        self.computer_play(epoch)
    }

    /// Starts a fresh match and cancels any pending computer reply.
    #[instrument(skip(self))]
    pub fn reset_game(&self) {
        let mut inner = self.lock();
        if let Some(task) = inner.pending.take() {
            task.abort();
        }
        let epoch = inner.game.reset();
        self.signals.publish_reset(epoch);
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        self.lock().game.turn()
    }

    /// Copy of the board.
    pub fn board(&self) -> Board {
        self.lock().game.board().clone()
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.lock().game.phase()
    }

    /// True once the player has moved.
    pub fn is_game_started(&self) -> bool {
        self.lock().game.is_started()
    }

    /// True once the match has a result.
    pub fn is_game_ended(&self) -> bool {
        self.lock().game.is_ended()
    }

    /// Match result.
    pub fn game_result(&self) -> GameResult {
        self.lock().game.result()
    }

    /// Result text, empty while undetermined.
    pub fn game_result_text(&self) -> String {
        self.game_result().to_string()
    }

    /// Banner text: whose turn it is, or the result once ended.
    pub fn status_text(&self) -> String {
        let inner = self.lock();
        match inner.game.result().display_text() {
            Some(text) => text.to_string(),
            None => inner.game.turn().turn_text().to_string(),
        }
    }

    /// Open cells in cell order.
    pub fn available_cells(&self) -> Vec<Position> {
        self.lock().game.available_cells()
    }

    /// Moves applied this match.
    pub fn history(&self) -> Vec<Move> {
        self.lock().game.history().to_vec()
    }

    /// Current reset epoch.
    pub fn epoch(&self) -> u64 {
        self.lock().game.epoch()
    }

    /// Consistent copy of the whole state.
    pub fn snapshot(&self) -> EngineSnapshot {
        let inner = self.lock();
        let game = &inner.game;
        EngineSnapshot {
            board: game.board().clone(),
            turn: game.turn(),
            phase: game.phase(),
            started: game.is_started(),
            ended: game.is_ended(),
            result: game.result(),
            available: game.available_cells().iter().map(|p| p.cell_id()).collect(),
            history: game.history().to_vec(),
            epoch: game.epoch(),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::new(&EngineConfig::default().with_rng_seed(Some(1)))
    }

    #[test]
    fn test_without_runtime_computer_waits_for_manual_turn() {
        let engine = engine();
        engine.request_move(1);

        assert_eq!(engine.turn(), Side::Computer);
        let choice = engine.play_computer_turn().expect("Computer should move");
        assert_eq!(choice.position, Position::Center);
        assert_eq!(engine.turn(), Side::Player);
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn test_invalid_cell_ids_ignored() {
        let engine = engine();
        engine.request_move(0);
        engine.request_move(10);
        assert_eq!(engine.snapshot().available.len(), 9);
        assert!(!engine.is_game_started());
    }

    #[test]
    fn test_stale_epoch_is_discarded() {
        let engine = engine();
        engine.request_move(1);
        let stale = engine.epoch();

        engine.reset_game();
        engine.request_move(9);

        assert_eq!(engine.computer_play(stale), None);
        assert_eq!(engine.board().placed(), 1);
    }

    #[test]
    fn test_status_text_follows_turn() {
        let engine = engine();
        assert_eq!(engine.status_text(), "Your turn");
        engine.request_move(5);
        assert_eq!(engine.status_text(), "Opponent turn");
    }
}
