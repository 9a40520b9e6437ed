//! Tic-tac-toe engine: a human player against a heuristic computer.
//!
//! # Architecture
//!
//! - **Rules**: pure functions over a [`Board`] (win lines, full board, outcome)
//! - **Game**: synchronous match state machine ([`Game`])
//! - **Heuristic**: the computer's move choice ([`HeuristicOpponent`])
//! - **Engine**: shared handle with delayed computer replies ([`GameEngine`])
//! - **Signals**: replay-latest state channels and event streams ([`Signals`])
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_engine::{EngineConfig, GameEngine};
//!
//! # async fn example() {
//! let engine = GameEngine::new(&EngineConfig::default());
//! let mut turns = engine.signals().turn_changed();
//!
//! engine.request_move(1);
//! turns.changed().await.ok();
//! println!("{}", engine.status_text());
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod games;
mod signals;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};

// Crate-level exports - Engine
pub use engine::{EngineSnapshot, GameEngine};

// Crate-level exports - Signals
pub use signals::{ResetToken, Signals};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Choice, Game, GameResult, HeuristicOpponent, Mark, Move, MoveError, MoveReport, Phase,
    Position, Reason, Side,
};

/// Rule functions, usable on hypothetical boards.
pub mod rules {
    pub use crate::games::tictactoe::heuristic::find_immediate_win;
    pub use crate::games::tictactoe::rules::{LINES, check_outcome, check_winner, has_won, is_full};
}
