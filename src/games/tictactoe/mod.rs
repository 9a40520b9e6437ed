//! Tic-tac-toe: human player versus a heuristic computer.

pub mod action;
pub mod game;
pub mod heuristic;
pub mod phases;
pub mod position;
pub mod rules;
pub mod types;

pub use action::{Move, MoveError};
pub use game::{Game, MoveReport};
pub use heuristic::{Choice, HeuristicOpponent, Reason};
pub use phases::{GameResult, Phase};
pub use position::Position;
pub use types::{Board, Mark, Side};
