//! Command-line interface for the terminal presenter.

use clap::Parser;
use std::path::PathBuf;
use tictactoe_engine::Position;

/// Tic-tac-toe against a heuristic computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML engine config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Delay before the computer replies, in milliseconds (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the computer's random choices (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Mark a cell.
    Play(Position),
    /// Start over.
    Reset,
    /// Leave the game.
    Quit,
    /// Print the command list.
    Help,
}

/// Parses a line typed at the prompt.
pub fn parse_input(line: &str) -> Option<Input> {
    match line.trim().to_lowercase().as_str() {
        "r" | "reset" => Some(Input::Reset),
        "q" | "quit" | "exit" => Some(Input::Quit),
        "h" | "help" | "?" => Some(Input::Help),
        other => Position::from_label_or_number(other).map(Input::Play),
    }
}

/// Help text for the prompt.
pub const HELP: &str = "Type a cell (1-9 or a name like \"center\"), r to reset, q to quit.";
