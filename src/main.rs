//! Terminal presenter for the tic-tac-toe engine.
//!
//! Reads cells from stdin and redraws the board from the engine's signals.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, HELP, Input, parse_input};
use tictactoe_engine::{EngineConfig, GameEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let engine = GameEngine::new(&config);

    let renderer = tokio::spawn(render(engine.clone()));
    let result = read_input(&engine).await;
    renderer.abort();
    result
}

/// Loads the config file (if any) and applies flag overrides.
#[instrument(skip_all)]
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(delay_ms) = cli.delay_ms {
        config = config.with_computer_delay_ms(delay_ms);
    }
    if let Some(seed) = cli.seed {
        config = config.with_rng_seed(Some(seed));
    }

    debug!(?config, "Resolved engine config");
    Ok(config)
}

/// Redraws whenever the board changes and announces computer moves.
async fn render(engine: GameEngine) {
    let mut board = engine.signals().board_changed();
    let mut computer = engine.signals().computer_move_chosen();

    board.mark_changed();
    loop {
        tokio::select! {
            changed = board.changed() => {
                if changed.is_err() {
                    return;
                }
                let snapshot = board.borrow_and_update().clone();
                println!("\n{}\n\n{}", snapshot, engine.status_text());
            }
            chosen = computer.recv() => match chosen {
                Ok(position) => println!("Computer played {}", position),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Renderer lagged"),
                Err(RecvError::Closed) => return,
            },
        }
    }
}

/// Feeds stdin lines to the engine until quit or end of input.
async fn read_input(engine: &GameEngine) -> Result<()> {
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_input(&line) {
            Some(Input::Play(position)) => engine.request_move(position.cell_id()),
            Some(Input::Reset) => engine.reset_game(),
            Some(Input::Quit) => break,
            Some(Input::Help) => println!("{}", HELP),
            None => println!("Unknown input {:?}. {}", line.trim(), HELP),
        }
    }

    info!(result = %engine.game_result_text(), "Leaving game");
    Ok(())
}
