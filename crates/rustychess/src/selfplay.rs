//! The engine plays both sides.

use anyhow::Result;
use rustychess::{Actor, AppConfig, HistoryEntry, HistoryLog};
use rustychess_core::{BoardStyle, MoveValidator, render_board};
use rustychess_engine::{EngineFactory, SearchEngineFactory};
use tracing::{info, instrument};

/// Plays up to `plies` engine moves from the configured start position,
/// printing the board after each one.
#[instrument(skip(config))]
pub async fn run(config: AppConfig, plies: u32) -> Result<()> {
    let rules = config.session().rules()?;
    let mut engine = SearchEngineFactory::new(config.engine().clone())
        .construct()
        .await?;

    let mut state = rules.initial();
    let mut history = HistoryLog::new();
    println!("{}", render_board(&state, BoardStyle::Unicode, false));

    for _ in 0..plies {
        if state.is_terminal() {
            break;
        }
        let mv = engine.select_move(state.position()).await?;
        state = rules.apply_move(&state, mv)?;
        history.append(HistoryEntry::new(Actor::Engine, mv, state.clone()));

        if let Some(line) = history.transcript().last() {
            println!("{}", line);
        }
        println!("{}", render_board(&state, BoardStyle::Unicode, false));
    }

    match state.outcome() {
        Some(outcome) => println!("Game over: {}", outcome),
        None => println!("Stopped after {} plies", history.len()),
    }
    info!(plies = history.len(), "Self-play finished");
    Ok(())
}
