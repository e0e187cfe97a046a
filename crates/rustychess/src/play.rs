//! Line-mode play on stdin.

use anyhow::{Result, bail};
use rustychess::{AppConfig, EngineStatus, SessionController, SessionError, SessionStatus};
use rustychess_core::{BoardStyle, Move, Side, render_board};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

const HELP: &str = "Enter moves as e2e4 (e7e8q to promote). \
Other commands: moves, history, retry, help, quit.";

/// Runs a session driven by UCI moves typed on stdin.
#[instrument(skip_all)]
pub async fn run(config: AppConfig) -> Result<()> {
    let session = crate::build_session(&config)?;

    println!("Loading engine...");
    if let EngineStatus::Failed(reason) = session.wait_for_engine().await {
        bail!("Engine failed to load: {}", reason);
    }
    println!("You play {}. {}", session.human_side(), HELP);
    let mut shown = 0;
    print_position(&session, &mut shown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        debug!(line, "Read input");

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "moves" => {
                let moves: Vec<String> = session.legal_moves().iter().map(Move::to_string).collect();
                println!("{}", moves.join(" "));
            }
            "history" => {
                for line in session.history().transcript() {
                    println!("{}", line);
                }
            }
            "retry" => match session.retry_engine_move().await {
                Ok(_) => print_position(&session, &mut shown),
                Err(err) => report(&err),
            },
            text => match parse_move(&session, text) {
                Ok(candidate) => match session.submit_human_move(candidate).await {
                    Ok(turn) => {
                        match turn.engine_move() {
                            Some(reply) => println!("You: {}  Engine: {}", candidate, reply),
                            None => println!("You: {}", candidate),
                        }
                        print_position(&session, &mut shown);
                    }
                    Err(err) => {
                        report(&err);
                        if err.is_partial_commit() {
                            print_position(&session, &mut shown);
                        }
                    }
                },
                Err(message) => println!("{}", message),
            },
        }

        match session.status() {
            SessionStatus::Finished(outcome) => {
                println!("Game over: {}", outcome);
                break;
            }
            SessionStatus::Halted { reason } => {
                println!("Session halted: {}", reason);
                break;
            }
            SessionStatus::Playable | SessionStatus::AwaitingEngine { .. } => {}
        }
    }

    info!(plies = session.history().len(), "Line-mode session ended");
    Ok(())
}

/// Parses UCI text, filling in the configured promotion piece when a pawn
/// reaches the last rank without one.
fn parse_move(session: &SessionController, text: &str) -> Result<Move, String> {
    let candidate: Move = text.parse().map_err(|e| format!("{}. {}", e, HELP))?;
    let state = session.current_state();
    if candidate.promotion.is_none() && state.requires_promotion(candidate.from, candidate.to) {
        return Ok(candidate.with_promotion(*session.config().default_promotion()));
    }
    Ok(candidate)
}

/// Prints the board and the history entries committed since the last call.
fn print_position(session: &SessionController, shown: &mut usize) {
    let state = session.current_state();
    let flipped = session.human_side() == Side::Black;
    println!("{}", render_board(&state, BoardStyle::Unicode, flipped));

    let history = session.history();
    for entry in history.tail(*shown) {
        println!("{}", entry.describe());
    }
    *shown = history.len();
    if state.is_check() && !state.is_terminal() {
        println!("Check!");
    }
}

fn report(err: &SessionError) {
    if err.is_recoverable() {
        println!("{}", err);
    } else {
        println!("Error: {}", err);
    }
}
