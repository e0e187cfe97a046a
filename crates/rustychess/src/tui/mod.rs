//! Terminal UI for RustyChess.

mod app;
mod input;
mod ui;

use anyhow::Result;
use app::{App, Intent};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rustychess::{AppConfig, SessionController, SessionEvent};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, error, info, instrument, warn};

/// File the TUI logs to, so log lines do not corrupt the screen.
const LOG_FILE: &str = "rustychess_tui.log";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Sets up logging to [`LOG_FILE`].
pub fn init_tracing() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(crate::env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the terminal client until the user quits.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    info!("Starting RustyChess TUI");

    let session = crate::build_session(&config)?;
    let mut events = session.subscribe();
    let mut app = App::new(session.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &session, &mut events).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    info!(plies = session.history().len(), "TUI closed");
    Ok(())
}

/// Draw, drain session events, read one key; repeat.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    session: &SessionController,
    events: &mut broadcast::Receiver<SessionEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        loop {
            match events.try_recv() {
                Ok(event) => app.handle_event(event),
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(missed, "Session events lagged, resyncing");
                    app.resync();
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.handle_key(key.code) {
                        Some(Intent::Submit(candidate)) => {
                            debug!(mv = %candidate, "Submitting move");
                            let session = session.clone();
                            // Failures arrive as session events.
                            tokio::spawn(async move {
                                let _ = session.submit_human_move(candidate).await;
                            });
                        }
                        Some(Intent::Retry) => {
                            let session = session.clone();
                            tokio::spawn(async move {
                                let _ = session.retry_engine_move().await;
                            });
                        }
                        None => {}
                    }
                }
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
