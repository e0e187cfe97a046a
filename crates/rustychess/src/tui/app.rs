//! Application state and logic.

use super::input::move_cursor;
use crossterm::event::KeyCode;
use rustychess::{EngineStatus, SessionController, SessionEvent, SessionStatus, SessionView};
use rustychess_core::{Move, Side, Square};
use tracing::debug;

const WHITE_START: Square = match Square::new(4, 1) {
    Some(square) => square,
    None => panic!("e2 is on the board"),
};

const BLACK_START: Square = match Square::new(4, 6) {
    Some(square) => square,
    None => panic!("e7 is on the board"),
};

/// What the UI asks the session to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Submit the human's move.
    Submit(Move),
    /// Ask the engine again after a failed reply.
    Retry,
}

/// Main application state.
pub struct App {
    session: SessionController,
    cursor: Square,
    selected: Option<Square>,
    /// Inline, retryable notice (illegal move, busy, ...).
    notice: Option<String>,
    /// Session-level failure or game result.
    alert: Option<String>,
    transcript: Vec<String>,
    thinking: bool,
    should_quit: bool,
}

impl App {
    /// Creates the application for a session.
    pub fn new(session: SessionController) -> Self {
        let cursor = match session.human_side() {
            Side::White => WHITE_START,
            Side::Black => BLACK_START,
        };
        let transcript = session.history().transcript().collect();
        let mut app = Self {
            cursor,
            session,
            selected: None,
            notice: None,
            alert: None,
            transcript,
            thinking: false,
            should_quit: false,
        };
        match app.session.engine_status() {
            EngineStatus::Ready => {}
            EngineStatus::Failed(reason) => {
                app.handle_event(SessionEvent::EngineStatusChanged(EngineStatus::Failed(reason)))
            }
            EngineStatus::Uninitialized | EngineStatus::Loading => {
                app.notice = Some("Loading engine...".to_string());
            }
        }
        app
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Square {
        self.cursor
    }

    /// Origin square chosen for the pending move.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Whether the board is drawn from black's side.
    pub fn flipped(&self) -> bool {
        self.session.human_side() == Side::Black
    }

    /// Transcript lines, oldest first.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Current session snapshot.
    pub fn view(&self) -> SessionView {
        self.session.snapshot()
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Status line text.
    pub fn status_message(&self) -> String {
        if let Some(alert) = &self.alert {
            return alert.clone();
        }
        if self.thinking {
            return "Engine is thinking...".to_string();
        }
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        match self.selected {
            Some(from) => format!("Moving from {}. Select a destination (Esc to cancel).", from),
            None => format!("You play {}. Select a piece.", self.session.human_side()),
        }
    }

    /// Whether the status line shows a session-level failure.
    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }

    /// Handles a session event.
    pub fn handle_event(&mut self, event: SessionEvent) {
        debug!(?event, "Handling session event");

        match event {
            SessionEvent::EngineStatusChanged(EngineStatus::Ready) => {
                self.notice = None;
            }
            SessionEvent::EngineStatusChanged(EngineStatus::Failed(reason)) => {
                self.notice = None;
                self.alert = Some(format!("Engine failed to load: {}. Press q to quit.", reason));
            }
            SessionEvent::EngineStatusChanged(_) => {}
            SessionEvent::EngineThinking { .. } => {
                self.thinking = true;
            }
            SessionEvent::Committed {
                entries, status, ..
            } => {
                self.thinking = false;
                self.notice = None;
                self.transcript
                    .extend(entries.iter().map(|entry| entry.describe()));
                match status {
                    SessionStatus::Finished(outcome) => {
                        self.alert = Some(format!("Game over: {}. Press q to quit.", outcome));
                    }
                    SessionStatus::Playable => self.alert = None,
                    SessionStatus::AwaitingEngine { .. } | SessionStatus::Halted { .. } => {}
                }
            }
            SessionEvent::Failed { error, .. } => {
                self.thinking = false;
                if error.is_recoverable() {
                    self.notice = Some(error.to_string());
                } else {
                    let hint = match self.session.status() {
                        SessionStatus::AwaitingEngine { .. } => "Press r to retry.",
                        _ => "Press q to quit.",
                    };
                    self.alert = Some(format!("{} {}", error, hint));
                }
            }
        }
    }

    /// Rebuilds derived state after missing events.
    pub fn resync(&mut self) {
        let history = self.session.history();
        self.transcript
            .extend(history.tail(self.transcript.len()).iter().map(|entry| entry.describe()));
        self.thinking = self.session.is_in_flight();
    }

    /// Handles a key press, returning work for the session if any.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Intent> {
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => {
                matches!(self.session.status(), SessionStatus::AwaitingEngine { .. }).then(|| {
                    self.alert = None;
                    Intent::Retry
                })
            }
            KeyCode::Esc => {
                self.selected = None;
                self.notice = None;
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.select(),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key, self.flipped());
                None
            }
            _ => None,
        }
    }

    /// Picks the origin, or completes the move on the destination.
    fn select(&mut self) -> Option<Intent> {
        let state = self.session.current_state();

        let Some(from) = self.selected else {
            match state.piece_at(self.cursor) {
                Some((side, _)) if side == self.session.human_side() => {
                    self.selected = Some(self.cursor);
                    self.notice = None;
                }
                _ => self.notice = Some(format!("No piece of yours on {}", self.cursor)),
            }
            return None;
        };

        self.selected = None;
        if from == self.cursor {
            return None;
        }

        let mut candidate = Move::new(from, self.cursor);
        if state.requires_promotion(from, self.cursor) {
            candidate = candidate.with_promotion(*self.session.config().default_promotion());
        }
        debug!(mv = %candidate, "Move selected");
        Some(Intent::Submit(candidate))
    }
}
