//! Push-model messages and read-only views for the UI.

use super::error::SessionError;
use super::history::HistoryEntry;
use super::lifecycle::EngineStatus;
use derive_getters::Getters;
use rustychess_core::{GameState, Move, Outcome};

/// Whether the session accepts human moves.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionStatus {
    /// The human is on move.
    #[display("your move")]
    Playable,
    /// The engine owes a reply after a failure; retry to continue.
    #[display("waiting for engine retry ({})", reason)]
    AwaitingEngine {
        /// Why the last reply failed.
        reason: String,
    },
    /// The session stopped after an engine failure.
    #[display("halted ({})", reason)]
    Halted {
        /// Why the session stopped.
        reason: String,
    },
    /// The game has ended.
    #[display("game over: {}", _0)]
    Finished(Outcome),
}

impl SessionStatus {
    /// Whether a human move would be considered.
    pub fn is_playable(&self) -> bool {
        matches!(self, SessionStatus::Playable)
    }
}

/// Result of a successful human submission.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CommittedTurn {
    /// The human's move.
    human_move: Move,
    /// The engine's reply; `None` when the human's move ended the game.
    engine_move: Option<Move>,
    /// Canonical position after the turn.
    state: GameState,
}

impl CommittedTurn {
    pub(crate) fn new(human_move: Move, engine_move: Option<Move>, state: GameState) -> Self {
        Self {
            human_move,
            engine_move,
            state,
        }
    }
}

/// Read-only snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SessionView {
    /// Canonical position.
    state: GameState,
    /// Session status.
    status: SessionStatus,
    /// Engine lifecycle status.
    engine: EngineStatus,
    /// Number of history entries.
    history_len: usize,
    /// Whether a turn is being processed.
    in_flight: bool,
}

impl SessionView {
    pub(crate) fn new(
        state: GameState,
        status: SessionStatus,
        engine: EngineStatus,
        history_len: usize,
        in_flight: bool,
    ) -> Self {
        Self {
            state,
            status,
            engine,
            history_len,
            in_flight,
        }
    }
}

/// Message pushed to subscribers after every lifecycle change, commit, or
/// failure.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The engine lifecycle moved.
    EngineStatusChanged(EngineStatus),
    /// The engine is computing a reply for `position`.
    EngineThinking {
        /// FEN the engine was given.
        position: String,
    },
    /// New entries were committed.
    Committed {
        /// Canonical position after the commit.
        state: GameState,
        /// Entries appended by this commit.
        entries: Vec<HistoryEntry>,
        /// Session status after the commit.
        status: SessionStatus,
    },
    /// An operation failed.
    Failed {
        /// Canonical position after the failure.
        state: GameState,
        /// What went wrong.
        error: SessionError,
    },
}
