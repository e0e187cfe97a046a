//! Session error types.

use super::lifecycle::EngineStatus;
use rustychess_core::{Move, Outcome, RejectionReason};

/// Failure of a session operation.
///
/// Only [`SessionError::EngineFailure`] and [`SessionError::EngineTimeout`]
/// leave a partial commit behind (the human half of the turn). Every other
/// variant means nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The human's move was refused by the rules.
    #[display("Illegal move: {}", _0)]
    IllegalMove(RejectionReason),

    /// The engine is still being built.
    #[display("Engine not ready ({})", _0)]
    EngineNotReady(EngineStatus),

    /// The engine could not be built. The session cannot continue.
    #[display("Engine failed to load: {}", _0)]
    EngineLoadFailure(String),

    /// The engine produced no usable reply. The human's move was kept.
    #[display("Engine failure: {}", reason)]
    EngineFailure {
        /// The rejected engine move, if the engine produced one.
        engine_move: Option<Move>,
        /// What went wrong.
        reason: String,
    },

    /// The engine did not reply in time. The human's move was kept.
    #[display("Engine did not reply within {}ms", millis)]
    EngineTimeout {
        /// Configured bound.
        millis: u64,
    },

    /// Another turn is being processed.
    #[display("A move is already being processed")]
    Busy,

    /// The session stopped after an engine failure.
    #[display("Session halted: {}", _0)]
    Halted(String),

    /// The engine owes a reply; call retry first.
    #[display("Waiting for the engine to reply")]
    AwaitingEngine,

    /// There is no failed engine reply to retry.
    #[display("Nothing to retry")]
    NothingToRetry,

    /// The game has ended.
    #[display("Game over: {}", _0)]
    GameOver(Outcome),
}

impl std::error::Error for SessionError {}

impl SessionError {
    /// True for inline notices the player can act on; false for
    /// session-level failures.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SessionError::IllegalMove(_)
                | SessionError::EngineNotReady(_)
                | SessionError::Busy
                | SessionError::AwaitingEngine
                | SessionError::NothingToRetry
        )
    }

    /// True when the human half of the turn was committed.
    pub fn is_partial_commit(&self) -> bool {
        matches!(
            self,
            SessionError::EngineFailure { .. } | SessionError::EngineTimeout { .. }
        )
    }
}
