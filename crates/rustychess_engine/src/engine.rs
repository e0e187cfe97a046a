//! Decision engine seams.

use super::error::EngineError;
use rustychess_core::Move;

/// Trait for oracles that pick a move for a position.
#[async_trait::async_trait]
pub trait DecisionEngine: Send {
    /// Chooses exactly one move for the side to move in `position` (FEN).
    ///
    /// The returned move is not trusted: callers validate it before applying.
    async fn select_move(&mut self, position: &str) -> Result<Move, EngineError>;

    /// Returns the engine's display name.
    fn name(&self) -> &str;
}

/// Asynchronous constructor for a session's engine.
#[async_trait::async_trait]
pub trait EngineFactory: Send + Sync {
    /// Builds a new engine instance.
    async fn construct(&self) -> Result<Box<dyn DecisionEngine>, EngineError>;
}
