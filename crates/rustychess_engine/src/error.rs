//! Engine error types.

/// Error raised while constructing an engine or selecting a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The position string handed to the engine did not parse.
    #[display("Engine could not read position: {}", _0)]
    InvalidPosition(String),

    /// The position has no legal move to choose.
    #[display("No move found")]
    NoLegalMoves,

    /// Engine construction failed.
    #[display("Engine construction failed: {}", _0)]
    Construction(String),

    /// The background worker running the engine failed.
    #[display("Engine worker failed: {}", _0)]
    Worker(String),
}

impl std::error::Error for EngineError {}

impl From<tokio::task::JoinError> for EngineError {
    fn from(err: tokio::task::JoinError) -> Self {
        EngineError::Worker(err.to_string())
    }
}
