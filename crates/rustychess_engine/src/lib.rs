//! Decision engines for RustyChess.
//!
//! The session controller consumes an engine only through the
//! [`DecisionEngine`] trait: a position goes in, exactly one move comes out.
//! Engines are built asynchronously by an [`EngineFactory`] because
//! construction can be expensive (the search engine allocates its
//! transposition table up front).
//!
//! The bundled oracle is [`SearchEngine`]. By default it runs a negamax
//! alpha-beta search with a capture extension and a transposition table; a
//! one-ply [`Greedy`] search can be configured instead. Both score positions
//! with a material evaluator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod evaluator;
mod greedy;
mod search;
mod search_engine;

pub use engine::{DecisionEngine, EngineFactory};
pub use error::EngineError;
pub use evaluator::{Evaluator, PointsEval};
pub use greedy::Greedy;
pub use search::{AlphaBeta, MATE_SCORE, MoveSearch, ScoredMove};
pub use search_engine::{SearchConfig, SearchEngine, SearchEngineFactory, SearchKind};
