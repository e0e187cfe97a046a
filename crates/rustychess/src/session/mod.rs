//! Turn-synchronized chess sessions.
//!
//! A session owns one canonical [`GameState`](rustychess_core::GameState),
//! one [`HistoryLog`], and one engine. Every human move is validated, answered
//! by the engine, validated again, and committed as a pair.

mod controller;
mod error;
mod events;
mod history;
pub mod invariants;
mod lifecycle;

pub use controller::SessionController;
pub use error::SessionError;
pub use events::{CommittedTurn, SessionEvent, SessionStatus, SessionView};
pub use history::{Actor, HistoryEntry, HistoryLog, Transcript};
pub use lifecycle::{EngineLifecycle, EngineStatus};
