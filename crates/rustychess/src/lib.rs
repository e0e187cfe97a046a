//! RustyChess: a human plays chess against an engine.
//!
//! # Architecture
//!
//! - **[`SessionController`]**: couples a rules-checked human move and an
//!   engine reply into one atomic turn. No illegal position ever becomes
//!   canonical and no half-applied turn is visible, except the documented
//!   partial commit when the engine fails.
//! - **[`EngineLifecycle`]**: readiness of the asynchronously built engine.
//! - **[`HistoryLog`]**: append-only record of every applied move.
//! - **[`AppConfig`]**: TOML configuration for the engine and the session.
//!
//! Rules and engines are consumed through the
//! [`MoveValidator`](rustychess_core::MoveValidator) and
//! [`DecisionEngine`](rustychess_engine::DecisionEngine) traits.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod session;

pub use config::{AppConfig, ConfigError, EngineFailurePolicy, SessionConfig};
pub use session::{
    Actor, CommittedTurn, EngineLifecycle, EngineStatus, HistoryEntry, HistoryLog, SessionController,
    SessionError, SessionEvent, SessionStatus, SessionView, Transcript,
};
