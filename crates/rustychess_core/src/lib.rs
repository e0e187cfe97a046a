//! Pure chess domain types for RustyChess.
//!
//! This crate is the rules authority of the system. It owns the value types
//! exchanged between the session controller, the oracle and the UI, and it is
//! the only place a [`GameState`] can be minted: the constructor is private to
//! the crate, so every canonical position has passed through a
//! [`MoveValidator`].
//!
//! # Architecture
//!
//! - **Square / Move**: plain value types with algebraic and UCI text forms
//! - **GameState**: immutable snapshot (FEN position, side to move, ply count)
//! - **MoveValidator**: trait seam for legality decisions, implemented by
//!   [`ChessRules`] on top of the `chess` crate
//! - **Board rendering**: plain-text diagrams for line-mode front ends

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod rules;
mod square;
mod state;

pub use action::{Move, MoveParseError, Promotion};
pub use board::{BoardStyle, render_board};
pub use rules::{ChessRules, MoveValidator, RejectionReason};
pub use square::{Square, SquareParseError};
pub use state::{GameState, Outcome, PieceKind, Side};
