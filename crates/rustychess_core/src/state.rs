//! Canonical game state snapshots.

use super::square::Square;
use serde::{Deserialize, Serialize};

/// Side (colour) in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// White (moves first in the standard array).
    White,
    /// Black.
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub(crate) fn from_chess(color: chess::Color) -> Self {
        match color {
            chess::Color::White => Side::White,
            chess::Color::Black => Side::Black,
        }
    }
}

/// Kind of chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Rook.
    Rook,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl PieceKind {
    /// FEN letter for this piece, uppercase for white and lowercase for black.
    pub fn symbol(self, side: Side) -> char {
        let letter = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::White => letter.to_ascii_uppercase(),
            Side::Black => letter,
        }
    }

    pub(crate) fn from_chess(piece: chess::Piece) -> Self {
        match piece {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Outcome {
    /// The side to move is mated.
    #[display("checkmate, {} wins", winner)]
    Checkmate {
        /// Side that delivered mate.
        winner: Side,
    },
    /// The side to move has no legal move and is not in check.
    #[display("stalemate")]
    Stalemate,
}

/// Immutable snapshot of the canonical position.
///
/// A `GameState` can only be produced by [`ChessRules`](crate::ChessRules),
/// so holding one proves the position is legal and reachable. Transitions
/// never mutate a snapshot; they return a new one.
#[derive(Clone)]
pub struct GameState {
    board: chess::Board,
    fen: String,
    ply: u32,
}

impl GameState {
    pub(crate) fn from_board(board: chess::Board, ply: u32) -> Self {
        Self {
            fen: board.to_string(),
            board,
            ply,
        }
    }

    pub(crate) fn board(&self) -> &chess::Board {
        &self.board
    }

    /// The position as a FEN string.
    pub fn position(&self) -> &str {
        &self.fen
    }

    /// Number of plies applied since the session's initial position.
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Side whose turn it is.
    pub fn side_to_move(&self) -> Side {
        Side::from_chess(self.board.side_to_move())
    }

    /// Piece standing on the square, with its owner.
    pub fn piece_at(&self, square: Square) -> Option<(Side, PieceKind)> {
        let sq = square.to_chess();
        let piece = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some((Side::from_chess(color), PieceKind::from_chess(piece)))
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.checkers().popcnt() > 0
    }

    /// Terminal outcome, if the side to move has no legal move.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.board.status() {
            chess::BoardStatus::Ongoing => None,
            chess::BoardStatus::Stalemate => Some(Outcome::Stalemate),
            chess::BoardStatus::Checkmate => Some(Outcome::Checkmate {
                winner: self.side_to_move().opponent(),
            }),
        }
    }

    /// Whether the game is over.
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Whether moving from `from` to `to` is a pawn reaching the last rank,
    /// which needs a promotion piece.
    pub fn requires_promotion(&self, from: Square, to: Square) -> bool {
        match self.piece_at(from) {
            Some((Side::White, PieceKind::Pawn)) => to.rank() == 7,
            Some((Side::Black, PieceKind::Pawn)) => to.rank() == 0,
            _ => false,
        }
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.fen == other.fen && self.ply == other.ply
    }
}

impl Eq for GameState {}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("position", &self.fen)
            .field("ply", &self.ply)
            .finish()
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fen)
    }
}
