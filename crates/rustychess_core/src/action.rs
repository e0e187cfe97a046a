//! First-class move values.
//!
//! A move is the player's intent, not a side effect. It carries no notion of
//! who is moving or whether it is legal; the [`MoveValidator`](crate::MoveValidator)
//! decides that against a concrete position.

use super::square::{Square, SquareParseError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Piece a pawn may promote to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Promotion {
    /// Promote to a queen.
    #[default]
    #[strum(to_string = "queen", serialize = "q")]
    Queen,
    /// Promote to a rook.
    #[strum(to_string = "rook", serialize = "r")]
    Rook,
    /// Promote to a bishop.
    #[strum(to_string = "bishop", serialize = "b")]
    Bishop,
    /// Promote to a knight.
    #[strum(to_string = "knight", serialize = "n")]
    Knight,
}

impl Promotion {
    /// Single-letter UCI suffix.
    pub fn letter(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }

    pub(crate) fn to_chess(self) -> chess::Piece {
        match self {
            Promotion::Queen => chess::Piece::Queen,
            Promotion::Rook => chess::Piece::Rook,
            Promotion::Bishop => chess::Piece::Bishop,
            Promotion::Knight => chess::Piece::Knight,
        }
    }

    pub(crate) fn from_chess(piece: chess::Piece) -> Option<Self> {
        match piece {
            chess::Piece::Queen => Some(Promotion::Queen),
            chess::Piece::Rook => Some(Promotion::Rook),
            chess::Piece::Bishop => Some(Promotion::Bishop),
            chess::Piece::Knight => Some(Promotion::Knight),
            chess::Piece::Pawn | chess::Piece::King => None,
        }
    }
}

/// A chess move: origin, destination, and an optional promotion piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Square the piece moves from.
    pub from: Square,
    /// Square the piece moves to.
    pub to: Square,
    /// Promotion piece, for pawns reaching the last rank.
    pub promotion: Option<Promotion>,
}

impl Move {
    /// Creates a move without promotion.
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Returns the same move with the given promotion piece.
    pub fn with_promotion(self, promotion: Promotion) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }

    pub(crate) fn to_chess(self) -> chess::ChessMove {
        chess::ChessMove::new(
            self.from.to_chess(),
            self.to.to_chess(),
            self.promotion.map(Promotion::to_chess),
        )
    }

    pub(crate) fn from_chess(mv: chess::ChessMove) -> Self {
        Self {
            from: Square::from_chess(mv.get_source()),
            to: Square::from_chess(mv.get_dest()),
            promotion: mv.get_promotion().and_then(Promotion::from_chess),
        }
    }
}

impl From<chess::ChessMove> for Move {
    fn from(mv: chess::ChessMove) -> Self {
        Self::from_chess(mv)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}

/// Error produced when UCI move text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveParseError {
    /// Text is not 4 or 5 characters long.
    #[display("Move {:?} must look like e2e4 or e7e8q", _0)]
    Malformed(String),

    /// A square component is invalid.
    #[display("{}", _0)]
    Square(SquareParseError),

    /// The promotion suffix is not one of q, r, b, n.
    #[display("Unknown promotion piece {:?}", _0)]
    Promotion(String),
}

impl std::error::Error for MoveParseError {}

impl From<SquareParseError> for MoveParseError {
    fn from(err: SquareParseError) -> Self {
        MoveParseError::Square(err)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses UCI long algebraic notation (`e2e4`, `e7e8q`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(MoveParseError::Malformed(s.to_string()));
        }

        let from: Square = s[0..2].parse()?;
        let to: Square = s[2..4].parse()?;
        let mut mv = Move::new(from, to);

        if s.len() == 5 {
            let promotion = s[4..]
                .parse::<Promotion>()
                .map_err(|_| MoveParseError::Promotion(s[4..].to_string()))?;
            mv = mv.with_promotion(promotion);
        }

        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uci_round_trip() {
        let mv: Move = "e7e8q".parse().expect("valid move");
        assert_eq!(mv.from.to_string(), "e7");
        assert_eq!(mv.to.to_string(), "e8");
        assert_eq!(mv.promotion, Some(Promotion::Queen));
        assert_eq!(mv.to_string(), "e7e8q");
    }

    #[test]
    fn test_malformed_moves_rejected() {
        assert!(matches!("e2".parse::<Move>(), Err(MoveParseError::Malformed(_))));
        assert!(matches!("z2e4".parse::<Move>(), Err(MoveParseError::Square(_))));
        assert!(matches!("e7e8k".parse::<Move>(), Err(MoveParseError::Promotion(_))));
    }

    #[test]
    fn test_promotion_parses_names_and_letters() {
        assert_eq!("knight".parse::<Promotion>().ok(), Some(Promotion::Knight));
        assert_eq!("N".parse::<Promotion>().ok(), Some(Promotion::Knight));
        assert_eq!(Promotion::Rook.to_string(), "rook");
    }

    #[test]
    fn test_moves_compare_by_value() {
        let a: Move = "g1f3".parse().unwrap();
        let b = Move::new("g1".parse().unwrap(), "f3".parse().unwrap());
        assert_eq!(a, b);
        assert_ne!(a, b.with_promotion(Promotion::Queen));
    }
}
