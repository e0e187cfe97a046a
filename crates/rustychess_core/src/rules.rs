//! Legality checking and position transitions.

use super::action::Move;
use super::square::Square;
use super::state::{GameState, Outcome, Side};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Why a candidate move was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RejectionReason {
    /// The position is already checkmate or stalemate.
    #[display("Game is already over ({})", _0)]
    GameOver(Outcome),

    /// There is no piece on the origin square.
    #[display("No piece on {}", _0)]
    EmptyOrigin(Square),

    /// The piece on the origin square belongs to the side not on move.
    #[display("The piece on {} belongs to {}, who is not on move", square, owner)]
    NotYourPiece {
        /// Origin square.
        square: Square,
        /// Owner of the piece on it.
        owner: Side,
    },

    /// A pawn reaching the last rank needs a promotion piece.
    #[display("Move {} needs a promotion piece", _0)]
    PromotionRequired(Move),

    /// The move breaks the rules of chess in this position.
    #[display("Move {} is not legal in this position", _0)]
    Illegal(Move),

    /// A position string could not be parsed.
    #[display("Invalid position: {}", _0)]
    InvalidPosition(String),
}

impl std::error::Error for RejectionReason {}

/// Rules authority: the sole source of legality decisions and position
/// transitions.
pub trait MoveValidator: Send + Sync {
    /// The position a new session starts from.
    fn initial(&self) -> GameState;

    /// Applies `mv` to `state`, returning the successor position or the reason
    /// the move is refused.
    fn apply_move(&self, state: &GameState, mv: Move) -> Result<GameState, RejectionReason>;

    /// Every legal move in `state`.
    fn legal_moves(&self, state: &GameState) -> Vec<Move>;
}

/// Standard chess rules backed by the `chess` crate.
#[derive(Debug, Clone)]
pub struct ChessRules {
    start: GameState,
}

impl ChessRules {
    /// Rules starting from the standard initial array, white to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            start: GameState::from_board(chess::Board::default(), 0),
        }
    }

    /// Rules starting from a custom FEN position.
    ///
    /// # Errors
    ///
    /// Returns [`RejectionReason::InvalidPosition`] if the FEN does not parse
    /// into a valid board.
    #[instrument]
    pub fn from_fen(fen: &str) -> Result<Self, RejectionReason> {
        let board = chess::Board::from_str(fen)
            .map_err(|e| RejectionReason::InvalidPosition(format!("{}: {}", fen, e)))?;
        debug!(fen, "Loaded custom start position");
        Ok(Self {
            start: GameState::from_board(board, 0),
        })
    }
}

impl Default for ChessRules {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveValidator for ChessRules {
    fn initial(&self) -> GameState {
        self.start.clone()
    }

    #[instrument(skip(self, state), fields(position = %state.position(), mv = %mv))]
    fn apply_move(&self, state: &GameState, mv: Move) -> Result<GameState, RejectionReason> {
        if let Some(outcome) = state.outcome() {
            return Err(RejectionReason::GameOver(outcome));
        }

        let to_move = state.side_to_move();
        match state.piece_at(mv.from) {
            None => return Err(RejectionReason::EmptyOrigin(mv.from)),
            Some((owner, _)) if owner != to_move => {
                return Err(RejectionReason::NotYourPiece {
                    square: mv.from,
                    owner,
                });
            }
            Some(_) => {}
        }

        let chess_move = mv.to_chess();
        if !state.board().legal(chess_move) {
            if mv.promotion.is_none() && state.requires_promotion(mv.from, mv.to) {
                let promoted = mv.with_promotion(Default::default());
                if state.board().legal(promoted.to_chess()) {
                    return Err(RejectionReason::PromotionRequired(mv));
                }
            }
            debug!("Move rejected by rules");
            return Err(RejectionReason::Illegal(mv));
        }

        let next = GameState::from_board(state.board().make_move_new(chess_move), state.ply() + 1);
        debug!(next = %next.position(), "Move applied");
        Ok(next)
    }

    fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        chess::MoveGen::new_legal(state.board())
            .map(Move::from)
            .collect()
    }
}
