//! Static position evaluation.

use chess::{Board, Color, Piece};

/// Scores a board from white's point of view: positive is good for white,
/// negative is good for black.
pub trait Evaluator: Send + Sync {
    /// Evaluates the board.
    fn evaluate(&self, board: &Board) -> f32;
}

/// Material count: pawn 1, knight 3, bishop 3, rook 5, queen 9, king 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEval;

const PIECE_VALUES: [(Piece, i32); 6] = [
    (Piece::Pawn, 1),
    (Piece::Knight, 3),
    (Piece::Bishop, 3),
    (Piece::Rook, 5),
    (Piece::Queen, 9),
    (Piece::King, 100),
];

impl Evaluator for PointsEval {
    fn evaluate(&self, board: &Board) -> f32 {
        let white = *board.color_combined(Color::White);
        let black = *board.color_combined(Color::Black);

        let points: i32 = PIECE_VALUES
            .iter()
            .map(|&(piece, value)| {
                let pieces = *board.pieces(piece);
                let diff = (pieces & white).popcnt() as i32 - (pieces & black).popcnt() as i32;
                diff * value
            })
            .sum();

        points as f32
    }
}
