//! One-ply greedy search.

use super::evaluator::Evaluator;
use super::search::{MoveSearch, ScoredMove, leaf_score};
use chess::{Board, MoveGen};
use tracing::{debug, instrument};

/// Plays the move whose resulting position evaluates best, without looking
/// at the reply. Checkmate is recognised; ties keep the first move generated.
pub struct Greedy {
    evaluator: Box<dyn Evaluator>,
}

impl std::fmt::Debug for Greedy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Greedy").finish_non_exhaustive()
    }
}

impl Greedy {
    /// Creates a greedy searcher scoring positions with `evaluator`.
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self { evaluator }
    }
}

impl MoveSearch for Greedy {
    #[instrument(skip(self, board), fields(fen = %board))]
    fn best_move(&mut self, board: &Board) -> Option<ScoredMove> {
        let mut best: Option<ScoredMove> = None;
        for chess_move in MoveGen::new_legal(board) {
            let child = board.make_move_new(chess_move);
            let score = -leaf_score(self.evaluator.as_ref(), &child, 0);
            if best.is_none_or(|b| score > b.score) {
                best = Some(ScoredMove { chess_move, score });
            }
        }
        debug!(?best, "Greedy pick");
        best
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
