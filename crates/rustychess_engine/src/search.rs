//! Negamax alpha-beta search with a capture extension.
//!
//! Nominal depth counts down to zero; below zero only captures are searched
//! until `capture_depth` plies past the horizon. Scores are relative to the
//! side to move at each node. Results are cached in a transposition table
//! keyed by the board's Zobrist hash.

use super::evaluator::Evaluator;
use chess::{Board, BoardStatus, CacheTable, ChessMove, Color, MoveGen};
use tracing::{debug, instrument};

/// Base score of a checkmate. Remaining depth is added so quicker mates win.
pub const MATE_SCORE: f32 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Bound {
    None,
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct TableEntry {
    depth: i32,
    score: f32,
    bound: Bound,
}

impl Default for TableEntry {
    fn default() -> Self {
        Self {
            depth: i32::MIN,
            score: 0.0,
            bound: Bound::None,
        }
    }
}

/// A move together with its score for the side that plays it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    /// The chosen move.
    pub chess_move: ChessMove,
    /// Score from the mover's point of view.
    pub score: f32,
}

/// A strategy that picks one move for the side to move.
pub trait MoveSearch: Send {
    /// Best move for the side to move in `board`, or `None` when it has no
    /// legal move.
    fn best_move(&mut self, board: &Board) -> Option<ScoredMove>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Score of a node that is not expanded, for its side to move.
///
/// Checkmate is worse the sooner it happens; `depth` is the remaining depth.
pub(crate) fn leaf_score(evaluator: &dyn Evaluator, board: &Board, depth: i32) -> f32 {
    match board.status() {
        BoardStatus::Checkmate => -(MATE_SCORE + depth as f32),
        BoardStatus::Stalemate => 0.0,
        BoardStatus::Ongoing => {
            let white = evaluator.evaluate(board);
            match board.side_to_move() {
                Color::White => white,
                Color::Black => -white,
            }
        }
    }
}

/// Alpha-beta searcher with its transposition table.
pub struct AlphaBeta {
    max_depth: i32,
    capture_depth: i32,
    evaluator: Box<dyn Evaluator>,
    cache: CacheTable<TableEntry>,
    nodes: u64,
}

impl std::fmt::Debug for AlphaBeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaBeta")
            .field("max_depth", &self.max_depth)
            .field("capture_depth", &self.capture_depth)
            .finish_non_exhaustive()
    }
}

impl AlphaBeta {
    /// Creates a searcher. `cache_entries` must be a power of two.
    pub fn new(
        max_depth: u8,
        capture_depth: u8,
        cache_entries: usize,
        evaluator: Box<dyn Evaluator>,
    ) -> Self {
        Self {
            max_depth: i32::from(max_depth),
            capture_depth: i32::from(capture_depth),
            evaluator,
            cache: CacheTable::new(cache_entries, TableEntry::default()),
            nodes: 0,
        }
    }

    /// Score of `board` for its side to move.
    fn score(&mut self, board: &Board, depth: i32, mut alpha: f32, mut beta: f32) -> f32 {
        self.nodes += 1;

        if let Some(entry) = self.cache.get(board.get_hash()) {
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                    Bound::None => {}
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        match self.search(board, depth, alpha, beta) {
            Some(best) => best.score,
            None => leaf_score(self.evaluator.as_ref(), board, depth),
        }
    }

    /// Searches the children of `board`. Returns `None` when no child was
    /// searched: past the capture horizon, no captures in the extension, or
    /// no legal moves at all.
    fn search(&mut self, board: &Board, depth: i32, alpha: f32, beta: f32) -> Option<ScoredMove> {
        if depth <= -self.capture_depth {
            return None;
        }

        let targets = *board.color_combined(!board.side_to_move());
        let mut captures = MoveGen::new_legal(board);
        captures.set_iterator_mask(targets);
        let moves: Box<dyn Iterator<Item = ChessMove>> = if depth <= 0 {
            Box::new(captures)
        } else {
            let mut quiet = MoveGen::new_legal(board);
            quiet.set_iterator_mask(!targets);
            Box::new(captures.chain(quiet))
        };

        let mut best: Option<ScoredMove> = None;
        let mut window = alpha;
        for chess_move in moves {
            let child = board.make_move_new(chess_move);
            let score = -self.score(&child, depth - 1, -beta, -window);

            if best.is_none_or(|b| score > b.score) {
                best = Some(ScoredMove { chess_move, score });
            }
            window = window.max(score);
            if window >= beta {
                break;
            }
        }

        if let Some(found) = best {
            let bound = if found.score <= alpha {
                Bound::Upper
            } else if found.score >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.cache.add(
                board.get_hash(),
                TableEntry {
                    depth,
                    score: found.score,
                    bound,
                },
            );
        }

        best
    }
}

impl MoveSearch for AlphaBeta {
    /// Searches at least one ply even when configured with depth 0.
    #[instrument(skip(self, board), fields(fen = %board))]
    fn best_move(&mut self, board: &Board) -> Option<ScoredMove> {
        self.nodes = 0;
        let depth = self.max_depth.max(1);
        let best = self.search(board, depth, f32::NEG_INFINITY, f32::INFINITY);
        debug!(nodes = self.nodes, ?best, "Search finished");
        best
    }

    fn name(&self) -> &'static str {
        "alpha-beta"
    }
}
