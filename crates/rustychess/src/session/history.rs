//! Append-only move history.

use derive_getters::Getters;
use rustychess_core::{GameState, Move, PieceKind};
use serde::{Deserialize, Serialize};

/// Who made a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Actor {
    /// The person at the board.
    Human,
    /// The decision engine.
    Engine,
}

/// One applied move and the position it produced.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct HistoryEntry {
    /// Who moved.
    actor: Actor,
    /// The move applied.
    mv: Move,
    /// Position after the move.
    state: GameState,
}

impl HistoryEntry {
    /// Transcript line, e.g.
    /// `1. white (human) moved pawn from e2 to e4, rnbqkbnr/...`.
    pub fn describe(&self) -> String {
        let side = self.state.side_to_move().opponent();
        let piece = if self.mv.promotion.is_some() {
            Some(PieceKind::Pawn)
        } else {
            self.state.piece_at(self.mv.to).map(|(_, kind)| kind)
        };

        let mut line = format!("{}. {} ({}) moved ", self.state.ply(), side, self.actor);
        if let Some(piece) = piece {
            line.push_str(&format!("{} ", piece));
        }
        line.push_str(&format!("from {} to {}", self.mv.from, self.mv.to));
        if let Some(promotion) = self.mv.promotion {
            line.push_str(&format!(" promoting to {}", promotion));
        }
        line.push_str(&format!(", {}", self.state.position()));
        line
    }
}

/// Ordered record of applied moves. Entries are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no move has been applied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entries from index `from` onward; empty when `from` is past the end.
    pub fn tail(&self, from: usize) -> &[HistoryEntry] {
        self.entries.get(from..).unwrap_or(&[])
    }

    /// Lazy transcript. Clone the iterator to walk it again.
    pub fn transcript(&self) -> Transcript<'_> {
        Transcript {
            entries: self.entries.iter(),
        }
    }
}

/// Iterator over transcript lines of a [`HistoryLog`].
#[derive(Debug, Clone)]
pub struct Transcript<'a> {
    entries: std::slice::Iter<'a, HistoryEntry>,
}

impl Iterator for Transcript<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(HistoryEntry::describe)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Transcript<'_> {}
