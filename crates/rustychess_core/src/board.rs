//! Plain-text board diagrams.

use super::square::Square;
use super::state::{GameState, PieceKind, Side};

/// Glyph set used by [`render_board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardStyle {
    /// FEN letters (`K`, `q`, ...).
    #[default]
    Ascii,
    /// Unicode chess symbols.
    Unicode,
}

/// Formats the position as an 8x8 diagram with file and rank labels.
///
/// Rank 8 is at the top unless `flipped`, which draws the board from black's
/// side.
pub fn render_board(state: &GameState, style: BoardStyle, flipped: bool) -> String {
    let ranks: Vec<u8> = if flipped {
        (0..8).collect()
    } else {
        (0..8).rev().collect()
    };
    let files: Vec<u8> = if flipped {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };

    let mut out = String::new();
    for &rank in &ranks {
        out.push(char::from(b'1' + rank));
        out.push(' ');
        for &file in &files {
            let glyph = Square::new(file, rank)
                .and_then(|square| state.piece_at(square))
                .map(|(side, piece)| glyph(side, piece, style))
                .unwrap_or('.');
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for &file in &files {
        out.push(' ');
        out.push(char::from(b'a' + file));
    }
    out
}

fn glyph(side: Side, piece: PieceKind, style: BoardStyle) -> char {
    match style {
        BoardStyle::Ascii => piece.symbol(side),
        BoardStyle::Unicode => match (side, piece) {
            (Side::White, PieceKind::King) => '♔',
            (Side::White, PieceKind::Queen) => '♕',
            (Side::White, PieceKind::Rook) => '♖',
            (Side::White, PieceKind::Bishop) => '♗',
            (Side::White, PieceKind::Knight) => '♘',
            (Side::White, PieceKind::Pawn) => '♙',
            (Side::Black, PieceKind::King) => '♚',
            (Side::Black, PieceKind::Queen) => '♛',
            (Side::Black, PieceKind::Rook) => '♜',
            (Side::Black, PieceKind::Bishop) => '♝',
            (Side::Black, PieceKind::Knight) => '♞',
            (Side::Black, PieceKind::Pawn) => '♟',
        },
    }
}
