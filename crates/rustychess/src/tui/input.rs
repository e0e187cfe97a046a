//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use rustychess_core::Square;

/// Moves the cursor one square with the arrow keys.
///
/// `flipped` is true when the board is drawn from black's side, so "up"
/// walks toward rank 1. The cursor stops at the board edge.
pub fn move_cursor(cursor: Square, key: KeyCode, flipped: bool) -> Square {
    let (files, ranks) = match key {
        KeyCode::Up => (0, 1),
        KeyCode::Down => (0, -1),
        KeyCode::Left => (-1, 0),
        KeyCode::Right => (1, 0),
        _ => return cursor,
    };
    let sign = if flipped { -1 } else { 1 };
    cursor.offset(files * sign, ranks * sign).unwrap_or(cursor)
}
