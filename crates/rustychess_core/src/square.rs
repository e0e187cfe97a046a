//! Board squares in algebraic notation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A square on the 8x8 board, addressed by file (a-h) and rank (1-8).
///
/// Internally both coordinates are zero-based: `a1` is `(0, 0)` and
/// `h8` is `(7, 7)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from zero-based file and rank indices.
    ///
    /// Returns `None` when either index is off the board.
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Zero-based file index (0 = a).
    pub fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank index (0 = rank 1).
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the square shifted by the given file and rank deltas, if it
    /// stays on the board.
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        let file = i16::from(self.file) + i16::from(files);
        let rank = i16::from(self.rank) + i16::from(ranks);
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Self::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// Whether this is a light square (h1 is light).
    pub fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }

    pub(crate) fn to_chess(self) -> chess::Square {
        chess::Square::make_square(
            chess::Rank::from_index(usize::from(self.rank)),
            chess::File::from_index(usize::from(self.file)),
        )
    }

    pub(crate) fn from_chess(square: chess::Square) -> Self {
        Self {
            file: square.get_file().to_index() as u8,
            rank: square.get_rank().to_index() as u8,
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.file), self.rank + 1)
    }
}

/// Error produced when a square name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid square: {:?}", _0)]
pub struct SquareParseError(pub String);

impl std::error::Error for SquareParseError {}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        let [file, rank] = bytes else {
            return Err(SquareParseError(s.to_string()));
        };

        let file = file.to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(rank) {
            return Err(SquareParseError(s.to_string()));
        }

        Self::new(file - b'a', rank - b'1').ok_or_else(|| SquareParseError(s.to_string()))
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let square: Square = "e4".parse().expect("valid square");
        assert_eq!(square.file(), 4);
        assert_eq!(square.rank(), 3);
        assert_eq!(square.to_string(), "e4");
    }

    #[test]
    fn test_parse_rejects_off_board() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1: Square = "a1".parse().unwrap();
        assert_eq!(a1.offset(1, 1), "b2".parse().ok());
        assert_eq!(a1.offset(-1, 0), None);
    }

    #[test]
    fn test_chess_conversion_matches() {
        let square: Square = "g7".parse().unwrap();
        assert_eq!(Square::from_chess(square.to_chess()), square);
        assert_eq!(square.to_chess(), chess::Square::G7);
    }
}
