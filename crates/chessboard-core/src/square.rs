//! Board square representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::NotationError;

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed row by row from the Black edge of the board:
/// - rank 0 is the row labelled "8", rank 7 the row labelled "1"
/// - file 0 is column "A", file 7 column "H"
/// - index = rank * 8 + file, so A8 = 0, H8 = 7, A1 = 56, H1 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    /// Creates a square from rank and file indices (each 0-7).
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the rank index (0 = the "8" edge).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the file index (0 = column "A").
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square shifted by the given rank and file deltas, or
    /// `None` if that would leave the board.
    #[inline]
    pub const fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        let rank = self.rank() as i8 + rank_delta;
        let file = self.file() as i8 + file_delta;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            return None;
        }
        Some(Square(rank as u8 * 8 + file as u8))
    }

    /// Parses a square from algebraic notation (e.g. "E4" or "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, NotationError> {
        let mut chars = s.chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(NotationError::InvalidLength(s.to_string()));
        };

        let file = match file_char.to_ascii_uppercase() {
            c @ 'A'..='H' => c as u8 - b'A',
            _ => return Err(NotationError::InvalidFile(file_char)),
        };
        let rank = match rank_char {
            c @ '1'..='8' => 8 - (c as u8 - b'0'),
            _ => return Err(NotationError::InvalidRank(rank_char)),
        };

        Ok(Square(rank * 8 + file))
    }

    /// Returns the algebraic notation for this square, uppercase file first
    /// (e.g. "E2").
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'A' + self.file()) as char, 8 - self.rank())
    }

    /// Iterates over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl TryFrom<u8> for Square {
    type Error = NotationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Square::from_index(index).ok_or(NotationError::IndexOutOfRange(index))
    }
}

impl From<Square> for u8 {
    fn from(sq: Square) -> Self {
        sq.0
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let e2 = Square::new(6, 4).unwrap();
        assert_eq!(e2.rank(), 6);
        assert_eq!(e2.file(), 4);
        assert_eq!(e2.index(), 52);
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("A8"), Ok(Square::new(0, 0).unwrap()));
        assert_eq!(Square::from_algebraic("E2"), Ok(Square::new(6, 4).unwrap()));
        assert_eq!(Square::from_algebraic("h1"), Ok(Square::new(7, 7).unwrap()));
        assert_eq!(
            Square::from_algebraic("I1"),
            Err(NotationError::InvalidFile('I'))
        );
        assert_eq!(
            Square::from_algebraic("A9"),
            Err(NotationError::InvalidRank('9'))
        );
        assert_eq!(
            Square::from_algebraic("A0"),
            Err(NotationError::InvalidRank('0'))
        );
        assert!(matches!(
            Square::from_algebraic(""),
            Err(NotationError::InvalidLength(_))
        ));
        assert!(matches!(
            Square::from_algebraic("E22"),
            Err(NotationError::InvalidLength(_))
        ));
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::new(0, 0).unwrap().to_algebraic(), "A8");
        assert_eq!(Square::new(7, 7).unwrap().to_algebraic(), "H1");
        assert_eq!(Square::new(4, 4).unwrap().to_algebraic(), "E4");
    }

    #[test]
    fn offset_stays_on_board() {
        let a8 = Square::new(0, 0).unwrap();
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(0, -1), None);
        assert_eq!(a8.offset(1, 1), Square::new(1, 1));
        let h1 = Square::new(7, 7).unwrap();
        assert_eq!(h1.offset(1, 0), None);
        assert_eq!(h1.offset(-2, -1), Square::new(5, 6));
    }

    #[test]
    fn all_covers_board_once() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_algebraic(), "A8");
        assert_eq!(squares[63].to_algebraic(), "H1");
    }

    #[test]
    fn serde_rejects_out_of_range_index() {
        let sq: Square = serde_json::from_str("52").unwrap();
        assert_eq!(sq.to_algebraic(), "E2");
        assert!(serde_json::from_str::<Square>("64").is_err());
        assert_eq!(serde_json::to_string(&sq).unwrap(), "52");
    }
}
