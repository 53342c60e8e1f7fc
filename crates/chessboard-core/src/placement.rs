//! Piece-placement parsing and serialization.
//!
//! A placement string is the first field of a FEN record, optionally followed
//! by the side to move:
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w
//! ```
//!
//! The first row describes rank 0 (the row labelled "8"), uppercase letters
//! are White and digits count empty squares. Castling, en passant and move
//! counters are not part of this format.

use thiserror::Error;

use crate::{Color, PieceKind, Square};

/// Errors that can occur when parsing placement strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("invalid placement: expected 1 or 2 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),
}

/// A parsed piece placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Occupants indexed by `[rank][file]`.
    pub squares: [[Option<(PieceKind, Color)>; 8]; 8],
    /// Side to move (White when the string omits it).
    pub side_to_move: Color,
}

impl Placement {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

    /// Parses a placement string.
    pub fn parse(input: &str) -> Result<Self, PlacementError> {
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() || parts.len() > 2 {
            return Err(PlacementError::InvalidPartCount(parts.len()));
        }

        let squares = Self::parse_squares(parts[0])?;

        let side_to_move = match parts.get(1).copied() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(PlacementError::InvalidActiveColor(other.to_string())),
        };

        Ok(Placement {
            squares,
            side_to_move,
        })
    }

    fn parse_squares(placement: &str) -> Result<[[Option<(PieceKind, Color)>; 8]; 8], PlacementError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(PlacementError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut squares = [[None; 8]; 8];
        for (rank, row) in rows.iter().enumerate() {
            let mut file = 0usize;
            for c in row.chars() {
                let width = match c.to_digit(10) {
                    Some(d) if (1..=8).contains(&d) => d as usize,
                    Some(_) => {
                        return Err(PlacementError::InvalidPiecePlacement(format!(
                            "invalid empty-square count '{}' in rank {}",
                            c,
                            8 - rank
                        )))
                    }
                    None => 1,
                };
                if file + width > 8 {
                    return Err(PlacementError::InvalidPiecePlacement(format!(
                        "rank {} has more than 8 squares",
                        8 - rank
                    )));
                }
                if width == 1 && !c.is_ascii_digit() {
                    let Some(occupant) = PieceKind::from_placement_char(c) else {
                        return Err(PlacementError::InvalidPiecePlacement(format!(
                            "invalid character '{}' in rank {}",
                            c,
                            8 - rank
                        )));
                    };
                    squares[rank][file] = Some(occupant);
                }
                file += width;
            }
            if file != 8 {
                return Err(PlacementError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - rank,
                    file
                )));
            }
        }

        Ok(squares)
    }

    /// Returns the occupant of a square, if any.
    pub fn occupant(&self, sq: Square) -> Option<(PieceKind, Color)> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    /// Converts the placement back to a string, always including the side to move.
    pub fn to_placement_string(&self) -> String {
        let mut out = String::new();

        for (rank, row) in self.squares.iter().enumerate() {
            let mut empty_count = 0;
            for occupant in row {
                match occupant {
                    Some((kind, color)) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push(kind.to_placement_char(*color));
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if rank < 7 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(self.side_to_move.prefix());
        out
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
