//! Chess piece kinds.

use serde::{Deserialize, Serialize};

use crate::Color;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Returns the uppercase initial used in board symbols ('N' for knights).
    pub const fn initial(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Returns the placement character for this kind with the given color.
    ///
    /// White pieces are uppercase, Black pieces lowercase.
    pub const fn to_placement_char(self, color: Color) -> char {
        let c = self.initial();
        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a placement character into a kind and color.
    pub const fn from_placement_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }

    /// Returns the Unicode chess glyph for this kind with the given color.
    pub const fn glyph(self, color: Color) -> &'static str {
        match (color, self) {
            (Color::White, PieceKind::King) => "\u{2654}",
            (Color::White, PieceKind::Queen) => "\u{2655}",
            (Color::White, PieceKind::Rook) => "\u{2656}",
            (Color::White, PieceKind::Bishop) => "\u{2657}",
            (Color::White, PieceKind::Knight) => "\u{2658}",
            (Color::White, PieceKind::Pawn) => "\u{2659}",
            (Color::Black, PieceKind::King) => "\u{265a}",
            (Color::Black, PieceKind::Queen) => "\u{265b}",
            (Color::Black, PieceKind::Rook) => "\u{265c}",
            (Color::Black, PieceKind::Bishop) => "\u{265d}",
            (Color::Black, PieceKind::Knight) => "\u{265e}",
            (Color::Black, PieceKind::Pawn) => "\u{265f}",
        }
    }

    /// Returns true if this piece slides along rays (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[test]
    fn placement_chars() {
        assert_eq!(PieceKind::Pawn.to_placement_char(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.to_placement_char(Color::Black), 'p');
        assert_eq!(PieceKind::Knight.to_placement_char(Color::Black), 'n');
        assert_eq!(
            PieceKind::from_placement_char('K'),
            Some((PieceKind::King, Color::White))
        );
        assert_eq!(
            PieceKind::from_placement_char('q'),
            Some((PieceKind::Queen, Color::Black))
        );
        assert_eq!(PieceKind::from_placement_char('x'), None);
    }

    #[test]
    fn placement_char_roundtrip_for_every_kind() {
        for kind in KINDS {
            for color in Color::ALL {
                let c = kind.to_placement_char(color);
                assert_eq!(PieceKind::from_placement_char(c), Some((kind, color)));
            }
        }
    }

    #[test]
    fn glyphs_are_distinct_per_color() {
        assert_eq!(PieceKind::Rook.glyph(Color::White), "\u{2656}");
        assert_eq!(PieceKind::Rook.glyph(Color::Black), "\u{265c}");
        for kind in KINDS {
            assert_ne!(kind.glyph(Color::White), kind.glyph(Color::Black));
        }
    }

    #[test]
    fn is_slider() {
        assert!(!PieceKind::Pawn.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(PieceKind::Bishop.is_slider());
        assert!(PieceKind::Rook.is_slider());
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::King.is_slider());
    }

    #[test]
    fn display() {
        assert_eq!(PieceKind::Knight.to_string(), "Knight");
        assert_eq!(PieceKind::King.initial(), 'K');
        assert_eq!(PieceKind::Knight.initial(), 'N');
    }
}
