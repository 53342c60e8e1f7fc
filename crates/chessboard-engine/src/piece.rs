//! Pieces as they live on a [`Board`](crate::Board).

use chessboard_core::{Color, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// Index of a piece in its board's piece arena.
///
/// Ids are stable for the lifetime of a board (captured pieces keep theirs)
/// and are copied verbatim when the board is cloned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    /// Returns the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single chess piece.
///
/// Kind and owner are fixed at creation. The square, the moved flag and the
/// cached destination set change only through the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    owner: Color,
    square: Square,
    moved: bool,
    #[serde(skip)]
    moves: Vec<Square>,
}

impl Piece {
    /// Creates a piece standing on `square`.
    ///
    /// A pawn placed anywhere but its starting rank counts as already moved,
    /// so it never gets the two-square advance.
    pub fn new(kind: PieceKind, owner: Color, square: Square) -> Self {
        let moved = kind == PieceKind::Pawn && square.rank() != owner.pawn_rank();
        Piece {
            kind,
            owner,
            square,
            moved,
            moves: Vec::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn owner(&self) -> Color {
        self.owner
    }

    /// Returns the square the piece currently stands on (or stood on when
    /// it was captured).
    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// Returns true once the piece has left its initial square.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Returns the pseudo-legal destinations computed at the last board update.
    #[inline]
    pub fn moves(&self) -> &[Square] {
        &self.moves
    }

    /// Returns true if `sq` is among the cached destinations.
    pub fn is_potential_move(&self, sq: Square) -> bool {
        self.moves.contains(&sq)
    }

    /// Returns the two-character board symbol, e.g. "wP" or "bK".
    pub fn symbol(&self) -> String {
        format!("{}{}", self.owner.prefix(), self.kind.initial())
    }

    /// Returns the Unicode glyph for this piece.
    pub fn glyph(&self) -> &'static str {
        self.kind.glyph(self.owner)
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.moved = moved;
    }

    pub(crate) fn set_moves(&mut self, moves: Vec<Square>) {
        self.moves = moves;
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} on {}", self.owner, self.kind, self.square)
    }
}
