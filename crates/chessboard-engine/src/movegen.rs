//! Pseudo-legal move generation.
//!
//! Destinations are computed from piece patterns and occupancy only; whether
//! a move would leave the mover's own king attacked is decided later, when the
//! board executes it. Sliders include the first occupied square of each ray
//! regardless of its owner and stop there.

use chessboard_core::{Color, PieceKind, Square};

use crate::Piece;

/// Read-only view of which squares are occupied, and by whom.
pub trait Occupancy {
    /// Returns the owner of the piece on `sq`, if any.
    fn owner_at(&self, sq: Square) -> Option<Color>;

    /// Returns true if nothing stands on `sq`.
    fn is_empty(&self, sq: Square) -> bool {
        self.owner_at(sq).is_none()
    }
}

/// Orthogonal ray directions as (rank, file) steps.
pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// Diagonal ray directions as (rank, file) steps.
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (0, 1),
    (-1, 1),
    (1, 0),
    (-1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Generates the pseudo-legal destinations of `piece` on `board`.
pub fn pseudo_legal_moves<B: Occupancy + ?Sized>(board: &B, piece: &Piece) -> Vec<Square> {
    destinations(board, piece.kind(), piece.owner(), piece.square(), piece.has_moved())
}

/// Generates pseudo-legal destinations for a piece described by its parts.
///
/// `moved` only matters for pawns, where it disables the two-square advance.
pub fn destinations<B: Occupancy + ?Sized>(
    board: &B,
    kind: PieceKind,
    owner: Color,
    from: Square,
    moved: bool,
) -> Vec<Square> {
    match kind {
        PieceKind::Pawn => pawn_moves(board, owner, from, moved),
        PieceKind::Knight => step_moves(from, &KNIGHT_OFFSETS),
        PieceKind::Bishop => ray_moves(board, from, &DIAGONAL),
        PieceKind::Rook => ray_moves(board, from, &ORTHOGONAL),
        PieceKind::Queen => {
            let mut moves = ray_moves(board, from, &DIAGONAL);
            moves.extend(ray_moves(board, from, &ORTHOGONAL));
            moves
        }
        PieceKind::King => step_moves(from, &KING_OFFSETS),
    }
}

fn pawn_moves<B: Occupancy + ?Sized>(
    board: &B,
    owner: Color,
    from: Square,
    moved: bool,
) -> Vec<Square> {
    let mut moves = Vec::with_capacity(4);
    let dir = owner.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            moves.push(one);
            if !moved {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    // Diagonals only when an enemy stands there; no en passant.
    for file_delta in [-1, 1] {
        if let Some(diag) = from.offset(dir, file_delta) {
            if board.owner_at(diag) == Some(owner.opposite()) {
                moves.push(diag);
            }
        }
    }

    moves
}

fn ray_moves<B: Occupancy + ?Sized>(board: &B, from: Square, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut moves = Vec::with_capacity(14);
    for &(rank_step, file_step) in directions {
        let mut current = from;
        while let Some(next) = current.offset(rank_step, file_step) {
            moves.push(next);
            if !board.is_empty(next) {
                break;
            }
            current = next;
        }
    }
    moves
}

fn step_moves(from: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(rank_delta, file_delta)| from.offset(rank_delta, file_delta))
        .collect()
}
