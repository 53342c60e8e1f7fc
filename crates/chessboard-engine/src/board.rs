//! Board state, move execution and check/checkmate detection.
//!
//! The board is an arena: every piece ever placed lives in `pieces` and is
//! referred to by [`PieceId`] from the grid and from the per-side active and
//! captured collections. Cloning a board is therefore a plain structural copy
//! with no shared state, which the checkmate search relies on.

use std::fmt;

use chessboard_core::{Color, PieceKind, Placement, PlacementError, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::movegen::{self, Occupancy};
use crate::{Piece, PieceId};

/// Placeholder shown for empty squares in text rendering.
pub const EMPTY_SYMBOL: &str = "##";

const COLUMN_LABELS: &str = "  A  B  C  D  E  F  G  H";

/// A disagreement between the grid, the piece squares and the per-side
/// collections, found when validating a restored board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("piece id {0} is out of range")]
    UnknownPiece(usize),
    #[error("piece id {id} is listed among {listed}'s pieces but belongs to the other side")]
    WrongOwner { id: usize, listed: Color },
    #[error("piece id {id} is active but not on {square}")]
    OffSquare { id: usize, square: Square },
    #[error("the grid puts piece id {id} on {square}, which it does not record")]
    SquareMismatch { id: usize, square: Square },
    #[error("piece id {id} is on {square} but not active")]
    NotActive { id: usize, square: Square },
    #[error("piece id {0} is listed more than once")]
    Duplicate(usize),
    #[error("piece id {0} is neither active nor captured")]
    Unlisted(usize),
}

/// A chess board with its pieces, turn, and derived check state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Every piece ever placed, indexed by [`PieceId`].
    pieces: Vec<Piece>,
    /// Occupants indexed by `[rank][file]`.
    grid: [[Option<PieceId>; 8]; 8],
    /// Pieces on the board, per color.
    active: [Vec<PieceId>; 2],
    /// Pieces removed by capture, per color of the captured piece.
    captured: [Vec<PieceId>; 2],
    current_player: Color,
    white_in_check: bool,
    black_in_check: bool,
    checkmate: bool,
    /// Disabled on speculative copies so the search never recurses.
    search_checkmate: bool,
}

impl Board {
    /// Creates a board in the standard starting position, White to move.
    pub fn new() -> Self {
        Self::with_placement(&Placement::default())
    }

    /// Creates a board from a placement string such as
    /// `"4k3/8/8/8/8/8/8/4K3 b"`.
    pub fn from_placement(placement: &str) -> Result<Self, PlacementError> {
        Ok(Self::with_placement(&Placement::parse(placement)?))
    }

    /// Creates a board from an already parsed placement.
    pub fn with_placement(placement: &Placement) -> Self {
        let mut board = Board {
            pieces: Vec::with_capacity(32),
            grid: [[None; 8]; 8],
            active: [Vec::with_capacity(16), Vec::with_capacity(16)],
            captured: [Vec::new(), Vec::new()],
            current_player: placement.side_to_move,
            white_in_check: false,
            black_in_check: false,
            checkmate: false,
            search_checkmate: true,
        };

        for sq in Square::all() {
            if let Some((kind, color)) = placement.occupant(sq) {
                let id = PieceId(board.pieces.len() as u16);
                board.pieces.push(Piece::new(kind, color, sq));
                board.grid[sq.rank() as usize][sq.file() as usize] = Some(id);
                board.active[color.index()].push(id);
            }
        }

        board.check_for_check();
        board
    }

    /// Renders the board back to a placement string.
    pub fn to_placement(&self) -> String {
        let mut squares = [[None; 8]; 8];
        for sq in Square::all() {
            if let Some(piece) = self.occupant(sq) {
                squares[sq.rank() as usize][sq.file() as usize] =
                    Some((piece.kind(), piece.owner()));
            }
        }
        Placement {
            squares,
            side_to_move: self.current_player,
        }
        .to_placement_string()
    }

    /// Returns a deep copy with the checkmate search disabled.
    pub fn speculative_clone(&self) -> Self {
        let mut copy = self.clone();
        copy.search_checkmate = false;
        copy
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Hands the turn to the other side. The board never does this on its own.
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opposite();
    }

    #[inline]
    pub fn is_white_in_check(&self) -> bool {
        self.white_in_check
    }

    #[inline]
    pub fn is_black_in_check(&self) -> bool {
        self.black_in_check
    }

    /// Returns the check flag for `color`.
    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_in_check,
            Color::Black => self.black_in_check,
        }
    }

    /// Returns the advisory checkmate flag computed after the last move.
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    #[inline]
    pub fn checkmate_search_enabled(&self) -> bool {
        self.search_checkmate
    }

    /// Enables or disables the checkmate search run after each move.
    pub fn set_checkmate_search(&mut self, enabled: bool) {
        self.search_checkmate = enabled;
    }

    /// Returns the piece at the given rank and file.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside 0-7.
    pub fn piece_at(&self, row: usize, col: usize) -> Option<&Piece> {
        self.grid[row][col].map(|id| &self.pieces[id.index()])
    }

    /// Returns true if a piece stands at the given rank and file.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside 0-7.
    pub fn has_piece_at(&self, row: usize, col: usize) -> bool {
        self.grid[row][col].is_some()
    }

    /// Returns the piece on `sq`, if any.
    pub fn occupant(&self, sq: Square) -> Option<&Piece> {
        self.id_at(sq).map(|id| &self.pieces[id.index()])
    }

    /// Returns the cached pseudo-legal destinations of the piece on `sq`.
    pub fn moves_from(&self, sq: Square) -> &[Square] {
        self.occupant(sq).map(Piece::moves).unwrap_or(&[])
    }

    /// Iterates over `color`'s pieces still on the board.
    pub fn piece_list(&self, color: Color) -> impl ExactSizeIterator<Item = &Piece> + '_ {
        self.active[color.index()]
            .iter()
            .map(move |id| &self.pieces[id.index()])
    }

    /// Iterates over `color`'s captured pieces in capture order.
    pub fn captured(&self, color: Color) -> impl ExactSizeIterator<Item = &Piece> + '_ {
        self.captured[color.index()]
            .iter()
            .map(move |id| &self.pieces[id.index()])
    }

    /// Returns the two-character symbol of the square ("wP", "bK" or "##").
    pub fn symbol_at(&self, row: usize, col: usize) -> String {
        self.piece_at(row, col)
            .map(Piece::symbol)
            .unwrap_or_else(|| EMPTY_SYMBOL.to_string())
    }

    /// Returns the Unicode glyph on the square, or an empty string.
    pub fn unicode_at(&self, row: usize, col: usize) -> &'static str {
        self.piece_at(row, col).map(Piece::glyph).unwrap_or("")
    }

    /// Returns true if either side's king is no longer on the board.
    pub fn is_king_captured(&self) -> bool {
        let (white, black) = self.kings_present();
        !white || !black
    }

    /// Returns the side whose king survives when the other's has been taken.
    pub fn winner(&self) -> Option<Color> {
        match self.kings_present() {
            (true, false) => Some(Color::White),
            (false, true) => Some(Color::Black),
            _ => None,
        }
    }

    fn kings_present(&self) -> (bool, bool) {
        let mut present = [false; 2];
        for sq in Square::all() {
            if let Some(piece) = self.occupant(sq) {
                if piece.kind() == PieceKind::King {
                    present[piece.owner().index()] = true;
                }
            }
        }
        (present[0], present[1])
    }

    #[inline]
    fn id_at(&self, sq: Square) -> Option<PieceId> {
        self.grid[sq.rank() as usize][sq.file() as usize]
    }

    #[inline]
    fn set_cell(&mut self, sq: Square, id: Option<PieceId>) {
        self.grid[sq.rank() as usize][sq.file() as usize] = id;
    }

    // ------------------------------------------------------------------
    // Move execution
    // ------------------------------------------------------------------

    /// Moves the piece at (`from_row`, `from_col`) to (`to_row`, `to_col`).
    ///
    /// Returns false, leaving the position untouched, if the move is not a
    /// pseudo-legal destination, lands on a friendly piece, or would leave
    /// the mover's own king in check. Coordinates off the board are treated
    /// as an empty origin.
    pub fn move_piece_position(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> bool {
        match (Square::new(from_row, from_col), Square::new(to_row, to_col)) {
            (Some(from), Some(to)) => self.move_piece(from, to),
            _ => false,
        }
    }

    /// Square-based form of [`move_piece_position`](Self::move_piece_position).
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        let moved = self.try_move(from, to);

        self.update_valid_moves();
        self.check_for_checkmate();
        if self.checkmate {
            info!("Checkmate");
        }

        moved
    }

    fn try_move(&mut self, from: Square, to: Square) -> bool {
        let Some(id) = self.id_at(from) else {
            debug!(%from, "no piece to move");
            return false;
        };
        if from == to {
            return false;
        }

        let mover = self.pieces[id.index()].owner();
        if !self.pieces[id.index()].is_potential_move(to) {
            debug!(%from, %to, "not a destination of the piece");
            return false;
        }
        let target = self.id_at(to);
        if let Some(t) = target {
            if self.pieces[t.index()].owner() == mover {
                debug!(%from, %to, "destination holds a friendly piece");
                return false;
            }
        }

        let capture = target.map(|t| (t, self.capture(t)));
        let was_moved = self.pieces[id.index()].has_moved();
        self.relocate(id, from, to);
        self.check_for_check();

        let applied = if self.is_in_check(mover) {
            self.relocate(id, to, from);
            self.pieces[id.index()].set_moved(was_moved);
            if let Some((t, slot)) = capture {
                self.restore_capture(t, slot, to);
            }
            debug!(%from, %to, "rejected: {} king would be left in check", mover);
            false
        } else {
            true
        };

        self.check_for_check();
        if self.white_in_check {
            info!("White King is in Check");
        }
        if self.black_in_check {
            info!("Black King is in Check");
        }

        applied
    }

    /// Moves `id` from the active to the captured collection of its color,
    /// returning its former slot in the active list.
    fn capture(&mut self, id: PieceId) -> Option<usize> {
        let color = self.pieces[id.index()].owner().index();
        let slot = self.active[color].iter().position(|&p| p == id);
        if let Some(slot) = slot {
            self.active[color].remove(slot);
        }
        self.captured[color].push(id);
        self.pieces[id.index()].set_moves(Vec::new());
        slot
    }

    /// Exact inverse of [`capture`](Self::capture).
    fn restore_capture(&mut self, id: PieceId, slot: Option<usize>, sq: Square) {
        let color = self.pieces[id.index()].owner().index();
        self.captured[color].pop();
        match slot {
            Some(slot) => self.active[color].insert(slot, id),
            None => self.active[color].push(id),
        }
        self.set_cell(sq, Some(id));
    }

    fn relocate(&mut self, id: PieceId, from: Square, to: Square) {
        self.set_cell(from, None);
        self.set_cell(to, Some(id));
        let piece = &mut self.pieces[id.index()];
        piece.set_square(to);
        piece.set_moved(true);
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// Recomputes the pseudo-legal destinations of every piece on the board.
    pub fn update_valid_moves(&mut self) {
        for sq in Square::all() {
            if let Some(id) = self.id_at(sq) {
                let moves = movegen::pseudo_legal_moves(&*self, &self.pieces[id.index()]);
                self.pieces[id.index()].set_moves(moves);
            }
        }
    }

    /// Recomputes both check flags from scratch.
    ///
    /// A side is in check when any enemy piece has its king among its
    /// pseudo-legal destinations.
    pub fn check_for_check(&mut self) {
        self.update_valid_moves();

        let mut in_check = [false; 2];
        for sq in Square::all() {
            let Some(attacker) = self.occupant(sq) else {
                continue;
            };
            for &dest in attacker.moves() {
                if let Some(target) = self.occupant(dest) {
                    if target.kind() == PieceKind::King && target.owner() != attacker.owner() {
                        in_check[target.owner().index()] = true;
                    }
                }
            }
        }

        self.white_in_check = in_check[Color::White.index()];
        self.black_in_check = in_check[Color::Black.index()];
    }

    /// Searches for an escape from check and updates the checkmate flag.
    ///
    /// Candidates are the pieces of the side opposite `current_player`; a
    /// candidate escapes when playing it on a speculative copy leaves that
    /// side's king out of check.
    fn check_for_checkmate(&mut self) {
        self.checkmate = false;
        if !self.search_checkmate || !(self.white_in_check || self.black_in_check) {
            return;
        }

        let defender = self.current_player.opposite();
        self.checkmate = !self.has_escape(defender);
    }

    fn has_escape(&self, defender: Color) -> bool {
        for piece in self.piece_list(defender) {
            for &to in piece.moves() {
                let mut trial = self.speculative_clone();
                if trial.move_piece(piece.square(), to) && !trial.is_in_check(defender) {
                    trace!(from = %piece.square(), %to, "escape found for {}", defender);
                    return true;
                }
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Consistency
    // ------------------------------------------------------------------

    /// Verifies that the grid, the piece squares and the per-side
    /// collections agree with each other.
    pub(crate) fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let mut listed = vec![false; self.pieces.len()];
        let lookup = |id: PieceId| {
            self.pieces
                .get(id.index())
                .ok_or(ConsistencyError::UnknownPiece(id.index()))
        };

        for color in Color::ALL {
            let lists = [&self.active[color.index()], &self.captured[color.index()]];
            for (list, ids) in lists.into_iter().enumerate() {
                for &id in ids {
                    let piece = lookup(id)?;
                    if piece.owner() != color {
                        return Err(ConsistencyError::WrongOwner {
                            id: id.index(),
                            listed: color,
                        });
                    }
                    if list == 0 && self.id_at(piece.square()) != Some(id) {
                        return Err(ConsistencyError::OffSquare {
                            id: id.index(),
                            square: piece.square(),
                        });
                    }
                    if std::mem::replace(&mut listed[id.index()], true) {
                        return Err(ConsistencyError::Duplicate(id.index()));
                    }
                }
            }
        }

        for sq in Square::all() {
            if let Some(id) = self.id_at(sq) {
                let piece = lookup(id)?;
                if piece.square() != sq {
                    return Err(ConsistencyError::SquareMismatch {
                        id: id.index(),
                        square: sq,
                    });
                }
                if !self.active[piece.owner().index()].contains(&id) {
                    return Err(ConsistencyError::NotActive {
                        id: id.index(),
                        square: sq,
                    });
                }
            }
        }

        match listed.iter().position(|&seen| !seen) {
            Some(index) => Err(ConsistencyError::Unlisted(index)),
            None => Ok(()),
        }
    }

    /// Renders the board with Unicode glyphs instead of two-letter symbols.
    pub fn render_unicode(&self) -> String {
        Unicode(self).to_string()
    }

    fn render<W: fmt::Write>(
        &self,
        out: &mut W,
        cell: impl Fn(Option<&Piece>) -> String,
    ) -> fmt::Result {
        writeln!(out, "{}", COLUMN_LABELS)?;
        for row in 0..8 {
            write!(out, "{} ", 8 - row)?;
            for col in 0..8 {
                write!(out, "{} ", cell(self.piece_at(row, col)))?;
            }
            writeln!(out, " {}", 8 - row)?;
        }
        writeln!(out, "{}", COLUMN_LABELS)
    }
}

impl Occupancy for Board {
    fn owner_at(&self, sq: Square) -> Option<Color> {
        self.occupant(sq).map(Piece::owner)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, |piece| match piece {
            Some(piece) => piece.symbol(),
            None => EMPTY_SYMBOL.to_string(),
        })
    }
}

struct Unicode<'a>(&'a Board);

impl fmt::Display for Unicode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Glyphs are one column wide; pad them to the width of "wP".
        self.0.render(f, |piece| match piece {
            Some(piece) => format!("{} ", piece.glyph()),
            None => EMPTY_SYMBOL.to_string(),
        })
    }
}
