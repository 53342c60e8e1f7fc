//! Core types for the chessboard engine.
//!
//! This crate provides the fundamental types shared by the engine and its
//! drivers:
//! - [`PieceKind`] and [`Color`] for piece identity
//! - [`Square`] for board coordinates (rank 0 is the edge labelled "8")
//! - Algebraic notation helpers ([`position_to_array`], [`array_to_position`])
//! - Piece-placement parsing ([`Placement`])

mod color;
mod notation;
mod piece;
mod placement;
mod square;

pub use color::Color;
pub use notation::{array_to_position, position_to_array, NotationError};
pub use piece::PieceKind;
pub use placement::{Placement, PlacementError};
pub use square::Square;
