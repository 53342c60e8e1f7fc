//! Chess rules engine over an arena-backed 8x8 board.
//!
//! This crate provides:
//! - [`Board`] - piece placement, move execution with self-check rollback,
//!   check flags and a one-ply checkmate search
//! - [`Game`] - a turn-enforcing driver that records history and detects
//!   the end of the game
//! - [`movegen`] - pseudo-legal destination generation per piece kind
//! - [`snapshot`] - JSON save and load of complete boards
//!
//! # Coordinates
//!
//! Rank 0 is the row labelled "8" and file 0 is column "A". White pawns
//! advance toward rank 0, Black pawns toward rank 7.
//!
//! # Example
//!
//! ```
//! use chessboard_engine::{Board, Color, Game};
//!
//! let mut board = Board::new();
//! assert!(board.move_piece_position(7, 1, 5, 2)); // B1 to C3
//! assert!(!board.is_black_in_check());
//!
//! let mut game = Game::new();
//! game.make_move_algebraic("e2", "e4").unwrap();
//! assert_eq!(game.current_player(), Color::Black);
//! ```

mod board;
mod game;
pub mod movegen;
mod piece;
pub mod snapshot;

pub use board::{Board, ConsistencyError, EMPTY_SYMBOL};
pub use chessboard_core::{Color, PieceKind, Square};
pub use game::{Game, GameError, GameMove, GameOutcome};
pub use piece::{Piece, PieceId};
pub use snapshot::{load_game, save_game, SnapshotError};
