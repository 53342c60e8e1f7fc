//! Saving and restoring boards as JSON snapshots.
//!
//! A snapshot carries the whole board: every piece with its square and moved
//! flag, the grid, both active and captured collections, the side to move,
//! and the check, checkmate and search flags. Cached move sets are left out
//! and recomputed when the snapshot is loaded.
//!
//! ```json
//! {
//!   "version": 1,
//!   "board": {
//!     "pieces": [{ "kind": "Rook", "owner": "Black", "square": 0, "moved": false }, ...],
//!     "grid": [[0, 1, ...], ...],
//!     "active": [[16, 17, ...], [0, 1, ...]],
//!     "captured": [[], []],
//!     "current_player": "White",
//!     ...
//!   }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::board::ConsistencyError;
use crate::Board;

/// Snapshot format version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// Errors that can occur when saving or loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(#[from] ConsistencyError),
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    board: &'a Board,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    board: Board,
}

/// Serializes `board` to a pretty-printed JSON string.
pub fn to_json(board: &Board) -> Result<String, SnapshotError> {
    let snapshot = SnapshotRef {
        version: FORMAT_VERSION,
        board,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Restores a board from a JSON string produced by [`to_json`].
pub fn from_json(json: &str) -> Result<Board, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    restore(snapshot)
}

/// Writes `board` to `path`, replacing any existing file.
pub fn save_game<P: AsRef<Path>>(board: &Board, path: P) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(
        writer,
        &SnapshotRef {
            version: FORMAT_VERSION,
            board,
        },
    )?;
    info!(path = %path.display(), "Game saved");
    Ok(())
}

/// Reads a board previously written by [`save_game`].
pub fn load_game<P: AsRef<Path>>(path: P) -> Result<Board, SnapshotError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    let board = restore(snapshot)?;
    info!(path = %path.display(), "Game loaded");
    Ok(board)
}

fn restore(snapshot: Snapshot) -> Result<Board, SnapshotError> {
    if snapshot.version != FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(snapshot.version));
    }
    let mut board = snapshot.board;
    board.check_consistency()?;
    board.check_for_check();
    Ok(board)
}
