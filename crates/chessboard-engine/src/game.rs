//! Turn-enforcing game driver with move history.
//!
//! [`Board`] executes moves for whichever piece it is asked to move and never
//! changes turns on its own. [`Game`] layers the rules of play on top: only
//! the side to move may move, every accepted move is recorded, and the game
//! freezes once a king is captured or checkmate is detected.

use std::fmt;

use chessboard_core::{Color, NotationError, PieceKind, Square};
use thiserror::Error;
use tracing::info;

use crate::Board;

/// A recorded move in game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMove {
    pub piece: PieceKind,
    pub owner: Color,
    pub from: Square,
    pub to: Square,
    /// Kind of the piece taken by this move, if any.
    pub captured: Option<PieceKind>,
}

impl fmt::Display for GameMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} to {}", self.piece, self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " capturing {}", captured)?;
        }
        Ok(())
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The loser's king was taken off the board.
    KingCaptured { winner: Color },
    /// The loser was left in check with no escaping move.
    Checkmate { winner: Color },
}

impl GameOutcome {
    pub fn winner(self) -> Color {
        match self {
            GameOutcome::KingCaptured { winner } | GameOutcome::Checkmate { winner } => winner,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::KingCaptured { winner } => {
                write!(f, "{} has won by capturing the king", winner)
            }
            GameOutcome::Checkmate { winner } => write!(f, "Checkmate! {} has won", winner),
        }
    }
}

/// Error type for game operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("there is no piece on {0}")]
    NoPieceAt(Square),

    #[error("it's not your turn: the piece on {square} belongs to {owner}")]
    NotYourTurn { square: Square, owner: Color },

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// A game of chess between two players sharing one board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<GameMove>,
    outcome: Option<GameOutcome>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Continues play from an existing board, e.g. a loaded snapshot.
    ///
    /// A board whose king is already gone, or whose checkmate flag is set,
    /// starts out finished. A mated board has the loser to move, so the side
    /// that delivered mate is the winner.
    pub fn from_board(board: Board) -> Self {
        let outcome = match board.winner() {
            Some(winner) => Some(GameOutcome::KingCaptured { winner }),
            None if board.is_checkmate() => Some(GameOutcome::Checkmate {
                winner: board.current_player().opposite(),
            }),
            None => None,
        };
        Game {
            board,
            history: Vec::new(),
            outcome,
        }
    }

    /// Returns a reference to the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn current_player(&self) -> Color {
        self.board.current_player()
    }

    /// Returns the moves played since the game was created or reset.
    pub fn history(&self) -> &[GameMove] {
        &self.history
    }

    /// Returns how the game ended, if it has.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Enables or disables the checkmate search on the underlying board.
    pub fn set_checkmate_search(&mut self, enabled: bool) {
        self.board.set_checkmate_search(enabled);
    }

    /// Starts over from the standard position, keeping the search setting.
    pub fn reset(&mut self) {
        let search = self.board.checkmate_search_enabled();
        self.board = Board::new();
        self.board.set_checkmate_search(search);
        self.history.clear();
        self.outcome = None;
    }

    /// Moves the piece on `from` to `to` for the side to move.
    ///
    /// On success the move is recorded, the outcome is evaluated and the turn
    /// passes to the other side.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<GameMove, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }

        let piece = self.board.occupant(from).ok_or(GameError::NoPieceAt(from))?;
        let mover = piece.owner();
        if mover != self.board.current_player() {
            return Err(GameError::NotYourTurn {
                square: from,
                owner: mover,
            });
        }
        let kind = piece.kind();
        let captured = self
            .board
            .occupant(to)
            .filter(|target| target.owner() != mover)
            .map(|target| target.kind());

        if !self.board.move_piece(from, to) {
            return Err(GameError::IllegalMove { from, to });
        }

        let record = GameMove {
            piece: kind,
            owner: mover,
            from,
            to,
            captured,
        };
        self.history.push(record);

        if self.board.is_king_captured() {
            self.outcome = self
                .board
                .winner()
                .map(|winner| GameOutcome::KingCaptured { winner });
        } else if self.board.is_checkmate() {
            self.outcome = Some(GameOutcome::Checkmate { winner: mover });
        }
        if let Some(outcome) = self.outcome {
            info!("{}", outcome);
        }

        self.board.switch_player();
        Ok(record)
    }

    /// Like [`make_move`](Self::make_move), with squares in algebraic notation.
    pub fn make_move_algebraic(&mut self, from: &str, to: &str) -> Result<GameMove, GameError> {
        let from = Square::from_algebraic(from)?;
        let to = Square::from_algebraic(to)?;
        self.make_move(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.current_player(), Color::White);
        assert!(game.history().is_empty());
        assert!(!game.is_game_over());
    }

    #[test]
    fn moves_alternate_turns() {
        let mut game = Game::new();
        let record = game.make_move_algebraic("b1", "c3").unwrap();
        assert_eq!(record.to_string(), "Knight: B1 to C3");
        assert_eq!(game.current_player(), Color::Black);
        game.make_move_algebraic("e7", "e5").unwrap();
        assert_eq!(game.current_player(), Color::White);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn wrong_color_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(sq("E7"), sq("E5")),
            Err(GameError::NotYourTurn {
                square: sq("E7"),
                owner: Color::Black
            })
        );
        assert_eq!(game.current_player(), Color::White);
    }

    #[test]
    fn empty_square_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(sq("E4"), sq("E5")),
            Err(GameError::NoPieceAt(sq("E4")))
        );
    }

    #[test]
    fn illegal_move_keeps_turn() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(sq("E2"), sq("E5")),
            Err(GameError::IllegalMove {
                from: sq("E2"),
                to: sq("E5")
            })
        );
        assert_eq!(game.current_player(), Color::White);
        assert!(game.history().is_empty());
    }

    #[test]
    fn bad_notation_is_reported() {
        let mut game = Game::new();
        assert!(matches!(
            game.make_move_algebraic("z9", "e4"),
            Err(GameError::Notation(_))
        ));
    }

    #[test]
    fn capture_is_recorded() {
        let mut game = Game::new();
        game.make_move_algebraic("e2", "e4").unwrap();
        game.make_move_algebraic("d7", "d5").unwrap();
        let record = game.make_move_algebraic("e4", "d5").unwrap();
        assert_eq!(record.captured, Some(PieceKind::Pawn));
        assert_eq!(record.to_string(), "Pawn: E4 to D5 capturing Pawn");
        assert_eq!(game.board().captured(Color::Black).len(), 1);
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = Game::new();
        game.make_move_algebraic("f2", "f3").unwrap();
        game.make_move_algebraic("e7", "e5").unwrap();
        game.make_move_algebraic("g2", "g4").unwrap();
        game.make_move_algebraic("d8", "h4").unwrap();
        assert!(game.board().is_white_in_check());
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::Checkmate {
                winner: Color::Black
            })
        );
        assert_eq!(
            game.make_move_algebraic("a2", "a3"),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn king_capture_ends_the_game() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4RK2").unwrap();
        let mut game = Game::from_board(board);
        game.set_checkmate_search(false);
        game.make_move_algebraic("e1", "e8").unwrap();
        let outcome = game.outcome().unwrap();
        assert_eq!(outcome, GameOutcome::KingCaptured { winner: Color::White });
        assert_eq!(outcome.winner(), Color::White);
    }

    #[test]
    fn board_without_king_starts_finished() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/8").unwrap();
        let game = Game::from_board(board);
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::KingCaptured { winner: Color::Black })
        );
    }

    #[test]
    fn mated_game_stays_finished_after_a_snapshot() {
        let mut game = Game::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            game.make_move_algebraic(from, to).unwrap();
        }
        let json = crate::snapshot::to_json(game.board()).unwrap();
        let mut loaded = Game::from_board(crate::snapshot::from_json(&json).unwrap());

        assert!(loaded.is_game_over());
        assert_eq!(
            loaded.outcome(),
            Some(GameOutcome::Checkmate {
                winner: Color::Black
            })
        );
        assert_eq!(
            loaded.make_move_algebraic("e1", "f2"),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn reset_restores_start_and_keeps_setting() {
        let mut game = Game::new();
        game.set_checkmate_search(false);
        game.make_move_algebraic("e2", "e4").unwrap();
        game.reset();
        assert!(game.history().is_empty());
        assert_eq!(game.current_player(), Color::White);
        assert!(!game.board().checkmate_search_enabled());
        assert_eq!(game.board().symbol_at(6, 4), "wP");
    }
}
