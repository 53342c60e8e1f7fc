//! Parsing of the commands typed at the prompt.

use std::path::PathBuf;

use chessboard_core::{NotationError, Square};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("'{0}' needs {1}")]
    MissingArgument(&'static str, &'static str),
    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Commands accepted at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the piece on `from` to `to`.
    Move { from: Square, to: Square },
    /// List the candidate squares of the piece on a square.
    Moves(Square),
    /// Redraw the board.
    Board,
    /// Print the moves played so far.
    History,
    /// Save to the given file, or to the configured one.
    Save(Option<PathBuf>),
    /// Load from the given file, or from the configured one.
    Load(Option<PathBuf>),
    /// Start a new game.
    New,
    Help,
    Quit,
    /// Blank input.
    Empty,
    /// Anything else, kept verbatim for the error message.
    Unknown(String),
}

impl Command {
    /// Parses one line of input.
    ///
    /// Moves may be written as `move e2 e4`, `e2 e4` or `e2e4`.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");

        match cmd.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Empty),
            "move" | "m" => {
                let from = parts
                    .next()
                    .ok_or(CommandError::MissingArgument("move", "two squares"))?;
                let to = parts
                    .next()
                    .ok_or(CommandError::MissingArgument("move", "two squares"))?;
                Self::parse_move(from, to)
            }
            "moves" => {
                let square = parts
                    .next()
                    .ok_or(CommandError::MissingArgument("moves", "a square"))?;
                Ok(Command::Moves(Square::from_algebraic(square)?))
            }
            "board" | "show" => Ok(Command::Board),
            "history" => Ok(Command::History),
            "save" => Ok(Command::Save(parts.next().map(PathBuf::from))),
            "load" => Ok(Command::Load(parts.next().map(PathBuf::from))),
            "new" | "reset" => Ok(Command::New),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Self::parse_bare_move(cmd, parts.next()).unwrap_or_else(|| {
                Ok(Command::Unknown(input.to_string()))
            }),
        }
    }

    fn parse_move(from: &str, to: &str) -> Result<Self, CommandError> {
        Ok(Command::Move {
            from: Square::from_algebraic(from)?,
            to: Square::from_algebraic(to)?,
        })
    }

    /// Recognizes `e2 e4` and `e2e4`. Returns `None` if the input does not
    /// look like a move at all.
    fn parse_bare_move(first: &str, second: Option<&str>) -> Option<Result<Self, CommandError>> {
        let looks_like_square = |s: &str| {
            let bytes = s.as_bytes();
            bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1].is_ascii_digit()
        };

        match second {
            Some(second) if looks_like_square(first) => Some(Self::parse_move(first, second)),
            None if first.len() == 4 && first.is_ascii() && looks_like_square(&first[..2]) => {
                Some(Self::parse_move(&first[..2], &first[2..]))
            }
            _ => None,
        }
    }
}

/// Text printed by `help`.
pub const HELP: &str = "\
Commands:
  e2 e4 | e2e4 | move e2 e4   move a piece
  moves e2                    list the squares the piece on e2 can reach
  board                       redraw the board
  history                     list the moves played so far
  save [file]                 save the game
  load [file]                 load a saved game
  new                         start over
  help                        show this text
  quit                        leave";
