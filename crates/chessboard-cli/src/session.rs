//! The interactive loop: read a command, apply it to the game, print the result.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chessboard_engine::{snapshot, Board, Game};
use tracing::{debug, warn};

use crate::command::{Command, HELP};
use crate::config::ChessConfig;

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game in progress together with the terminal it is played on.
pub struct Session<R: BufRead, W: Write> {
    game: Game,
    config: ChessConfig,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(mut game: Game, config: ChessConfig, reader: R, writer: W) -> Self {
        game.set_checkmate_search(config.checkmate_search);
        Self {
            game,
            config,
            reader,
            writer,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads and executes commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.show_board()?;
        loop {
            self.prompt()?;
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(());
            }

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.writer, "{}", e)?;
                    continue;
                }
            };
            debug!(?command, "parsed command");

            if self.execute(command)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn prompt(&mut self) -> io::Result<()> {
        if self.game.is_game_over() {
            write!(self.writer, "game over> ")?;
        } else {
            write!(self.writer, "{} to move> ", self.game.current_player())?;
        }
        self.writer.flush()
    }

    /// Applies one command.
    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Move { from, to } => match self.game.make_move(from, to) {
                Ok(record) => {
                    writeln!(self.writer, "{}", record)?;
                    self.show_board()?;
                    self.report_status()?;
                }
                Err(e) => writeln!(self.writer, "{}", e)?,
            },
            Command::Moves(square) => {
                let board = self.game.board();
                match board.occupant(square) {
                    None => writeln!(self.writer, "There is no piece on {}", square)?,
                    Some(piece) => {
                        let mut targets: Vec<String> =
                            piece.moves().iter().map(|sq| sq.to_string()).collect();
                        targets.sort();
                        writeln!(self.writer, "{}: {}", piece, targets.join(" "))?;
                        if self.config.display.show_moves {
                            self.show_board()?;
                        }
                    }
                }
            }
            Command::Board => self.show_board()?,
            Command::History => {
                if self.game.history().is_empty() {
                    writeln!(self.writer, "No moves yet")?;
                }
                for (i, record) in self.game.history().iter().enumerate() {
                    writeln!(self.writer, "{:>3}. {} {}", i + 1, record.owner, record)?;
                }
            }
            Command::Save(path) => {
                let path = self.resolve(path);
                match snapshot::save_game(self.game.board(), &path) {
                    Ok(()) => writeln!(self.writer, "Saved to {}", path.display())?,
                    Err(e) => {
                        warn!(path = %path.display(), "save failed: {}", e);
                        writeln!(self.writer, "Could not save: {}", e)?;
                    }
                }
            }
            Command::Load(path) => {
                let path = self.resolve(path);
                match snapshot::load_game(&path) {
                    Ok(board) => {
                        self.replace_board(board);
                        writeln!(self.writer, "Loaded {}", path.display())?;
                        self.show_board()?;
                        self.report_status()?;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), "load failed: {}", e);
                        writeln!(self.writer, "Could not load: {}", e)?;
                    }
                }
            }
            Command::New => {
                self.game.reset();
                self.show_board()?;
            }
            Command::Help => writeln!(self.writer, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
            Command::Unknown(input) => {
                writeln!(self.writer, "Unknown command '{}', type 'help'", input)?
            }
        }
        Ok(Flow::Continue)
    }

    fn resolve(&self, path: Option<PathBuf>) -> PathBuf {
        path.unwrap_or_else(|| self.config.save_path.clone())
    }

    fn replace_board(&mut self, board: Board) {
        self.game = Game::from_board(board);
        self.game.set_checkmate_search(self.config.checkmate_search);
    }

    fn show_board(&mut self) -> io::Result<()> {
        let board = self.game.board();
        if self.config.display.unicode {
            write!(self.writer, "{}", board.render_unicode())
        } else {
            write!(self.writer, "{}", board)
        }
    }

    fn report_status(&mut self) -> io::Result<()> {
        let board = self.game.board();
        if let Some(outcome) = self.game.outcome() {
            return writeln!(self.writer, "{}", outcome);
        }
        if board.is_white_in_check() {
            writeln!(self.writer, "White King is in Check")?;
        }
        if board.is_black_in_check() {
            writeln!(self.writer, "Black King is in Check")?;
        }
        Ok(())
    }
}
