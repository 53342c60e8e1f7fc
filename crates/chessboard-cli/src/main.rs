use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chessboard_cli::config::ChessConfig;
use chessboard_cli::session::Session;
use chessboard_engine::{snapshot, Board, Game};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chessboard")]
#[command(about = "Two-player chess on one terminal")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value_os_t = ChessConfig::config_path())]
    config: PathBuf,

    /// Resume from a saved game
    #[arg(short, long, conflicts_with = "placement")]
    load: Option<PathBuf>,

    /// Start from a custom layout, e.g. "4k3/8/8/8/8/8/8/4K3 w"
    #[arg(short, long)]
    placement: Option<String>,

    /// Log engine decisions at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ChessConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.level()?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let game = initial_game(&cli)?;
    tracing::info!("Starting with {} to move", game.board().current_player());

    let stdin = io::stdin();
    let mut session = Session::new(game, config, stdin.lock(), io::stdout());
    session.run()?;
    Ok(())
}

fn initial_game(cli: &Cli) -> anyhow::Result<Game> {
    if let Some(path) = &cli.load {
        let board = snapshot::load_game(path)
            .with_context(|| format!("loading saved game {}", path.display()))?;
        return Ok(Game::from_board(board));
    }
    if let Some(placement) = &cli.placement {
        let board = Board::from_placement(placement)
            .with_context(|| format!("parsing placement '{}'", placement))?;
        return Ok(Game::from_board(board));
    }
    Ok(Game::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessboard_engine::Color;
    use clap::CommandFactory;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["chessboard"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("chess.toml"));
        assert!(cli.load.is_none());
        assert!(cli.placement.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parses_all_options() {
        let cli = Cli::try_parse_from([
            "chessboard",
            "--config",
            "other.toml",
            "--placement",
            "4k3/8/8/8/8/8/8/4K3 b",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert_eq!(cli.placement.as_deref(), Some("4k3/8/8/8/8/8/8/4K3 b"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_load_conflicts_with_placement() {
        let result = Cli::try_parse_from([
            "chessboard",
            "--load",
            "save.json",
            "--placement",
            "8/8/8/8/8/8/8/8",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_initial_game_from_placement() {
        let cli =
            Cli::try_parse_from(["chessboard", "-p", "4k3/8/8/8/8/8/8/4K3 b"]).unwrap();
        let game = initial_game(&cli).unwrap();
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.board().piece_list(Color::White).len(), 1);
    }

    #[test]
    fn test_initial_game_rejects_bad_placement() {
        let cli = Cli::try_parse_from(["chessboard", "-p", "9/8"]).unwrap();
        assert!(initial_game(&cli).is_err());
    }

    #[test]
    fn test_initial_game_from_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let mut board = Board::new();
        board.switch_player();
        snapshot::save_game(&board, &path).unwrap();

        let cli = Cli::try_parse_from(["chessboard", "--load", path.to_str().unwrap()]).unwrap();
        let game = initial_game(&cli).unwrap();
        assert_eq!(game.current_player(), Color::Black);
    }

    #[test]
    fn test_cli_help_lists_options() {
        let mut cmd = Cli::command();
        let help = cmd.render_help().to_string();
        assert!(help.contains("--placement"));
        assert!(help.contains("--load"));
    }
}
