//! Configuration file loading for the terminal front end.
//!
//! Settings live in a TOML file, `chess.toml` in the current directory by
//! default. Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// `log_level` is not one of error, warn, info, debug or trace.
    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}

/// How the board is drawn in the terminal.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Draw pieces with Unicode glyphs instead of "wP"-style symbols.
    #[serde(default)]
    pub unicode: bool,
    /// Redraw the board after `moves` lists a piece's candidate squares.
    #[serde(default)]
    pub show_moves: bool,
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChessConfig {
    /// Maximum log level. Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Run the checkmate search after each move. Defaults to true.
    #[serde(default = "default_checkmate_search")]
    pub checkmate_search: bool,
    /// Default file for `save` and `load`. Defaults to "chess-save.json".
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_checkmate_search() -> bool {
    true
}

fn default_save_path() -> PathBuf {
    PathBuf::from("chess-save.json")
}

impl Default for ChessConfig {
    fn default() -> Self {
        ChessConfig {
            log_level: default_log_level(),
            checkmate_search: default_checkmate_search(),
            save_path: default_save_path(),
            display: DisplayConfig::default(),
        }
    }
}

impl ChessConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration file path, `chess.toml` in the
    /// current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    /// Parses `log_level` into a tracing level.
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
