//! Terminal front end for a two-player game of chess on one board.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration loading
//! - [`command`] - parsing of prompt input
//! - [`session`] - the read-execute-print loop

pub mod command;
pub mod config;
pub mod session;
