//! Terminal chess against the minimax engine
//!
//! `config` turns a TOML file and command-line flags into a `PlayConfig`;
//! `game` holds the position and engine and enforces whose turn it is.

pub mod config;
pub mod game;

pub use config::{PlayConfig, Side, DEFAULT_CONFIG_PATH, DEFAULT_DEPTH};
pub use game::{Game, GameRecord, PlayError};
