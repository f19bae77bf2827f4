//! Game settings from a TOML file and the command line

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chess_core::Color;
use minimax_engine::PieceValues;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Read when present and no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "play.toml";

pub const DEFAULT_DEPTH: u8 = 3;

/// The colour the human plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    pub fn parse(s: &str) -> Option<Side> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Some(Side::White),
            "b" | "black" => Some(Side::Black),
            _ => None,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Settings for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Engine search depth in plies
    pub depth: u8,
    /// Colour the human plays
    pub human: Side,
    /// Starting position; the standard one when absent
    pub fen: Option<String>,
    /// Piece values for the engine's evaluation
    pub values: PieceValues,
    /// Where to write the JSON game record on exit
    pub record: Option<PathBuf>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            human: Side::White,
            fen: None,
            values: PieceValues::default(),
            record: None,
        }
    }
}

impl PlayConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: PlayConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Builds the config from command-line arguments (program name
    /// excluded).
    ///
    /// `--config PATH` is loaded first and must exist; without it
    /// `play.toml` is used if present. `--depth`, `--color`, `--fen` and
    /// `--record` then override the file.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = match config_path(args)? {
            Some(path) => Self::load(Path::new(path))?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {
                debug!("no config file, using defaults");
                Self::default()
            }
        };

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = || {
                args.get(i + 1)
                    .map(String::as_str)
                    .with_context(|| format!("{flag} needs a value"))
            };
            match flag {
                "--config" | "-c" => {}
                "--depth" | "-d" => {
                    let v = value()?;
                    config.depth = v
                        .parse()
                        .with_context(|| format!("invalid depth '{v}'"))?;
                }
                "--color" => {
                    let v = value()?;
                    config.human = match Side::parse(v) {
                        Some(side) => side,
                        None => bail!("invalid color '{v}', expected w or b"),
                    };
                }
                "--fen" => config.fen = Some(value()?.to_string()),
                "--record" => config.record = Some(PathBuf::from(value()?)),
                other => bail!("unknown argument '{other}'"),
            }
            i += 2;
        }

        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.depth == 0 {
            warn!("depth 0 would never move, using 1");
            self.depth = 1;
        }
        self
    }
}

fn config_path(args: &[String]) -> Result<Option<&str>> {
    match args.iter().position(|a| a == "--config" || a == "-c") {
        Some(idx) => match args.get(idx + 1) {
            Some(v) => Ok(Some(v.as_str())),
            None => bail!("--config needs a value"),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = PlayConfig::from_args(&[]).unwrap();
        assert_eq!(config.depth, 3);
        assert_eq!(config.human, Side::White);
        assert_eq!(config.fen, None);
        assert_eq!(config.values, PieceValues::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: PlayConfig = toml::from_str(
            r#"
            human = "black"

            [values]
            queen = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.human, Side::Black);
        assert_eq!(config.depth, 3);
        assert_eq!(config.values.queen, 10);
        assert_eq!(config.values.rook, 5);
    }

    #[test]
    fn test_cli_overrides() {
        let config = PlayConfig::from_args(&args(&[
            "--depth", "2", "--color", "b", "--fen", "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
            "--record", "game.json",
        ]))
        .unwrap();
        assert_eq!(config.depth, 2);
        assert_eq!(config.human, Side::Black);
        assert_eq!(config.fen.as_deref(), Some("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1"));
        assert_eq!(config.record, Some(PathBuf::from("game.json")));
    }

    #[test]
    fn test_cli_overrides_file() {
        let path = std::env::temp_dir().join(format!("play_cfg_{}.toml", std::process::id()));
        std::fs::write(&path, "depth = 5\nhuman = \"black\"\n").unwrap();

        let config =
            PlayConfig::from_args(&args(&["--config", path.to_str().unwrap(), "--depth", "2"]))
                .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.depth, 2);
        assert_eq!(config.human, Side::Black);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(PlayConfig::from_args(&args(&["--depth", "deep"])).is_err());
        assert!(PlayConfig::from_args(&args(&["--color", "green"])).is_err());
        assert!(PlayConfig::from_args(&args(&["--depth"])).is_err());
        assert!(PlayConfig::from_args(&args(&["--verbose"])).is_err());
        assert!(PlayConfig::from_args(&args(&["--config", "/no/such/play.toml"])).is_err());
    }

    #[test]
    fn test_depth_zero_is_raised() {
        let config = PlayConfig::from_args(&args(&["--depth", "0"])).unwrap();
        assert_eq!(config.depth, 1);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::parse("W"), Some(Side::White));
        assert_eq!(Side::parse("black"), Some(Side::Black));
        assert_eq!(Side::parse("x"), None);
        assert_eq!(Color::from(Side::Black), Color::Black);
    }
}
