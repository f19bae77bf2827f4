//! One game between a human and the engine

use std::path::Path;

use anyhow::Context;
use chess_core::{
    parse_uci_move, ChessError, Color, Engine, GameResult, Move, Position, SearchResult,
};
use minimax_engine::MinimaxEngine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{PlayConfig, Side};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("it is the engine's turn")]
    EngineNotToMove,
    #[error("the game is over")]
    GameOver,
    #[error("no move of yours to take back")]
    NothingToTakeBack,
    #[error(transparent)]
    Chess(#[from] ChessError),
}

pub struct Game {
    pos: Position,
    start_fen: String,
    engine: Box<dyn Engine>,
    human: Color,
    depth: u8,
}

impl Game {
    /// Sets up the position and the engine described by `config`.
    pub fn new(config: &PlayConfig) -> Result<Self, ChessError> {
        let pos = match &config.fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::startpos(),
        };
        let engine = Box::new(MinimaxEngine::with_values(config.values));
        Ok(Self::with_engine(pos, engine, config.human.into(), config.depth))
    }

    /// Depth 0 would leave the engine without a move, so it is raised to 1.
    pub fn with_engine(pos: Position, engine: Box<dyn Engine>, human: Color, depth: u8) -> Self {
        let depth = if depth == 0 {
            warn!("depth 0 would never move, using 1");
            1
        } else {
            depth
        };
        Self {
            start_fen: pos.to_fen(),
            pos,
            engine,
            human,
            depth,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn is_human_turn(&self) -> bool {
        self.pos.side_to_move == self.human
    }

    pub fn is_over(&self) -> bool {
        self.pos.is_terminal()
    }

    pub fn result(&self) -> GameResult {
        self.pos.result()
    }

    /// Plays the human's move given in UCI notation (`e2e4`, `e7e8q`).
    ///
    /// Anything unparsable or not in the legal move list is rejected and
    /// the board is left as it was.
    pub fn play_human(&mut self, text: &str) -> Result<Move, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }
        if !self.is_human_turn() {
            return Err(PlayError::NotYourTurn);
        }
        let mv = parse_uci_move(&self.pos, text).inspect_err(|e| {
            warn!(input = text, error = %e, "rejected human move");
        })?;
        let played = self.pos.apply(mv)?;
        info!(mv = %played, "human move");
        Ok(played)
    }

    /// Lets the engine search and play its move.
    pub fn play_engine(&mut self) -> Result<SearchResult, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }
        if self.is_human_turn() {
            return Err(PlayError::EngineNotToMove);
        }
        let result = self.engine.search(&self.pos, self.depth);
        if let Some(mv) = result.best_move {
            self.pos.push(mv);
            info!(mv = %mv, score = result.score, nodes = result.nodes, "engine move");
        }
        Ok(result)
    }

    /// Takes back the human's last move together with the engine's reply.
    ///
    /// If the game ended on the human's move there is no reply, and only
    /// that move is undone. Returns the undone moves, latest first.
    pub fn take_back(&mut self) -> Result<Vec<Move>, PlayError> {
        let plies = if self.is_human_turn() { 2 } else { 1 };
        if self.pos.ply_count() < plies {
            return Err(PlayError::NothingToTakeBack);
        }
        let mut undone = Vec::with_capacity(plies);
        for _ in 0..plies {
            undone.push(self.pos.undo()?);
        }
        info!(plies, "took back");
        Ok(undone)
    }

    /// Legal moves in UCI notation, generator order.
    pub fn legal_move_texts(&self) -> Vec<String> {
        chess_core::legal_moves(&self.pos)
            .iter()
            .map(Move::to_string)
            .collect()
    }

    /// Draws the side to move could claim but that don't end the game.
    pub fn claimable_draw(&self) -> Option<&'static str> {
        if self.pos.is_threefold_repetition() {
            Some("threefold repetition")
        } else if self.pos.is_fifty_move_draw() {
            Some("fifty-move rule")
        } else {
            None
        }
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            start_fen: self.start_fen.clone(),
            human: match self.human {
                Color::White => Side::White,
                Color::Black => Side::Black,
            },
            depth: self.depth,
            moves: self.pos.moves_played().map(|m| m.to_string()).collect(),
            result: self.result().to_string(),
            final_fen: self.pos.to_fen(),
        }
    }
}

/// A finished or abandoned game, saved as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub human: Side,
    pub depth: u8,
    /// UCI moves from `start_fen`
    pub moves: Vec<String>,
    /// "1-0", "0-1", "1/2-1/2", or "*" if unfinished
    pub result: String,
    pub final_fen: String,
}

impl GameRecord {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize game")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Replays the moves from the start position.
    pub fn replay(&self) -> Result<Position, ChessError> {
        let mut pos = Position::from_fen(&self.start_fen)?;
        for text in &self.moves {
            let mv = parse_uci_move(&pos, text)?;
            pos.apply(mv)?;
        }
        Ok(pos)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
