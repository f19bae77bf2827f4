//! Minimax Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material evaluation.
//! Scores are always from White's point of view.

mod eval;
mod search;

use chess_core::{Color, Engine, Position, SearchResult};
use tracing::debug;

pub use eval::{evaluate, PieceValues};
pub use search::{minimax, SearchStats};

/// Chess engine using plain minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Minimax search with an alpha-beta window, White maximizing
/// - Material-only evaluation with configurable piece values
/// - Automatic draws (fivefold repetition, 75-move rule, dead positions)
///   as leaves
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    values: PieceValues,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: PieceValues) -> Self {
        Self { values, nodes: 0 }
    }

    pub fn values(&self) -> &PieceValues {
        &self.values
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        let mut root = pos.clone();
        let mut stats = SearchStats::default();
        let maximizing = root.side_to_move == Color::White;

        let (score, best_move) = minimax(
            &mut root,
            depth,
            i32::MIN,
            i32::MAX,
            maximizing,
            &self.values,
            &mut stats,
        );
        self.nodes = stats.nodes;

        debug!(
            depth,
            score,
            best = ?best_move.map(|m| m.to_string()),
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes: stats.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
