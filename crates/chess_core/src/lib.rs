pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use error::{ChessError, Result};
pub use fen::STARTPOS_FEN;
pub use movegen::*;
pub use notation::*;
pub use perft::{perft, perft_divide};
pub use types::*;
pub use zobrist::{ZOBRIST, repetition_key};

// =============================================================================
// Engine trait — implemented by move-choosing opponents
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if the position is terminal)
    pub best_move: Option<Move>,
    /// Evaluation at the root, positive favoring White
    pub score: i32,
    /// Search depth in plies
    pub depth: u8,
    /// Number of nodes visited
    pub nodes: u64,
}

/// Something that picks a move for the side to move.
///
/// The game driver holds its opponent as `Box<dyn Engine>` so a different
/// search can be dropped in without touching the game loop.
pub trait Engine: Send {
    /// Search `pos` to `depth` plies. The position is not modified; the
    /// caller applies the returned move.
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
