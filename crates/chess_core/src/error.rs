//! Error type shared by the rules kernel.

use thiserror::Error;

/// Contract violations and parse failures reported by `chess_core`.
///
/// `IllegalMove` and `EmptyHistory` mean the caller broke the board's
/// contract (the search never triggers them); the parse variants come from
/// untrusted text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no moves to undo")]
    EmptyHistory,

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid move text: {0:?}")]
    InvalidMoveText(String),
}

pub type Result<T> = std::result::Result<T, ChessError>;
