//! Minimax search with alpha-beta pruning

use chess_core::{legal_moves_into, Move, Position};

use crate::eval::{evaluate, PieceValues};

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, root included
    pub nodes: u64,
    /// Move loops cut short by the alpha-beta window
    pub cutoffs: u64,
}

/// Searches `pos` to `depth` plies and returns the score with the move that
/// achieves it.
///
/// Scores are white-positive: the maximizing side wants them high, the
/// minimizing side low. At a leaf (depth exhausted, or the game is over)
/// the static evaluation is returned with no move. Otherwise children are
/// visited in generator order and the first move reaching the best score
/// is kept.
///
/// Every child is explored through `Position::scoped`, so `pos` is back in
/// its original state when this returns. The chosen move is not played.
///
/// # Arguments
/// * `pos` - Position to search; the side to move picks the next ply
/// * `depth` - Remaining plies
/// * `alpha` - Score the maximizer is already assured of
/// * `beta` - Score the minimizer is already assured of
/// * `maximizing` - Whether the side to move is the maximizer
/// * `values` - Material weights for the evaluator
/// * `stats` - Node and cutoff counters
pub fn minimax(
    pos: &mut Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    values: &PieceValues,
    stats: &mut SearchStats,
) -> (i32, Option<Move>) {
    stats.nodes += 1;

    if depth == 0 {
        return (evaluate(pos, values), None);
    }

    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);

    // Checkmate, stalemate or a forced draw
    if moves.is_empty() || pos.is_automatic_draw() {
        return (evaluate(pos, values), None);
    }

    let mut best_move = None;

    if maximizing {
        let mut best = i32::MIN;
        for mv in moves {
            let (score, _) = {
                let mut child = pos.scoped(mv);
                minimax(&mut child, depth - 1, alpha, beta, false, values, stats)
            };
            if score > best {
                best = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }
        (best, best_move)
    } else {
        let mut best = i32::MAX;
        for mv in moves {
            let (score, _) = {
                let mut child = pos.scoped(mv);
                minimax(&mut child, depth - 1, alpha, beta, true, values, stats)
            };
            if score < best {
                best = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }
        (best, best_move)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
