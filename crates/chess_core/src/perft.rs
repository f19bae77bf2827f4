use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Counts leaf positions reachable in exactly `depth` plies.
///
/// Used to check the move generator against published node counts.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    count(pos, &mut layers)
}

/// Per-root-move breakdown of `perft`, in generation order.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut roots = Vec::new();
    legal_moves_into(pos, &mut roots);
    let mut layers = vec![Vec::with_capacity(64); depth as usize - 1];
    roots
        .into_iter()
        .map(|mv| {
            let mut child = pos.scoped(mv);
            (mv, count(&mut child, &mut layers))
        })
        .collect()
}

// One move buffer per remaining ply, so the recursion never allocates.
fn count(pos: &mut Position, layers: &mut [Vec<Move>]) -> u64 {
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };
    legal_moves_into(pos, buf);
    if rest.is_empty() {
        return buf.len() as u64;
    }

    let mut nodes = 0u64;
    for &mv in buf.iter() {
        let mut child = pos.scoped(mv);
        nodes += count(&mut child, rest);
    }
    nodes
}
