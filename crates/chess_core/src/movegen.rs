use crate::attacks::*;
use crate::board::Position;
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
///
/// Clones the position once so the legality probe has something to mutate;
/// the caller's position is never touched.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Order is fixed for a given position: origin squares from a1 to h8, then
/// each piece's own target order. `pos` is back in its original state when
/// this returns.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Play each candidate and drop the ones that leave our king attacked.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

/// Moves that follow piece movement rules but may leave the king in check.
pub fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    let own = pos.occupancy(us);
    let occ = pos.occupied();

    for from in own {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        let targets = match pc.kind {
            PieceKind::Pawn => {
                gen_pawn(pos, from, us, out);
                continue;
            }
            PieceKind::Knight => knight_attacks(from),
            PieceKind::Bishop => bishop_attacks(from, occ),
            PieceKind::Rook => rook_attacks(from, occ),
            PieceKind::Queen => queen_attacks(from, occ),
            PieceKind::King => king_attacks(from),
        };
        out.extend((targets & !own).map(|to| Move::new(from, to)));
        if pc.kind == PieceKind::King {
            gen_castle(pos, from, us, out);
        }
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        out.extend(PieceKind::PROMOTIONS.iter().map(|&pk| Move::with_promo(from, to, pk)));
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();
    let (start_rank, promo_rank) = match c {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);

        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    let enemies = pos.occupancy(c.other());
    for to in pawn_attacks(from, c) {
        if enemies.contains(to) {
            push_pawn_move(from, to, promo_rank, out);
        } else if pos.en_passant == Some(to)
            && pos.piece_at((from & !7) | (to & 7)) == Some(Piece::new(c.other(), PieceKind::Pawn))
        {
            out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            });
        }
    }
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let base: u8 = match c {
        Color::White => 0,
        Color::Black => 56,
    };
    // King must be on its original square and not currently in check.
    if from != base + 4 || pos.in_check(c) {
        return;
    }

    let (kingside, queenside) = pos.castling.for_color(c);
    let enemy = c.other();
    let rook = Some(Piece::new(c, PieceKind::Rook));
    let empty = |s: u8| pos.piece_at(s).is_none();
    let safe = |s: u8| !pos.is_square_attacked(s, enemy);

    // Kingside: f and g empty, king crosses f and lands on g.
    if kingside
        && pos.piece_at(base + 7) == rook
        && empty(base + 5)
        && empty(base + 6)
        && safe(base + 5)
        && safe(base + 6)
    {
        out.push(Move {
            is_castle: true,
            ..Move::new(from, base + 6)
        });
    }
    // Queenside: b, c and d empty, king crosses d and lands on c.
    if queenside
        && pos.piece_at(base) == rook
        && empty(base + 1)
        && empty(base + 2)
        && empty(base + 3)
        && safe(base + 3)
        && safe(base + 2)
    {
        out.push(Move {
            is_castle: true,
            ..Move::new(from, base + 2)
        });
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
