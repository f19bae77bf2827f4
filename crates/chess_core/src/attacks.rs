//! Attack sets for every piece kind.
//!
//! Knight, king and pawn attacks are tables built at compile time from
//! their step offsets. Sliders walk rays against an occupancy set and stop
//! on the first blocker, which is included so captures fall out naturally.

use crate::bitboard::Bitboard;
use crate::types::{Color, file_of, rank_of, sq};

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const WHITE_PAWN_DELTAS: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_DELTAS: [(i8, i8); 2] = [(-1, -1), (1, -1)];

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut from = 0usize;
    while from < 64 {
        let file = (from % 8) as i8;
        let rank = (from / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << ((r * 8 + f) as u32);
            }
            i += 1;
        }
        table[from] = Bitboard(bits);
        from += 1;
    }
    table
}

static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);
static KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_DELTAS);
static PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&WHITE_PAWN_DELTAS),
    leaper_table(&BLACK_PAWN_DELTAS),
];

/// Squares a pawn of `color` standing on `sq` attacks.
#[inline(always)]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.idx()][sq as usize]
}

#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

fn ray_attacks(from: u8, occupied: Bitboard, dirs: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(to) = sq(f, r) {
            attacks.set(to);
            if occupied.contains(to) {
                break;
            }
            f += df;
            r += dr;
        }
    }
    attacks
}

#[inline]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &BISHOP_DIRS)
}

#[inline]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &ROOK_DIRS)
}

#[inline]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
