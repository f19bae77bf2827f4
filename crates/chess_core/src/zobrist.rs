//! Zobrist keys for repetition detection.
//!
//! Two positions get the same key when they agree on placement, side to
//! move, castling rights, and en-passant file. The en-passant file only
//! counts when a pawn of the side to move could actually capture there, so
//! a double push that nobody can answer does not make an otherwise
//! repeated position look new.

use crate::attacks::pawn_attacks;
use crate::board::Position;
use crate::types::{Color, Piece, PieceKind};

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square].
    pub pieces: [[[u64; 64]; 6]; 2],
    pub black_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    pub en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Fills every key from a splitmix64 stream with a fixed seed, so keys
    /// are identical across runs and builds.
    pub const fn new() -> Self {
        const fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9E3779B97F4A7C15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
            z ^ (z >> 31)
        }

        let mut state = 0x5EED_C4E5_5000_0001u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    pieces[color][kind][sq] = splitmix64(&mut state);
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        let black_to_move = splitmix64(&mut state);

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            castling[i] = splitmix64(&mut state);
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            en_passant[i] = splitmix64(&mut state);
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Key identifying `pos` for repetition counting.
pub fn repetition_key(pos: &Position) -> u64 {
    let mut h = 0u64;
    for sq in pos.occupied() {
        if let Some(pc) = pos.piece_at(sq) {
            h ^= ZOBRIST.piece_key(pc, sq);
        }
    }
    if pos.side_to_move == Color::Black {
        h ^= ZOBRIST.black_to_move;
    }
    let rights = [
        pos.castling.wk,
        pos.castling.wq,
        pos.castling.bk,
        pos.castling.bq,
    ];
    for (i, on) in rights.into_iter().enumerate() {
        if on {
            h ^= ZOBRIST.castling[i];
        }
    }
    if let Some(ep) = pos.en_passant {
        let us = pos.side_to_move;
        // squares our pawns would need to stand on to capture onto `ep`
        let capturers = pawn_attacks(ep, us.other()) & pos.pieces(PieceKind::Pawn, us);
        if !capturers.is_empty() {
            h ^= ZOBRIST.en_passant[(ep % 8) as usize];
        }
    }
    h
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
