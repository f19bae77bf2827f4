//! Forsyth-Edwards Notation in and out.

use crate::board::{CastlingRights, Position};
use crate::error::{ChessError, Result};
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn invalid(msg: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(msg.into())
}

/// Whether `ep` is the square an enemy pawn just skipped over: on the
/// mover's sixth rank, empty, with the pawn in front of it and its start
/// square vacated.
fn ep_matches_double_push(pos: &Position, ep: u8) -> bool {
    let us = pos.side_to_move;
    let them = us.other();
    let (ep_rank, pawn_sq, start_sq) = match us {
        Color::White => (5, ep.wrapping_sub(8), ep.wrapping_add(8)),
        Color::Black => (2, ep.wrapping_add(8), ep.wrapping_sub(8)),
    };
    rank_of(ep) == ep_rank
        && pos.piece_at(ep).is_none()
        && pos.piece_at(start_sq).is_none()
        && pos.piece_at(pawn_sq) == Some(Piece::new(them, PieceKind::Pawn))
}

impl Position {
    /// Parses a FEN string. The move counters may be omitted and default to
    /// `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 || parts.len() > 6 {
            return Err(invalid(format!("expected 4 to 6 fields, got {}", parts.len())));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("board section needs 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let pc = Piece::from_symbol(ch)
                        .ok_or_else(|| invalid(format!("bad piece letter {ch:?}")))?;
                    let s = sq(file, rank)
                        .ok_or_else(|| invalid(format!("rank {} overflows", rank + 1)))?;
                    pos.set_piece(s, Some(pc));
                    file += 1;
                }
                if file > 8 {
                    return Err(invalid(format!("rank {} overflows", rank + 1)));
                }
            }
            if file != 8 {
                return Err(invalid(format!("rank {} has {} files", rank + 1, file)));
            }
        }
        for color in [Color::White, Color::Black] {
            let kings = pos.pieces(PieceKind::King, color).popcount();
            if kings != 1 {
                return Err(invalid(format!("{color:?} has {kings} kings")));
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(invalid(format!("bad side to move {other:?}"))),
        };

        pos.castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => return Err(invalid(format!("bad castling flag {c:?}"))),
                }
            }
        }

        pos.en_passant = match parts[3] {
            "-" => None,
            s => {
                let ep = coord_to_sq(s).ok_or_else(|| invalid(format!("bad en passant {s:?}")))?;
                if !ep_matches_double_push(&pos, ep) {
                    return Err(invalid(format!(
                        "en passant square {s} does not follow a double pawn push"
                    )));
                }
                Some(ep)
            }
        };

        let counter = |idx: usize, default: u32, name: &str| -> Result<u32> {
            match parts.get(idx) {
                Some(t) => t.parse().map_err(|_| invalid(format!("bad {name} {t:?}"))),
                None => Ok(default),
            }
        };
        pos.halfmove_clock = counter(4, 0, "halfmove clock")?;
        pos.fullmove_number = counter(5, 1, "fullmove number")?;

        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                match sq(file, rank).and_then(|s| self.piece_at(s)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        for (on, c) in [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ] {
            if on {
                out.push(c);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}
