//! UCI long algebraic move text (`e2e4`, `e7e8q`).
//!
//! Formatting is `Move`'s `Display`. Parsing yields the raw (from, to,
//! promotion) triple; `parse_uci_move` then resolves it against the legal
//! moves so castle and en-passant flags come out right.

use crate::board::Position;
use crate::error::{ChessError, Result};
use crate::movegen::legal_moves;
use crate::types::*;

/// Splits move text into its squares and optional promotion piece.
pub fn parse_move_text(txt: &str) -> Result<(u8, u8, Option<PieceKind>)> {
    let txt = txt.trim();
    let bad = || ChessError::InvalidMoveText(txt.to_string());
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(bad());
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(bad)?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(bad)?;
    let promo = match txt[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_symbol(c) {
            Some(pk) if PieceKind::PROMOTIONS.contains(&pk) => Some(pk),
            _ => return Err(bad()),
        },
    };
    Ok((from, to, promo))
}

/// Parses `txt` and returns the matching legal move in `pos`.
///
/// A pawn reaching the last rank needs an explicit promotion letter.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move> {
    let (from, to, promo) = parse_move_text(txt)?;
    let wanted = Move {
        promo,
        ..Move::new(from, to)
    };
    legal_moves(pos)
        .into_iter()
        .find(|m| m.same_squares(&wanted))
        .ok_or_else(|| ChessError::IllegalMove(wanted.to_string()))
}
