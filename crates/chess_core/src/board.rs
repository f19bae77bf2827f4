use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::{trace, warn};

use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::error::{ChessError, Result};
use crate::movegen::legal_moves;
use crate::types::*;
use crate::zobrist::repetition_key;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    /// (kingside, queenside) for one color.
    pub fn for_color(&self, c: Color) -> (bool, bool) {
        match c {
            Color::White => (self.wk, self.wq),
            Color::Black => (self.bk, self.bq),
        }
    }

    /// Drops whichever rights depend on a piece standing on `sq`.
    fn touch(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            7 => self.wk = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            56 => self.bq = false,
            63 => self.bk = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            _ => {}
        }
    }
}

/// Outcome of a game as seen from the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    InProgress,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::InProgress => "*",
        })
    }
}

/// Everything `make_move` overwrites that the move itself can't reconstruct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Undo {
    pub moved_piece: Piece,
    pub captured: Option<Piece>,
    pub captured_sq: u8, // differs from `to` only for en passant
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct HistoryEntry {
    mv: Move,
    undo: Undo,
    /// Repetition key of the position the move was played from.
    key: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    by_color: [Bitboard; 2],
    by_kind: [Bitboard; 6],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    history: Vec<HistoryEntry>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Rook squares for a castling king landing on `king_to`.
fn castle_rook_squares(king_to: u8) -> Option<(u8, u8)> {
    match king_to {
        6 => Some((7, 5)),
        2 => Some((0, 3)),
        62 => Some((63, 61)),
        58 => Some((56, 59)),
        _ => None,
    }
}

impl Position {
    /// A board with no pieces, White to move and no castling rights.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            by_color: [Bitboard::EMPTY; 2],
            by_kind: [Bitboard::EMPTY; 6],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::ALL;

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as u8;
            p.set_piece(f, Some(Piece::new(Color::White, kind)));
            p.set_piece(8 + f, Some(Piece::new(Color::White, PieceKind::Pawn)));
            p.set_piece(48 + f, Some(Piece::new(Color::Black, PieceKind::Pawn)));
            p.set_piece(56 + f, Some(Piece::new(Color::Black, kind)));
        }
        p
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    /// Places (or clears) a piece, keeping the bitboards in step with the mailbox.
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        if let Some(old) = self.board[sq as usize] {
            self.by_color[old.color.idx()].clear(sq);
            self.by_kind[old.kind.idx()].clear(sq);
        }
        if let Some(new) = pc {
            self.by_color[new.color.idx()].set(sq);
            self.by_kind[new.kind.idx()].set(sq);
        }
        self.board[sq as usize] = pc;
    }

    pub fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.by_kind[kind.idx()] & self.by_color[color.idx()]
    }

    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.by_color[color.idx()]
    }

    pub fn occupied(&self) -> Bitboard {
        self.by_color[0] | self.by_color[1]
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(PieceKind::King, c).lsb()
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(k) => self.is_square_attacked(k, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let them = self.occupancy(by);
        let occ = self.occupied();
        let kind = |k: PieceKind| self.by_kind[k.idx()] & them;

        // A `by` pawn attacks `target` from exactly the squares an opposing
        // pawn on `target` would attack.
        if !(pawn_attacks(target, by.other()) & kind(PieceKind::Pawn)).is_empty() {
            return true;
        }
        if !(knight_attacks(target) & kind(PieceKind::Knight)).is_empty() {
            return true;
        }
        if !(king_attacks(target) & kind(PieceKind::King)).is_empty() {
            return true;
        }
        let queens = kind(PieceKind::Queen);
        if !(bishop_attacks(target, occ) & (kind(PieceKind::Bishop) | queens)).is_empty() {
            return true;
        }
        !(rook_attacks(target, occ) & (kind(PieceKind::Rook) | queens)).is_empty()
    }

    /// Plays `mv` without recording it. Pair with `unmake_move`.
    ///
    /// `mv` must come from the move generator for this exact position.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self
            .piece_at(mv.from)
            .expect("make_move: no piece on from-square");

        // En passant takes the pawn beside `from`, on the destination file.
        let captured_sq = if mv.is_en_passant {
            (mv.from & !7) | (mv.to & 7)
        } else {
            mv.to
        };
        let captured = self.piece_at(captured_sq);

        let mut undo = Undo {
            moved_piece: moved,
            captured,
            captured_sq,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            rook_move: None,
        };

        if captured.is_some() {
            self.set_piece(captured_sq, None);
        }
        self.set_piece(mv.from, None);

        let promo_rank = match moved.color {
            Color::White => 7,
            Color::Black => 0,
        };
        let landed = if moved.kind == PieceKind::Pawn && rank_of(mv.to) == promo_rank {
            Piece::new(moved.color, mv.promo.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.set_piece(mv.to, Some(landed));

        if mv.is_castle
            && moved.kind == PieceKind::King
            && let Some((rf, rt)) = castle_rook_squares(mv.to)
        {
            let rook = self.piece_at(rf);
            self.set_piece(rf, None);
            self.set_piece(rt, rook);
            undo.rook_move = Some((rf, rt));
        }

        self.castling.touch(mv.from);
        self.castling.touch(mv.to);

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 16 {
            self.en_passant = Some((mv.from + mv.to) / 2);
        }

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if moved.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.other();

        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // Putting the original piece back also reverts a promotion.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));
        if let Some(cap) = undo.captured {
            self.set_piece(undo.captured_sq, Some(cap));
        }
    }

    // =========================================================================
    // Move history
    // =========================================================================

    /// Plays a generator-produced move and records it for `undo`.
    ///
    /// No legality check; use `apply` for moves that come from outside.
    pub fn push(&mut self, mv: Move) {
        let key = repetition_key(self);
        let undo = self.make_move(mv);
        self.history.push(HistoryEntry { mv, undo, key });
    }

    /// Reverts the most recent `push`, returning the move, or `None` if
    /// nothing has been played.
    pub fn pop(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.unmake_move(entry.mv, entry.undo);
        Some(entry.mv)
    }

    /// Plays `mv` if it is legal here.
    ///
    /// Only `from`, `to` and `promo` are compared, so a move built from user
    /// input picks up the generator's en-passant/castle flags. Returns the
    /// move actually played.
    pub fn apply(&mut self, mv: Move) -> Result<Move> {
        let legal = match legal_moves(self).into_iter().find(|m| m.same_squares(&mv)) {
            Some(m) => m,
            None => {
                warn!(%mv, fen = %self.to_fen(), "rejected illegal move");
                return Err(ChessError::IllegalMove(mv.to_string()));
            }
        };
        self.push(legal);
        trace!(mv = %legal, "applied");
        Ok(legal)
    }

    /// Reverts the last played move.
    pub fn undo(&mut self) -> Result<Move> {
        let mv = self.pop().ok_or(ChessError::EmptyHistory)?;
        trace!(%mv, "undone");
        Ok(mv)
    }

    /// Pushes `mv` and returns a guard that pops it again when dropped.
    ///
    /// The guard derefs to the position, so nested searches can keep
    /// scoping moves on it. Don't `push` through the guard without a
    /// matching `pop`, or the drop will revert the wrong move.
    pub fn scoped(&mut self, mv: Move) -> MoveScope<'_> {
        self.push(mv);
        MoveScope { pos: self }
    }

    /// Moves played so far, oldest first.
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|e| e.mv)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|e| e.mv)
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    // =========================================================================
    // Game termination
    // =========================================================================

    /// How many times the current position has occurred, including now.
    pub fn repetition_count(&self) -> usize {
        let now = repetition_key(self);
        // Nothing before the last capture or pawn move can match.
        let reversible = self.halfmove_clock as usize;
        1 + self
            .history
            .iter()
            .rev()
            .take(reversible)
            .filter(|e| e.key == now)
            .count()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= 5
    }

    /// Fifty full moves without a capture or pawn move: a claimable draw.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Seventy-five full moves without a capture or pawn move: an automatic draw.
    pub fn is_seventyfive_move_draw(&self) -> bool {
        self.halfmove_clock >= 150
    }

    /// Neither side can possibly deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        self.has_insufficient_material(Color::White) && self.has_insufficient_material(Color::Black)
    }

    fn has_insufficient_material(&self, c: Color) -> bool {
        let ours = self.occupancy(c);
        let heavy = self.by_kind[PieceKind::Pawn.idx()]
            | self.by_kind[PieceKind::Rook.idx()]
            | self.by_kind[PieceKind::Queen.idx()];
        if !(ours & heavy).is_empty() {
            return false;
        }

        let knights = self.by_kind[PieceKind::Knight.idx()];
        let kings = self.by_kind[PieceKind::King.idx()];
        let queens = self.by_kind[PieceKind::Queen.idx()];
        if !(ours & knights).is_empty() {
            // A lone knight can only mate with help from enemy pieces that
            // block its king's escape.
            let theirs = self.occupancy(c.other());
            return ours.popcount() <= 2 && (theirs & !kings & !queens).is_empty();
        }

        let bishops = self.by_kind[PieceKind::Bishop.idx()];
        if !(ours & bishops).is_empty() {
            let same_color = (bishops & Bitboard::DARK_SQUARES).is_empty()
                || (bishops & Bitboard::LIGHT_SQUARES).is_empty();
            return same_color
                && self.by_kind[PieceKind::Pawn.idx()].is_empty()
                && knights.is_empty();
        }

        true
    }

    /// Draws that end the game regardless of the players' wishes, other
    /// than stalemate.
    pub fn is_automatic_draw(&self) -> bool {
        self.is_insufficient_material()
            || self.is_seventyfive_move_draw()
            || self.is_fivefold_repetition()
    }

    pub fn result(&self) -> GameResult {
        let no_moves = legal_moves(self).is_empty();
        if no_moves && self.in_check(self.side_to_move) {
            return match self.side_to_move {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            };
        }
        if no_moves || self.is_automatic_draw() {
            return GameResult::Draw;
        }
        GameResult::InProgress
    }

    pub fn is_terminal(&self) -> bool {
        self.result() != GameResult::InProgress
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && legal_moves(self).is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && legal_moves(self).is_empty()
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// The same position with colors swapped and the board flipped top to
    /// bottom. History is not carried over.
    pub fn mirrored(&self) -> Position {
        let mut m = Position::empty();
        for s in self.occupied() {
            if let Some(pc) = self.piece_at(s) {
                m.set_piece(flip_rank(s), Some(Piece::new(pc.color.other(), pc.kind)));
            }
        }
        m.side_to_move = self.side_to_move.other();
        m.castling = CastlingRights {
            wk: self.castling.bk,
            wq: self.castling.bq,
            bk: self.castling.wk,
            bq: self.castling.wq,
        };
        m.en_passant = self.en_passant.map(flip_rank);
        m.halfmove_clock = self.halfmove_clock;
        m.fullmove_number = self.fullmove_number;
        m
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = sq(file, rank)
                    .and_then(|s| self.piece_at(s))
                    .map_or('.', Piece::symbol);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// A move pushed by [`Position::scoped`], undone on drop.
pub struct MoveScope<'a> {
    pos: &'a mut Position,
}

impl Deref for MoveScope<'_> {
    type Target = Position;
    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for MoveScope<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for MoveScope<'_> {
    fn drop(&mut self) {
        self.pos.pop();
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
