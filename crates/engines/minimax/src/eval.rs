//! Material evaluation.

use chess_core::{Color, PieceKind, Position};
use serde::{Deserialize, Serialize};

/// Material weight per piece kind, in pawns.
///
/// Every field has a default, so a config table only needs the weights it
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceValues {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: 1,
            knight: 3,
            bishop: 3,
            rook: 5,
            queen: 9,
            king: 0,
        }
    }
}

impl PieceValues {
    #[inline]
    pub fn of(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

/// Material balance from White's point of view.
///
/// Positive favors White, negative favors Black, whoever is to move.
/// Checkmated and stalemated positions are scored on material alone.
pub fn evaluate(pos: &Position, values: &PieceValues) -> i32 {
    let mut score = 0i32;

    for kind in PieceKind::ALL {
        let white = pos.pieces(kind, Color::White).popcount() as i32;
        let black = pos.pieces(kind, Color::Black).popcount() as i32;
        score += values.of(kind) * (white - black);
    }

    score
}
