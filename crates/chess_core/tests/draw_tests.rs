//! Game termination: checkmate attribution and every draw condition.
//!
//! Automatic endings (checkmate, stalemate, insufficient material, the
//! 75-move rule, fivefold repetition) make `is_terminal()` true. The
//! fifty-move rule and threefold repetition are only claimable and are
//! reported separately.

use chess_core::{Color, GameResult, Position, legal_moves, parse_uci_move};

fn play(pos: &mut Position, moves: &[&str]) {
    for txt in moves {
        let mv = parse_uci_move(pos, txt).unwrap();
        pos.apply(mv).unwrap();
    }
}

// =============================================================================
// Checkmate
// =============================================================================

#[test]
fn test_fools_mate_is_black_win() {
    let mut pos = Position::startpos();
    play(&mut pos, &["f2f3", "e7e5", "g2g4"]);
    assert!(!pos.is_terminal());
    assert_eq!(pos.result(), GameResult::InProgress);

    play(&mut pos, &["d8h4"]);
    assert!(pos.is_checkmate());
    assert!(pos.is_terminal());
    assert_eq!(pos.result(), GameResult::BlackWins);
    assert_eq!(pos.result().to_string(), "0-1");
}

#[test]
fn test_back_rank_mate_in_one_is_white_win() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    play(&mut pos, &["a1a8"]);
    assert!(pos.is_terminal());
    assert_eq!(pos.result(), GameResult::WhiteWins);
}

// =============================================================================
// Stalemate
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();

    assert!(legal_moves(&pos).is_empty());
    assert!(!pos.in_check(Color::Black));
    assert!(pos.is_stalemate());
    assert!(!pos.is_checkmate());
    assert_eq!(pos.result(), GameResult::Draw);
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let pos = Position::from_fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(pos.is_stalemate());
    assert_eq!(pos.result(), GameResult::Draw);
}

// =============================================================================
// Insufficient material
// =============================================================================

#[test]
fn test_insufficient_material() {
    let draws = [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",   // K v K
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",  // KB v K
        "8/8/8/4k3/8/4KN2/8/8 w - - 0 1",  // KN v K
        "8/8/4b3/4k3/8/4K3/8/8 w - - 0 1", // K v KB
        "8/8/8/3bk3/8/4KB2/8/8 w - - 0 1", // bishops on same colored squares
    ];
    for fen in draws {
        let pos = Position::from_fen(fen).unwrap();
        assert!(pos.is_insufficient_material(), "{fen}");
        assert_eq!(pos.result(), GameResult::Draw, "{fen}");
    }
}

#[test]
fn test_sufficient_material() {
    let live = [
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",  // pawn
        "8/8/8/4k3/8/2B1KB2/8/8 w - - 0 1", // bishops on both colors
        "8/8/8/4k3/8/3NKN2/8/8 w - - 0 1",  // two knights
        "8/8/8/3nk3/8/4KN2/8/8 w - - 0 1",  // a knight each
        "8/8/8/2b1k3/8/4KB2/8/8 w - - 0 1", // opposite colored bishops
    ];
    for fen in live {
        let pos = Position::from_fen(fen).unwrap();
        assert!(!pos.is_insufficient_material(), "{fen}");
        assert_eq!(pos.result(), GameResult::InProgress, "{fen}");
    }
}

// =============================================================================
// Move-count rules
// =============================================================================

#[test]
fn test_fifty_move_rule_is_claimable_only() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/4P3/8 w - - 99 60").unwrap();
    assert!(!pos.is_fifty_move_draw());

    let pos = Position::from_fen("8/8/8/4k3/8/4K3/4P3/8 w - - 100 60").unwrap();
    assert!(pos.is_fifty_move_draw());
    assert!(!pos.is_terminal());
}

#[test]
fn test_seventyfive_move_rule_ends_game() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/4P3/8 w - - 150 80").unwrap();
    assert!(pos.is_seventyfive_move_draw());
    assert!(pos.is_terminal());
    assert_eq!(pos.result(), GameResult::Draw);
}

#[test]
fn test_checkmate_beats_seventyfive_move_rule() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 149 90").unwrap();
    play(&mut pos, &["a1a8"]);
    assert_eq!(pos.halfmove_clock, 150);
    assert_eq!(pos.result(), GameResult::WhiteWins);
}

#[test]
fn test_halfmove_clock_resets_on_pawn_move() {
    let mut pos = Position::from_fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60").unwrap();
    play(&mut pos, &["e2e3"]);
    assert_eq!(pos.halfmove_clock, 0);
    assert!(!pos.is_fifty_move_draw());
}

// =============================================================================
// Repetition
// =============================================================================

#[test]
fn test_repetition_counts() {
    let mut pos = Position::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    assert_eq!(pos.repetition_count(), 1);

    play(&mut pos, &shuffle);
    assert_eq!(pos.repetition_count(), 2);

    play(&mut pos, &shuffle);
    assert!(pos.is_threefold_repetition());
    assert!(!pos.is_terminal(), "threefold is only claimable");

    play(&mut pos, &shuffle);
    play(&mut pos, &shuffle);
    assert!(pos.is_fivefold_repetition());
    assert_eq!(pos.result(), GameResult::Draw);
}

#[test]
fn test_undo_unwinds_repetition() {
    let mut pos = Position::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    play(&mut pos, &shuffle);
    play(&mut pos, &shuffle);
    assert_eq!(pos.repetition_count(), 3);
    pos.undo().unwrap();
    pos.undo().unwrap();
    pos.undo().unwrap();
    pos.undo().unwrap();
    assert_eq!(pos.repetition_count(), 2);
}
