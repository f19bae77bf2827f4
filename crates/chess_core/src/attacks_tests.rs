use super::*;

#[test]
fn test_knight_attacks() {
    // e4 is surrounded by eight knight targets
    assert_eq!(knight_attacks(28).popcount(), 8);

    let corner = knight_attacks(0);
    assert_eq!(corner.popcount(), 2);
    assert!(corner.contains(10)); // c2
    assert!(corner.contains(17)); // b3

    // h1 must not wrap onto the a-file
    let h1 = knight_attacks(7);
    assert_eq!(h1.popcount(), 2);
    assert!(h1.contains(13)); // f2
    assert!(h1.contains(22)); // g3
}

#[test]
fn test_king_attacks() {
    assert_eq!(king_attacks(28).popcount(), 8);
    assert_eq!(king_attacks(0).popcount(), 3);
    assert_eq!(king_attacks(63).popcount(), 3);
}

#[test]
fn test_pawn_attacks_by_color() {
    let white = pawn_attacks(28, Color::White);
    assert!(white.contains(35)); // d5
    assert!(white.contains(37)); // f5

    let black = pawn_attacks(28, Color::Black);
    assert!(black.contains(19)); // d3
    assert!(black.contains(21)); // f3

    // a2 pawn only reaches b3
    assert_eq!(pawn_attacks(8, Color::White), Bitboard::from_square(17));
}

#[test]
fn test_sliders_on_empty_board() {
    assert_eq!(rook_attacks(28, Bitboard::EMPTY).popcount(), 14);
    assert_eq!(bishop_attacks(28, Bitboard::EMPTY).popcount(), 13);
    assert_eq!(queen_attacks(28, Bitboard::EMPTY).popcount(), 27);
}

#[test]
fn test_rook_stops_on_blocker() {
    let occupied = Bitboard::from_square(24); // a4
    let attacks = rook_attacks(0, occupied);
    assert!(attacks.contains(16)); // a3
    assert!(attacks.contains(24)); // a4 itself, capturable
    assert!(!attacks.contains(32)); // a5 behind the blocker
    assert!(attacks.contains(7)); // h1
}
