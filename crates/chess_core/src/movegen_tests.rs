use super::*;

fn move_strings(pos: &Position) -> Vec<String> {
    legal_moves(pos).iter().map(Move::to_string).collect()
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_generation_order_is_stable() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let first = legal_moves(&pos);
    for _ in 0..5 {
        assert_eq!(legal_moves(&pos), first);
    }
}

#[test]
fn test_generation_leaves_position_untouched() {
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let before = pos.clone();
    let mut buf = Vec::new();
    legal_moves_into(&mut pos, &mut buf);
    assert_eq!(pos, before);
}

#[test]
fn test_pinned_piece_stays_on_pin_line() {
    // The e2 rook is pinned by the e8 rook; it may only slide along the e-file.
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
    let rook_moves: Vec<Move> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.from == 12)
        .collect();
    assert!(!rook_moves.is_empty());
    assert!(rook_moves.iter().all(|m| file_of(m.to) == 4));
    assert!(rook_moves.iter().any(|m| m.to == 60)); // capture the pinner
}

#[test]
fn test_pinned_knight_cannot_move() {
    let pos = Position::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| m.from != 12));
}

#[test]
fn test_en_passant_only_right_after_double_push() {
    let mut pos = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    pos.apply(Move::new(51, 35)).unwrap(); // d7d5
    assert_eq!(pos.en_passant, Some(43)); // d6
    assert!(move_strings(&pos).contains(&"e5d6".to_string()));

    // Any intervening pair of moves removes the option.
    pos.apply(Move::new(4, 3)).unwrap(); // Kd1
    pos.apply(Move::new(60, 59)).unwrap(); // Kd8
    assert_eq!(pos.en_passant, None);
    assert!(!move_strings(&pos).contains(&"e5d6".to_string()));
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    // Capturing e.p. would clear the fifth rank between the h5 rook and a5 king.
    let pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
    assert!(!move_strings(&pos).contains(&"e5d6".to_string()));
}

#[test]
fn test_en_passant_needs_enemy_pawn_beside() {
    // Target set by hand with nothing to capture on d5.
    let mut pos = Position::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - - 0 1").unwrap();
    pos.en_passant = Some(43); // d6
    assert!(legal_moves(&pos).iter().all(|m| !m.is_en_passant));

    // Target behind the mover's own pawn.
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - - 0 1").unwrap();
    pos.en_passant = Some(20); // e3
    assert!(legal_moves(&pos).iter().all(|m| !m.is_en_passant));
}

#[test]
fn test_no_castling_out_of_check() {
    let pos = Position::from_fen("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| !m.is_castle));
}

#[test]
fn test_no_castling_through_attacked_square() {
    // f1 is covered by the f8 rook: kingside is out, queenside is fine.
    let pos = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = move_strings(&pos);
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));
}

#[test]
fn test_no_castling_into_check() {
    let pos = Position::from_fen("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(!move_strings(&pos).contains(&"e1g1".to_string()));
}

#[test]
fn test_queenside_castle_allowed_with_b1_attacked() {
    // Only d1 and c1 must be safe; b1 just has to be empty.
    let pos = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    assert!(move_strings(&pos).contains(&"e1c1".to_string()));
}

#[test]
fn test_no_castling_without_rook() {
    // Rights claimed in the FEN but the h1 rook is gone.
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| !m.is_castle));
}

#[test]
fn test_promotions_generated_in_fixed_order() {
    let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promos: Vec<PieceKind> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.from == 48)
        .filter_map(|m| m.promo)
        .collect();
    assert_eq!(
        promos,
        vec![
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight
        ]
    );
}

#[test]
fn test_checkmated_side_has_no_moves() {
    // Back-rank mate
    let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert!(legal_moves(&pos).is_empty());
    assert!(pos.in_check(Color::Black));
}
