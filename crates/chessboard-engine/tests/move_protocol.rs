//! End-to-end checks of the move protocol as the input layer drives it.

use chessboard_core::{PieceKind, Square, Team};
use chessboard_engine::{
    Board, CastlingRule, DragSession, EngineConfig, Geometry, MoveOutcome, RuleSet, StandardRules,
};
use proptest::prelude::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn geometry() -> Geometry {
    Geometry::new(640.0, 640.0).unwrap()
}

#[test]
fn opening_sequence_through_pointer_events() {
    let rules = StandardRules::default();
    let mut board = rules.initial_board(geometry());
    let mut drag = DragSession::new();

    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4")] {
        let (x, y) = board.cell_at(sq(from)).rect.center();
        assert!(drag.pointer_down(&board, x, y).is_some(), "nothing to grab on {from}");
        let (x, y) = board.cell_at(sq(to)).rect.center();
        let outcome = drag.pointer_up(&rules, &mut board, x, y).unwrap();
        assert_eq!(outcome.square(), Some(sq(to)), "{from}-{to} should be legal");
    }

    assert_eq!(
        board.placement().to_string(),
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R"
    );

    let (king, _) = board.piece_at(Square::E1).unwrap();
    assert!(rules.is_legal(&board, king, Square::G1));
    let outcome = rules.apply_move(&mut board, king, Square::G1);
    assert!(matches!(outcome, MoveOutcome::Moved { castle: Some(_), .. }));
    assert_eq!(
        board.placement().to_string(),
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1"
    );
    assert!(board.is_consistent());
}

#[test]
fn capture_then_snap_back_leaves_the_capture_in_place() {
    let rules = StandardRules::default();
    let mut board = Board::from_placement("8/8/8/3p4/4P3/8/8/8", geometry()).unwrap();
    let (pawn, _) = board.piece_at(sq("e4")).unwrap();

    let outcome = rules.apply_move(&mut board, pawn, sq("d5"));
    assert!(matches!(
        outcome,
        MoveOutcome::Moved { captured: Some(p), .. } if p.team == Team::Black
    ));

    let after_capture = board.clone();
    let outcome = rules.apply_move(&mut board, pawn, sq("d7"));
    assert!(!outcome.is_moved());
    assert_eq!(board, after_capture);
    assert_eq!(board.pieces().count(), 1);
}

#[test]
fn configured_rules_drive_castling() {
    let config = EngineConfig::from_toml_str("[rules]\ncastling = \"first-piece-found\"\n").unwrap();
    let rules = config.rules();
    assert_eq!(rules.castling, CastlingRule::FirstPieceFound);

    let mut board = Board::from_placement("8/8/8/8/8/8/8/4K2r", config.geometry().unwrap()).unwrap();
    let (king, _) = board.piece_at(Square::E1).unwrap();
    let (rook, _) = board.piece_at(Square::H1).unwrap();
    rules.apply_move(&mut board, king, Square::G1);

    let rook = board.piece(rook).unwrap();
    assert_eq!((rook.square, rook.team, rook.move_count), (Square::F1, Team::Black, 1));
}

#[test]
fn every_starting_piece_has_the_expected_moves() {
    let rules = StandardRules::default();
    let board = rules.initial_board(geometry());
    for (id, piece) in board.pieces() {
        let count = rules.legal_destinations(&board, id).count();
        let expected = match piece.kind {
            PieceKind::Pawn => 2,
            PieceKind::Knight => 2,
            _ => 0,
        };
        assert_eq!(count, expected, "{} {} on {}", piece.team, piece.kind, piece.square);
    }
}

fn square_strategy() -> impl Strategy<Value = Square> {
    (0u8..64).prop_map(|i| Square::from_index(i).unwrap())
}

proptest! {
    #[test]
    fn requests_keep_the_board_consistent(
        requests in proptest::collection::vec((square_strategy(), square_strategy()), 1..40),
    ) {
        let rules = StandardRules::default();
        let mut board = rules.initial_board(geometry());

        for (from, to) in requests {
            let Some((id, _)) = board.piece_at(from) else { continue };
            let legal = rules.is_legal(&board, id, to);
            let before = board.clone();

            let outcome = rules.apply_move(&mut board, id, to);
            prop_assert_eq!(outcome.is_moved(), legal);
            if legal {
                prop_assert_eq!(board.piece(id).map(|p| p.square), Some(to));
                prop_assert_eq!(
                    board.piece(id).map(|p| p.move_count),
                    before.piece(id).map(|p| p.move_count + 1)
                );
            } else {
                prop_assert_eq!(&board, &before);
            }
            prop_assert!(board.is_consistent());
        }
    }
}
