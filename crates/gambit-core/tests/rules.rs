//! Integration tests for move legality, execution and FEN round trips
//! through the public API.

use gambit_core::{Color, GameStatus, Move, Piece, Position, STARTING_FEN, Square};

const SCOTCH_FEN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/3PP3/5N2/PPP2PPP/RNBQKB1R b KQkq d3 0 3";

/// Helper: play a list of coordinate moves, asserting each one is legal.
fn play_line(position: &mut Position, line: &[&str]) {
    for text in line {
        let mv = Move::from_uci(text).unwrap();
        assert!(
            position.is_legal_move(mv),
            "{text} should be legal in {}",
            position.to_fen()
        );
        position.apply_move(mv);
    }
}

// ── Encoding ──────────────────────────────────────────────────────────────────

#[test]
fn start_position_encodes_to_standard_fen() {
    assert_eq!(Position::starting_position().to_fen(), STARTING_FEN);
}

#[test]
fn after_e4() {
    let mut position = Position::starting_position();
    position.apply(Square::E2, Square::E4);
    assert_eq!(position.board().piece_at(Square::E4), Some(Piece::WHITE_PAWN));
    assert!(position.board().is_empty(Square::E2));
    assert_eq!(position.side_to_move(), Color::Black);
    assert_eq!(position.en_passant(), Some(Square::E3));
    assert_eq!(position.halfmove_clock(), 0);
    assert_eq!(position.fullmove_number(), 1);
    assert_eq!(
        position.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn scotch_line_reaches_expected_fen() {
    let mut position = Position::starting_position();
    play_line(&mut position, &["e2e4", "e7e5", "g1f3", "b8c6", "d2d4"]);
    assert_eq!(position.to_fen(), SCOTCH_FEN);
}

#[test]
fn decode_of_encode_reproduces_played_positions() {
    let mut position = Position::starting_position();
    let line = [
        "e2e4", "d7d5", "e4e5", "f7f5", "e5f6", "g8f6", "g1f3", "e7e6", "f1e2", "f8d6", "e1g1",
        "e8g8", "b1c3", "b8c6",
    ];
    for text in line {
        position.apply_move(Move::from_uci(text).unwrap());
        let decoded = Position::from_fen(&position.to_fen()).unwrap();
        assert_eq!(decoded.board(), position.board(), "board after {text}");
        assert_eq!(decoded.side_to_move(), position.side_to_move(), "side after {text}");
        assert_eq!(decoded.castling(), position.castling(), "castling after {text}");
        assert_eq!(decoded.en_passant(), position.en_passant(), "ep after {text}");
        assert_eq!(decoded.halfmove_clock(), position.halfmove_clock(), "clock after {text}");
        assert_eq!(decoded.fullmove_number(), position.fullmove_number(), "number after {text}");
    }
}

// ── Legality ──────────────────────────────────────────────────────────────────

#[test]
fn applied_move_is_not_legal_again() {
    let mut position = Position::starting_position();
    for mv in ["g1f3", "b8c6", "e2e4"].map(|s| Move::from_uci(s).unwrap()) {
        assert!(position.is_legal_move(mv));
        position.apply_move(mv);
        assert!(!position.is_legal_move(mv), "{mv} repeated");
    }
}

#[test]
fn en_passant_capture() {
    let mut position = Position::starting_position();
    play_line(&mut position, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(position.en_passant(), Some(Square::D6));
    assert!(position.is_legal(Square::E5, Square::D6));

    position.apply(Square::E5, Square::D6);
    assert_eq!(position.board().piece_at(Square::D6), Some(Piece::WHITE_PAWN));
    assert!(position.board().is_empty(Square::D5));
    assert!(position.board().is_empty(Square::E5));
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut position = Position::starting_position();
    play_line(&mut position, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert!(!position.is_legal(Square::E5, Square::D6));
}

#[test]
fn kingside_castling() {
    let mut position: Position = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
        .parse()
        .unwrap();
    assert!(position.is_legal(Square::E1, Square::G1));
    position.apply(Square::E1, Square::G1);
    assert_eq!(position.board().piece_at(Square::G1), Some(Piece::WHITE_KING));
    assert_eq!(position.board().piece_at(Square::F1), Some(Piece::WHITE_ROOK));
    assert!(position.board().is_empty(Square::H1));
    assert_eq!(position.to_fen(), "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 b kq - 1 1");
}

#[test]
fn back_rank_mate() {
    let mut position: Position = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".parse().unwrap();
    assert!(position.is_legal(Square::A1, Square::A8));
    position.apply(Square::A1, Square::A8);
    assert_eq!(position.status(), GameStatus::Checkmate { winner: Color::White });
    assert!(position.legal_moves().is_empty());

    // Exhaustive: not one of the 64 x 64 pairs is playable.
    for from in Square::all() {
        for to in Square::all() {
            assert!(!position.is_legal(from, to), "{from}{to} should be illegal");
        }
    }
}

#[test]
fn pawn_reaching_last_row_stays_pawn() {
    let mut position: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
    position.apply(Square::A7, Square::A8);
    assert_eq!(position.board().piece_at(Square::A8), Some(Piece::WHITE_PAWN));
    position.apply(Square::E8, Square::E7);
    assert!(
        !position.legal_moves().iter().any(|mv| mv.from() == Square::A8),
        "pawn on the last row has no moves"
    );
}
