//! Integration tests for the fallback minimax search.
//!
//! Verifies tactical sanity (free material is taken, each side optimises in
//! its own direction) and that results are deterministic and thread-safe.

use std::thread;

use gambit_core::{Color, Move, Position, STARTING_FEN, Square};
use gambit_engine::{SearchResult, best_move, search};

const HANGING_ROOK_FEN: &str = "4k3/8/8/8/3r4/8/8/3QK3 w - - 0 1";

const BLACK_TAKES_QUEEN_FEN: &str = "4k3/8/8/8/r2Q4/8/8/4K3 b - - 0 1";

/// Helper: decode `fen` and search it at `depth`.
fn search_fen(fen: &str, depth: u8) -> SearchResult {
    let position: Position = fen.parse().unwrap();
    search(position.board(), position.side_to_move(), depth)
}

// ── Basic correctness ─────────────────────────────────────────────────────────

#[test]
fn white_takes_hanging_rook() {
    let result = search_fen(HANGING_ROOK_FEN, 2);
    assert_eq!(
        result.best_move,
        Some(Move::new(Square::D1, Square::D4)),
        "queen should capture the undefended rook"
    );
    assert_eq!(result.score, 900, "queen up after the capture");
}

#[test]
fn black_minimises() {
    let result = search_fen(BLACK_TAKES_QUEEN_FEN, 1);
    assert_eq!(result.best_move, Some(Move::new(Square::A4, Square::D4)));
    assert_eq!(result.score, -500);
}

#[test]
fn best_move_matches_search() {
    let from_fen = best_move(HANGING_ROOK_FEN, 2).unwrap();
    assert_eq!(from_fen, search_fen(HANGING_ROOK_FEN, 2).best_move);
}

#[test]
fn suggested_move_is_legal_in_quiet_positions() {
    let position: Position = STARTING_FEN.parse().unwrap();
    let mv = best_move(STARTING_FEN, 3).unwrap().unwrap();
    assert!(position.is_legal_move(mv), "{mv} should be legal from the start");
}

// ── Determinism and threading ─────────────────────────────────────────────────

#[test]
fn repeated_searches_agree() {
    let first = search_fen(STARTING_FEN, 3);
    let second = search_fen(STARTING_FEN, 3);
    assert_eq!(first, second);
}

#[test]
fn search_runs_on_a_background_thread() {
    let position: Position = HANGING_ROOK_FEN.parse().unwrap();
    let board = *position.board();
    let handle = thread::spawn(move || search(&board, Color::White, 2));
    let result = handle.join().unwrap();
    assert_eq!(result.best_move, Some(Move::new(Square::D1, Square::D4)));
}
