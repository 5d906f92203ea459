//! Plain recursive minimax without pruning.

use gambit_core::{Board, Color, Move};

use super::movegen::generate_moves;
use crate::eval::evaluate;

/// Score `board` with `side` to move, searching `depth` plies.
///
/// White maximises and Black minimises. A move replaces the current best only
/// on strict improvement, so the first move in generation order wins ties.
/// Returns the score and the chosen move; the move is `None` at depth 0 or
/// when `side` has nothing to play.
pub(crate) fn minimax(board: &Board, side: Color, depth: u8, nodes: &mut u64) -> (i32, Option<Move>) {
    *nodes += 1;

    if depth == 0 {
        return (evaluate(board), None);
    }
    let moves = generate_moves(board, side);
    if moves.is_empty() {
        return (evaluate(board), None);
    }

    let mut best: Option<(i32, Move)> = None;
    for mv in moves {
        let mut child = *board;
        child.relocate(mv.from(), mv.to());
        let (score, _) = minimax(&child, !side, depth - 1, nodes);

        let improves = match best {
            None => true,
            Some((best_score, _)) => match side {
                Color::White => score > best_score,
                Color::Black => score < best_score,
            },
        };
        if improves {
            best = Some((score, mv));
        }
    }

    match best {
        Some((score, mv)) => (score, Some(mv)),
        None => (evaluate(board), None),
    }
}
