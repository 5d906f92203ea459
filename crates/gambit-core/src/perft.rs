//! Move-path enumeration for checking the rules against published counts.
//!
//! Counts are comparable with published tables only while no promotion is
//! reachable within the searched depth.

use crate::position::Position;

/// Number of distinct legal move sequences of length `depth` from `position`.
///
/// The position itself counts as one sequence at depth 0. Repetition
/// bookkeeping is skipped on the way down.
pub fn perft(position: &Position, depth: usize) -> u64 {
    perft_inner(&position.detached(), depth)
}

fn perft_inner(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut child = position.clone();
            child.apply_unrecorded(mv.from(), mv.to());
            perft_inner(&child, depth - 1)
        })
        .sum()
}

/// [`perft`] split by first move, as `(coordinate move, count)` sorted by move.
pub fn divide(position: &Position, depth: usize) -> Vec<(String, u64)> {
    let root = position.detached();
    let mut results: Vec<(String, u64)> = root
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let mut child = root.clone();
            child.apply_unrecorded(mv.from(), mv.to());
            let count = if depth <= 1 { 1 } else { perft_inner(&child, depth - 1) };
            (mv.to_uci(), count)
        })
        .collect();
    results.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    results
}
