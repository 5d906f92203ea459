//! Static evaluation for the fallback search.

pub mod material;

use gambit_core::Board;

/// Evaluate `board` from White's perspective.
///
/// Material only: the fallback search has no positional terms.
#[inline]
pub fn evaluate(board: &Board) -> i32 {
    material::material(board)
}
